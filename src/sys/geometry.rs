//! Plain geometry types in top-left origin, Y-down space.
//!
//! Everything inside the engine works in this space. Rects coming from a
//! bottom-left origin API are converted at the boundary by
//! [`CoordinateConverter`](crate::sys::screen::CoordinateConverter).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

bitflags! {
    /// Sides of a rect, named for a left-to-right layout.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Edges: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEADING = 1 << 2;
        const TRAILING = 1 << 3;
    }
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Point { x, y } }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of `other` as seen from `self`, in degrees within `[0, 360)`.
    /// Zero points straight up and the angle grows clockwise.
    pub fn angle_to(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let angle = dx.atan2(-dy).to_degrees();
        if angle < 0.0 { angle + 360.0 } else { angle }
    }
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self { Size { width, height } }
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub const fn from_parts(origin: Point, size: Size) -> Self { Rect { origin, size } }

    /// A zero-size rect sitting at `center`.
    pub const fn degenerate(center: Point) -> Self { Rect::from_parts(center, Size::new(0.0, 0.0)) }

    pub fn min_x(&self) -> f64 { self.origin.x }
    pub fn min_y(&self) -> f64 { self.origin.y }
    pub fn max_x(&self) -> f64 { self.origin.x + self.size.width }
    pub fn max_y(&self) -> f64 { self.origin.y + self.size.height }
    pub fn mid_x(&self) -> f64 { self.origin.x + self.size.width / 2.0 }
    pub fn mid_y(&self) -> f64 { self.origin.y + self.size.height / 2.0 }
    pub fn width(&self) -> f64 { self.size.width }
    pub fn height(&self) -> f64 { self.size.height }

    pub fn center(&self) -> Point { Point::new(self.mid_x(), self.mid_y()) }

    pub fn is_empty(&self) -> bool { self.size.width <= 0.0 || self.size.height <= 0.0 }

    pub fn offset(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.origin.x + dx, self.origin.y + dy, self.size.width, self.size.height)
    }

    /// Shrinks (or grows, for negative amounts) the rect on every side.
    pub fn inset(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(
            self.origin.x + dx,
            self.origin.y + dy,
            self.size.width - 2.0 * dx,
            self.size.height - 2.0 * dy,
        )
    }

    pub fn inset_sides(&self, top: f64, bottom: f64, leading: f64, trailing: f64) -> Rect {
        Rect::new(
            self.origin.x + leading,
            self.origin.y + top,
            self.size.width - leading - trailing,
            self.size.height - top - bottom,
        )
    }

    /// Insets only the selected `edges` by `amount`.
    pub fn padding(&self, edges: Edges, amount: f64) -> Rect {
        let side = |edge: Edges| if edges.contains(edge) { amount } else { 0.0 };
        self.inset_sides(
            side(Edges::TOP),
            side(Edges::BOTTOM),
            side(Edges::LEADING),
            side(Edges::TRAILING),
        )
    }

    /// Symmetric inset that never shrinks an axis below `min_size`. Whatever
    /// the clamp, the result keeps the original center.
    pub fn inset_clamped(&self, amount: f64, min_size: Size) -> Rect {
        let width = f64::max(min_size.width, self.size.width - 2.0 * amount);
        let height = f64::max(min_size.height, self.size.height - 2.0 * amount);
        Rect::new(self.mid_x() - width / 2.0, self.mid_y() - height / 2.0, width, height)
    }

    /// Maps a unit rect in `[0,1]` into `self`.
    pub fn scaled_unit(&self, unit: Rect) -> Rect {
        Rect::new(
            self.origin.x + self.size.width * unit.origin.x,
            self.origin.y + self.size.height * unit.origin.y,
            self.size.width * unit.size.width,
            self.size.height * unit.size.height,
        )
    }

    /// Inverse of [`Rect::scaled_unit`]. Returns `None` for an empty rect.
    pub fn unit_within(&self, outer: Rect) -> Option<Rect> {
        if outer.is_empty() {
            return None;
        }
        Some(Rect::new(
            (self.origin.x - outer.origin.x) / outer.size.width,
            (self.origin.y - outer.origin.y) / outer.size.height,
            self.size.width / outer.size.width,
            self.size.height / outer.size.height,
        ))
    }

    /// Which sides of `self` lie on the matching side of `outer`.
    pub fn edges_touching(&self, outer: Rect, tolerance: f64) -> Edges {
        let mut edges = Edges::empty();
        if self.min_y().is_within(tolerance, outer.min_y()) {
            edges |= Edges::TOP;
        }
        if self.max_y().is_within(tolerance, outer.max_y()) {
            edges |= Edges::BOTTOM;
        }
        if self.min_x().is_within(tolerance, outer.min_x()) {
            edges |= Edges::LEADING;
        }
        if self.max_x().is_within(tolerance, outer.max_x()) {
            edges |= Edges::TRAILING;
        }
        edges
    }
}

pub trait Round {
    fn round(&self) -> Self;
}

impl Round for Rect {
    fn round(&self) -> Self {
        let min = Point::new(self.min_x(), self.min_y()).round();
        let max = Point::new(self.max_x(), self.max_y()).round();
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

impl Round for Point {
    fn round(&self) -> Self { Point::new(self.x.round(), self.y.round()) }
}

impl Round for Size {
    fn round(&self) -> Self { Size::new(self.width.round(), self.height.round()) }
}

pub trait IsWithin {
    fn is_within(&self, how_much: f64, other: Self) -> bool;
}

impl IsWithin for Rect {
    fn is_within(&self, how_much: f64, other: Self) -> bool {
        self.origin.is_within(how_much, other.origin) && self.size.is_within(how_much, other.size)
    }
}

impl IsWithin for Point {
    fn is_within(&self, how_much: f64, other: Self) -> bool {
        self.x.is_within(how_much, other.x) && self.y.is_within(how_much, other.y)
    }
}

impl IsWithin for Size {
    fn is_within(&self, how_much: f64, other: Self) -> bool {
        self.width.is_within(how_much, other.width) && self.height.is_within(how_much, other.height)
    }
}

impl IsWithin for f64 {
    fn is_within(&self, how_much: f64, other: Self) -> bool { (self - other).abs() <= how_much }
}

pub trait SameAs: IsWithin + Sized {
    fn same_as(&self, other: Self) -> bool { self.is_within(0.1, other) }
}

impl SameAs for Rect {}
impl SameAs for Point {}
impl SameAs for Size {}

pub trait RectExt {
    fn intersection(&self, other: &Self) -> Self;
    fn contains(&self, point: Point) -> bool;
    fn contains_rect(&self, other: Self) -> bool;
    fn area(&self) -> f64;
}

impl RectExt for Rect {
    fn intersection(&self, other: &Self) -> Self {
        let min_x = f64::max(self.min_x(), other.min_x());
        let max_x = f64::min(self.max_x(), other.max_x());
        let min_y = f64::max(self.min_y(), other.min_y());
        let max_y = f64::min(self.max_y(), other.max_y());
        Rect::new(min_x, min_y, f64::max(max_x - min_x, 0.), f64::max(max_y - min_y, 0.))
    }

    fn contains(&self, point: Point) -> bool {
        (self.min_x()..=self.max_x()).contains(&point.x)
            && (self.min_y()..=self.max_y()).contains(&point.y)
    }

    fn contains_rect(&self, other: Self) -> bool {
        self.min_x() <= other.min_x()
            && self.min_y() <= other.min_y()
            && self.max_x() >= other.max_x()
            && self.max_y() >= other.max_y()
    }

    fn area(&self) -> f64 { self.size.width * self.size.height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_rect() {
        let rect = Rect::new(10.4, 20.7, 100.0, 200.0);
        let rounded = rect.round();
        assert_eq!(rounded.origin.x, 10.0);
        assert_eq!(rounded.origin.y, 21.0);
        // size is computed as max - min, so the far edge rounds independently
        assert_eq!(rounded.size.width, 100.0);
        assert_eq!(rounded.size.height, 200.0);
    }

    #[test]
    fn test_is_within_rect() {
        let a = Rect::new(10.0, 20.0, 100.0, 200.0);
        let b = Rect::new(10.05, 20.08, 100.03, 200.02);
        assert!(a.is_within(0.1, b));
        assert!(!a.is_within(0.01, b));
        assert!(a.same_as(b));
    }

    #[test]
    fn test_angle_to_is_clockwise_from_up() {
        let o = Point::new(100.0, 100.0);
        assert_eq!(o.angle_to(Point::new(100.0, 50.0)), 0.0);
        assert!(o.angle_to(Point::new(150.0, 100.0)).is_within(1e-9, 90.0));
        assert!(o.angle_to(Point::new(100.0, 150.0)).is_within(1e-9, 180.0));
        assert!(o.angle_to(Point::new(50.0, 100.0)).is_within(1e-9, 270.0));
        assert!(o.angle_to(Point::new(150.0, 50.0)).is_within(1e-9, 45.0));
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        assert_eq!(a.distance_to(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Rect::new(50.0, 50.0, 50.0, 50.0));

        let far = Rect::new(200.0, 200.0, 100.0, 100.0);
        assert!(a.intersection(&far).is_empty());
    }

    #[test]
    fn test_contains() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(100.0, 100.0)));
        assert!(!rect.contains(Point::new(101.0, 50.0)));
        assert!(rect.contains_rect(Rect::new(10.0, 10.0, 80.0, 80.0)));
        assert!(!rect.contains_rect(Rect::new(-10.0, -10.0, 120.0, 120.0)));
        assert_eq!(rect.area(), 10000.0);
    }

    #[test]
    fn test_padding_only_selected_edges() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            rect.padding(Edges::TOP | Edges::LEADING, 10.0),
            Rect::new(10.0, 10.0, 90.0, 90.0)
        );
        assert_eq!(rect.padding(Edges::all(), -5.0), Rect::new(-5.0, -5.0, 110.0, 110.0));
    }

    #[test]
    fn test_inset_clamped_keeps_center() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let out = rect.inset_clamped(40.0, Size::new(50.0, 50.0));
        assert_eq!(out, Rect::new(40.0, 25.0, 120.0, 50.0));
    }

    #[test]
    fn test_unit_mapping() {
        let bounds = Rect::new(100.0, 50.0, 1000.0, 800.0);
        let unit = Rect::new(0.5, 0.0, 0.5, 1.0);
        let mapped = bounds.scaled_unit(unit);
        assert_eq!(mapped, Rect::new(600.0, 50.0, 500.0, 800.0));
        assert_eq!(mapped.unit_within(bounds), Some(unit));
    }

    #[test]
    fn test_edges_touching() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let left = Rect::new(0.0, 0.0, 50.0, 100.0);
        assert_eq!(
            left.edges_touching(bounds, 0.5),
            Edges::TOP | Edges::BOTTOM | Edges::LEADING
        );
    }
}
