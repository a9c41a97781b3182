//! Pointer position to direction classification.
//!
//! Two modes: the radial menu, which buckets the pointer's angle and distance
//! from where the trigger was pressed, and drag snapping, which looks at how
//! close a dragged window's pointer is to the edges of the screen.

use tracing::trace;

use super::direction::Direction;
use crate::common::config::{RadialMenuSettings, SnappingSettings};
use crate::sys::geometry::{Point, Rect, RectExt};

const SECTOR_DEGREES: f64 = 45.0;
const SECTOR_COUNT: i64 = 8;

// Both are kept as-is; the top edge is split in fifths and the bottom edge in
// thirds.
const TOP_OUTER_FRACTION: f64 = 1.0 / 5.0;
const BOTTOM_FRACTION: f64 = 1.0 / 3.0;
const SIDE_FRACTION: f64 = 1.0 / 3.0;

/// Classifies a pointer relative to the radial menu centred at `origin`.
///
/// Edge sectors come back as the `Cycle*` pseudo-directions; feed them through
/// [`resolve_radial`] before use.
pub fn classify_radial(origin: Point, pointer: Point, settings: &RadialMenuSettings) -> Direction {
    let distance = origin.distance_to(pointer);
    if distance < settings.dead_zone {
        return Direction::NoAction;
    }
    if distance <= settings.ring_threshold() {
        return Direction::Maximize;
    }
    let angle = origin.angle_to(pointer);
    let sector = radial_sector(angle);
    trace!(angle, distance, sector, "radial sector");
    match sector {
        0 => Direction::CycleTop,
        1 => Direction::TopRightQuarter,
        2 => Direction::CycleRight,
        3 => Direction::BottomRightQuarter,
        4 => Direction::CycleBottom,
        5 => Direction::BottomLeftQuarter,
        6 => Direction::CycleLeft,
        _ => Direction::TopLeftQuarter,
    }
}

/// Sector index in `0..8`, with sector 0 straddling straight up.
pub fn radial_sector(angle: f64) -> i64 {
    (((angle + SECTOR_DEGREES / 2.0) / SECTOR_DEGREES).floor() as i64).rem_euclid(SECTOR_COUNT)
}

/// Expands an edge pseudo-direction against the direction previously shown.
/// Anything else passes through unchanged.
pub fn resolve_radial(raw: &Direction, previous: &Direction) -> Direction {
    raw.next_in_cycle(previous)
}

/// The part of `bounds` where dragging does not snap.
pub fn ignored_frame(bounds: Rect, settings: &SnappingSettings) -> Rect {
    bounds.inset_sides(settings.top_margin, settings.margin, settings.margin, settings.margin)
}

/// Classifies a drag pointer against the screen `bounds`. `current` is the
/// direction shown for the previous pointer position.
pub fn classify_drag(
    pointer: Point,
    bounds: Rect,
    settings: &SnappingSettings,
    current: &Direction,
) -> Direction {
    let ignored = ignored_frame(bounds, settings);
    if pointer.x < ignored.min_x() {
        process_side_snap(pointer, bounds, true)
    } else if pointer.x > ignored.max_x() {
        process_side_snap(pointer, bounds, false)
    } else if pointer.y < ignored.min_y() {
        process_top_snap(pointer, bounds)
    } else if pointer.y > ignored.max_y() {
        process_bottom_snap(pointer, bounds, current)
    } else {
        Direction::NoAction
    }
}

pub fn process_side_snap(pointer: Point, bounds: Rect, leading: bool) -> Direction {
    let third = bounds.height() * SIDE_FRACTION;
    let (top, middle, bottom) = if leading {
        (Direction::TopLeftQuarter, Direction::LeftHalf, Direction::BottomLeftQuarter)
    } else {
        (Direction::TopRightQuarter, Direction::RightHalf, Direction::BottomRightQuarter)
    };
    if pointer.y < bounds.min_y() + third {
        top
    } else if pointer.y < bounds.max_y() - third {
        middle
    } else {
        bottom
    }
}

pub fn process_top_snap(pointer: Point, bounds: Rect) -> Direction {
    let outer = bounds.width() * TOP_OUTER_FRACTION;
    if pointer.x < bounds.min_x() + outer || pointer.x > bounds.max_x() - outer {
        Direction::TopHalf
    } else {
        Direction::Maximize
    }
}

/// The middle of the bottom edge extends a third that is already shown
/// instead of flipping to a half.
pub fn process_bottom_snap(pointer: Point, bounds: Rect, current: &Direction) -> Direction {
    let third = bounds.width() * BOTTOM_FRACTION;
    if pointer.x < bounds.min_x() + third {
        Direction::LeftThird
    } else if pointer.x > bounds.max_x() - third {
        Direction::RightThird
    } else {
        match current {
            Direction::LeftThird | Direction::LeftTwoThirds => Direction::LeftTwoThirds,
            Direction::RightThird | Direction::RightTwoThirds => Direction::RightTwoThirds,
            _ => Direction::BottomHalf,
        }
    }
}

/// Whether `pointer` is anywhere on `bounds`, edges included.
pub fn on_screen(pointer: Point, bounds: Rect) -> bool { bounds.contains(pointer) }
