use serde::{Deserialize, Serialize};
use tracing::trace;

use super::geometry::{Point, Rect, RectExt};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScreenId(pub u32);

/// A display in top-left origin space.
///
/// `frame` covers the whole display. `visible_frame` excludes the menu bar and
/// dock and is the area windows are placed into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenInfo {
    pub id: ScreenId,
    pub frame: Rect,
    pub visible_frame: Rect,
}

impl ScreenInfo {
    pub fn new(id: ScreenId, frame: Rect, visible_frame: Rect) -> Self {
        ScreenInfo { id, frame, visible_frame }
    }

    /// Builds a screen from bottom-left origin rects, as reported by the
    /// native display APIs.
    pub fn from_native(
        id: ScreenId,
        frame: Rect,
        visible_frame: Rect,
        converter: CoordinateConverter,
    ) -> Option<Self> {
        Some(ScreenInfo {
            id,
            frame: converter.convert_rect(frame)?,
            visible_frame: converter.convert_rect(visible_frame)?,
        })
    }
}

/// Converts between bottom-left origin and top-left origin coordinates.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateConverter {
    /// Height of the primary display. Both origins sit on that display, at its
    /// bottom-left and top-left corners respectively.
    screen_height: f64,
}

/// Creates a `CoordinateConverter` that returns None for any conversion.
impl Default for CoordinateConverter {
    fn default() -> Self { Self { screen_height: f64::NAN } }
}

impl CoordinateConverter {
    pub fn from_height(height: f64) -> Self { Self { screen_height: height } }

    /// Uses the primary (first) display of a native arrangement.
    pub fn from_primary(primary_native_frame: Rect) -> Self {
        Self::from_height(primary_native_frame.origin.y + primary_native_frame.size.height)
    }

    pub fn screen_height(&self) -> Option<f64> {
        if self.screen_height.is_nan() {
            None
        } else {
            Some(self.screen_height)
        }
    }

    pub fn convert_point(&self, point: Point) -> Option<Point> {
        if self.screen_height.is_nan() {
            return None;
        }
        Some(Point::new(point.x, self.screen_height - point.y))
    }

    /// The flip is its own inverse, so this converts in both directions.
    pub fn convert_rect(&self, rect: Rect) -> Option<Rect> {
        if self.screen_height.is_nan() {
            return None;
        }
        Some(Rect::from_parts(
            Point::new(rect.origin.x, self.screen_height - rect.max_y()),
            rect.size,
        ))
    }
}

/// Source of display geometry for the placement engine.
pub trait ScreenProvider {
    /// All displays, main display first.
    fn screens(&self) -> Vec<ScreenInfo>;

    fn main_screen(&self) -> Option<ScreenInfo> { self.screens().into_iter().next() }

    /// The display holding the largest share of `rect`, falling back to the
    /// display under its center.
    fn screen_containing(&self, rect: Rect) -> Option<ScreenInfo> {
        let screens = self.screens();
        let best = screens
            .iter()
            .map(|s| (s, s.frame.intersection(&rect).area()))
            .filter(|(_, area)| *area > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(s, _)| *s);
        best.or_else(|| self.screen_at(rect.center()))
    }

    fn screen_at(&self, point: Point) -> Option<ScreenInfo> {
        self.screens().into_iter().find(|s| s.frame.contains(point))
    }

    /// Neighbouring display in left-to-right, top-to-bottom order, wrapping
    /// around at either end.
    fn neighbour(&self, current: ScreenId, forward: bool) -> Option<ScreenInfo> {
        let mut screens = self.screens();
        if screens.len() < 2 {
            return None;
        }
        screens.sort_by(|a, b| {
            a.frame
                .min_x()
                .total_cmp(&b.frame.min_x())
                .then(a.frame.min_y().total_cmp(&b.frame.min_y()))
        });
        let idx = screens.iter().position(|s| s.id == current)?;
        let len = screens.len();
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        trace!(?current, next = ?screens[next].id, "neighbouring screen");
        Some(screens[next])
    }
}

/// A fixed display arrangement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenLayout {
    pub screens: Vec<ScreenInfo>,
}

impl ScreenLayout {
    pub fn new(screens: Vec<ScreenInfo>) -> Self { ScreenLayout { screens } }

    pub fn single(frame: Rect, visible_frame: Rect) -> Self {
        ScreenLayout::new(vec![ScreenInfo::new(ScreenId(1), frame, visible_frame)])
    }
}

impl ScreenProvider for ScreenLayout {
    fn screens(&self) -> Vec<ScreenInfo> { self.screens.clone() }
}
