//! Turns a [`Direction`] into a concrete frame.

use std::cell::Cell;
use std::marker::PhantomData;

use static_assertions::assert_not_impl_any;
use tracing::{instrument, trace};

use super::action::{Anchor, CustomFrame, CustomPosition, CustomSize, Unit, WindowAction};
use super::direction::Direction;
use crate::common::config::Settings;
use crate::model::history::WindowHistory;
use crate::sys::geometry::{Edges, IsWithin, Point, Rect, RectExt, Size};
use crate::sys::window::{WindowId, WindowSnapshot};

/// Smallest width or height a size adjustment may produce, on top of the
/// configured paddings.
const MIN_ADJUSTED_EXTENT: f64 = 100.0;

/// Mutable state shared by consecutive resolutions: the ledger, plus the
/// frame the last non-preview resolution produced.
///
/// Only ever touched through `&mut`, from one thread.
#[derive(Clone, Debug, Default)]
pub struct PlacementContext {
    pub history: WindowHistory,
    last_target_frame: Option<Rect>,
    last_target_window: Option<WindowId>,
    /// Edges chosen by the first size adjustment of a gesture.
    sides_to_adjust: Option<Edges>,
    _not_sync: PhantomData<Cell<()>>,
}

assert_not_impl_any!(PlacementContext: Sync);

#[derive(Clone, Copy, Debug)]
pub struct TargetCheckpoint {
    frame: Option<Rect>,
    window: Option<WindowId>,
    sides: Option<Edges>,
}

impl PlacementContext {
    pub fn new() -> Self { Self::default() }

    pub fn last_target_frame(&self) -> Option<Rect> { self.last_target_frame }

    /// Starts a new trigger or keyboard gesture on `window`. Size adjustments
    /// compound from its current frame from here on.
    pub fn begin_gesture(&mut self, window: Option<&WindowSnapshot>) {
        self.sides_to_adjust = None;
        self.last_target_frame = window.map(|w| w.frame);
        self.last_target_window = window.map(|w| w.id);
    }

    /// Captures the last target and the pinned edges, which a non-preview
    /// resolution overwrites.
    pub fn checkpoint(&self) -> TargetCheckpoint {
        TargetCheckpoint {
            frame: self.last_target_frame,
            window: self.last_target_window,
            sides: self.sides_to_adjust,
        }
    }

    /// Undoes a resolution whose frame never reached the window.
    pub fn rollback(&mut self, checkpoint: TargetCheckpoint) {
        trace!(?checkpoint, "rolling back last target");
        self.last_target_frame = checkpoint.frame;
        self.last_target_window = checkpoint.window;
        self.sides_to_adjust = checkpoint.sides;
    }

    /// The last target, if it belongs to `window`.
    fn last_target_for(&self, window: Option<&WindowSnapshot>) -> Option<Rect> {
        match window {
            Some(w) if self.last_target_window != Some(w.id) => None,
            _ => self.last_target_frame,
        }
    }

    fn start_frame(&self, window: Option<&WindowSnapshot>, bounds: Rect) -> Rect {
        self.last_target_for(window).or(window.map(|w| w.frame)).unwrap_or(bounds)
    }

    /// Screen edges the window sat against before it started being adjusted.
    fn settled_edges(&self, window: Option<&WindowSnapshot>) -> Edges {
        window
            .and_then(|w| self.history.record(w.id))
            .and_then(|r| {
                r.entries()
                    .map(|e| &e.direction)
                    .find(|d| !d.manipulates_existing_frame())
                    .map(Direction::edges_touching_screen)
            })
            .unwrap_or_else(Edges::empty)
    }
}

pub struct FrameResolver<'a> {
    settings: &'a Settings,
    /// Visible frame of the main display, used to scale pixel sizes when
    /// there is no window to place.
    main_screen: Option<Rect>,
}

impl<'a> FrameResolver<'a> {
    pub fn new(settings: &'a Settings, main_screen: Option<Rect>) -> Self {
        FrameResolver { settings, main_screen }
    }

    /// Resolves `action` against `bounds`, the safe area of the target
    /// screen. Previews ignore the screen padding and leave the context's
    /// last target frame alone.
    #[instrument(level = "trace", skip_all, fields(direction = ?action.direction.kind(), is_preview = is_preview))]
    pub fn resolve(
        &self,
        ctx: &mut PlacementContext,
        action: &WindowAction,
        window: Option<&WindowSnapshot>,
        bounds: Rect,
        is_preview: bool,
    ) -> Rect {
        self.resolve_direction(ctx, &action.direction, window, bounds, is_preview)
    }

    pub fn resolve_direction(
        &self,
        ctx: &mut PlacementContext,
        direction: &Direction,
        window: Option<&WindowSnapshot>,
        bounds: Rect,
        is_preview: bool,
    ) -> Rect {
        if matches!(
            direction,
            Direction::NoAction | Direction::Cycle(_) | Direction::Hide | Direction::Minimize
        ) {
            return Rect::degenerate(bounds.center());
        }

        let bounds = if is_preview { bounds } else { self.settings.padding.apply(bounds) };

        if !direction.manipulates_existing_frame() {
            ctx.sides_to_adjust = None;
        }

        let frame = self.target_frame(ctx, direction, window, bounds, is_preview);
        trace!(?frame, "resolved");

        if !is_preview {
            ctx.last_target_frame = Some(frame);
            ctx.last_target_window = window.map(|w| w.id);
        }
        frame
    }

    /// Steps shared by a direct resolution and the one an undo recurses into.
    /// `bounds` already has the screen padding removed.
    fn target_frame(
        &self,
        ctx: &mut PlacementContext,
        direction: &Direction,
        window: Option<&WindowSnapshot>,
        bounds: Rect,
        is_preview: bool,
    ) -> Rect {
        if let Some(members) = direction.edge_cycle() {
            return self.target_frame(ctx, &members[0], window, bounds, is_preview);
        }
        let frame = self.calculate(ctx, direction, window, bounds, is_preview);
        self.apply_padding(direction, frame, bounds)
    }

    fn calculate(
        &self,
        ctx: &mut PlacementContext,
        direction: &Direction,
        window: Option<&WindowSnapshot>,
        bounds: Rect,
        is_preview: bool,
    ) -> Rect {
        if let Some(unit) = direction.frame_multiplier() {
            return bounds.scaled_unit(unit);
        }

        let live = window.map(|w| w.frame).unwrap_or(Rect::degenerate(bounds.center()));

        match direction {
            Direction::Larger
            | Direction::Smaller
            | Direction::ShrinkTop
            | Direction::ShrinkBottom
            | Direction::ShrinkLeft
            | Direction::ShrinkRight
            | Direction::GrowTop
            | Direction::GrowBottom
            | Direction::GrowLeft
            | Direction::GrowRight => self.adjusted_frame(ctx, direction, window, bounds),
            Direction::MoveUp | Direction::MoveDown | Direction::MoveLeft | Direction::MoveRight => {
                self.moved_frame(ctx, direction, window, bounds)
            }
            Direction::Custom(frame) => self.custom_frame(ctx, frame, window, bounds),
            Direction::Center => {
                let size = window.map(|w| w.frame.size).unwrap_or(half_size(bounds));
                centered(bounds, size, 0.0)
            }
            Direction::MacOSCenter => {
                let size = window.map(|w| w.frame.size).unwrap_or(half_size(bounds));
                centered(bounds, size, visual_center_offset(size.height, bounds.height()))
            }
            Direction::MaximizeHeight => match window {
                Some(w) => Rect::new(w.frame.min_x(), bounds.min_y(), w.frame.width(), bounds.height()),
                None => Rect::new(
                    bounds.mid_x() - bounds.width() / 4.0,
                    bounds.min_y(),
                    bounds.width() / 2.0,
                    bounds.height(),
                ),
            },
            Direction::MaximizeWidth => match window {
                Some(w) => Rect::new(bounds.min_x(), w.frame.min_y(), bounds.width(), w.frame.height()),
                None => Rect::new(
                    bounds.min_x(),
                    bounds.mid_y() - bounds.height() / 4.0,
                    bounds.width(),
                    bounds.height() / 2.0,
                ),
            },
            Direction::Undo => {
                let target = window
                    .map(|w| ctx.history.undo_placement(w.id))
                    .unwrap_or(Direction::NoAction);
                if target.has_frame() {
                    trace!(?target, "undo");
                    self.target_frame(ctx, &target, window, bounds, is_preview)
                } else {
                    live
                }
            }
            Direction::InitialFrame => window
                .and_then(|w| ctx.history.get_initial_frame(w.id))
                .unwrap_or(live),
            // screen switches, state toggles and anything without a frame
            _ => live,
        }
    }

    fn min_adjusted_size(&self) -> Size {
        let padding = &self.settings.padding;
        let preview = self.settings.resize.preview_padding;
        Size::new(
            padding.total_horizontal() + preview + MIN_ADJUSTED_EXTENT,
            padding.total_vertical() + preview + MIN_ADJUSTED_EXTENT,
        )
    }

    fn adjusted_frame(
        &self,
        ctx: &mut PlacementContext,
        direction: &Direction,
        window: Option<&WindowSnapshot>,
        bounds: Rect,
    ) -> Rect {
        let increment = self.settings.resize.size_increment;
        let start = ctx.start_frame(window, bounds);

        let (edges, step) = match direction.pinned_edge() {
            Some((edge, grow)) => {
                ctx.sides_to_adjust = Some(edge);
                (edge, if grow { -increment } else { increment })
            }
            None => {
                let edges = match ctx.sides_to_adjust {
                    Some(edges) => edges,
                    None => {
                        let edges = Edges::all() - ctx.settled_edges(window);
                        ctx.sides_to_adjust = Some(edges);
                        edges
                    }
                };
                let step = if *direction == Direction::Larger { -increment } else { increment };
                (edges, step)
            }
        };

        let min_size = self.min_adjusted_size();
        let mut frame = if edges.is_empty() || edges == Edges::all() {
            start.inset_clamped(step, min_size)
        } else {
            let mut frame = start.padding(edges, step);
            if frame.width() < min_size.width {
                frame.size.width = min_size.width;
                frame.origin.x = start.mid_x() - min_size.width / 2.0;
            }
            if frame.height() < min_size.height {
                frame.size.height = min_size.height;
                frame.origin.y = start.mid_y() - min_size.height / 2.0;
            }
            frame
        };
        trace!(?edges, step, ?start, ?frame, "size adjustment");

        if let Some(last) = ctx.last_target_for(window) {
            if frame.is_within(self.settings.resize.tolerance, last) {
                frame = last;
            }
        }
        frame
    }

    fn moved_frame(
        &self,
        ctx: &PlacementContext,
        direction: &Direction,
        window: Option<&WindowSnapshot>,
        bounds: Rect,
    ) -> Rect {
        let step = self.settings.resize.size_increment;
        let start = ctx.start_frame(window, bounds);
        match direction {
            Direction::MoveUp => start.offset(0.0, -step),
            Direction::MoveDown => start.offset(0.0, step),
            Direction::MoveLeft => start.offset(-step, 0.0),
            Direction::MoveRight => start.offset(step, 0.0),
            _ => start,
        }
    }

    fn custom_frame(
        &self,
        ctx: &PlacementContext,
        custom: &CustomFrame,
        window: Option<&WindowSnapshot>,
        bounds: Rect,
    ) -> Rect {
        let window_size = window.map(|w| w.frame.size);
        let size = match custom.size {
            CustomSize::Custom { width, height } => match custom.unit {
                Unit::Pixels => match (window, self.main_screen) {
                    (None, Some(main)) if !main.is_empty() => Size::new(
                        width * bounds.width() / main.width(),
                        height * bounds.height() / main.height(),
                    ),
                    _ => Size::new(width, height),
                },
                Unit::Percentage => {
                    Size::new(bounds.width() * width / 100.0, bounds.height() * height / 100.0)
                }
            },
            CustomSize::Preserve => window_size.unwrap_or(bounds.size),
            CustomSize::Initial => window
                .and_then(|w| ctx.history.get_initial_frame(w.id))
                .map(|f| f.size)
                .or(window_size)
                .unwrap_or(bounds.size),
        };

        let (w, h) = (size.width, size.height);
        let origin = match custom.position {
            CustomPosition::Coordinates { x, y } => match custom.unit {
                Unit::Pixels => Point::new(bounds.min_x() + x, bounds.min_y() + y),
                Unit::Percentage => Point::new(
                    bounds.min_x() + bounds.width() * x / 100.0,
                    bounds.min_y() + bounds.height() * y / 100.0,
                ),
            },
            CustomPosition::Generic(anchor) => match anchor {
                Anchor::TopLeft => Point::new(bounds.min_x(), bounds.min_y()),
                Anchor::Top => Point::new(bounds.mid_x() - w / 2.0, bounds.min_y()),
                Anchor::TopRight => Point::new(bounds.max_x() - w, bounds.min_y()),
                Anchor::Right => Point::new(bounds.max_x() - w, bounds.mid_y() - h / 2.0),
                Anchor::BottomRight => Point::new(bounds.max_x() - w, bounds.max_y() - h),
                Anchor::Bottom => Point::new(bounds.mid_x() - w / 2.0, bounds.max_y() - h),
                Anchor::BottomLeft => Point::new(bounds.min_x(), bounds.max_y() - h),
                Anchor::Left => Point::new(bounds.min_x(), bounds.mid_y() - h / 2.0),
                Anchor::Center => centered(bounds, size, 0.0).origin,
                Anchor::MacOSCenter => {
                    centered(bounds, size, visual_center_offset(h, bounds.height())).origin
                }
            },
        };
        Rect::from_parts(origin, size)
    }

    /// Clips to `bounds`, then gives each interior side half the window gap.
    /// Sides are chosen from the direction, not from the frame.
    fn apply_padding(&self, direction: &Direction, frame: Rect, bounds: Rect) -> Rect {
        if direction.is_history() || direction.is_move() {
            return frame;
        }
        let frame = frame.intersection(&bounds);
        if direction.is_center() || direction.manipulates_existing_frame() {
            return frame;
        }
        let half_gap = self.settings.padding.window / 2.0;
        if half_gap <= 0.0 {
            return frame;
        }
        frame.padding(Edges::all() - direction.edges_touching_screen(), half_gap)
    }
}

fn half_size(bounds: Rect) -> Size { Size::new(bounds.width() / 2.0, bounds.height() / 2.0) }

fn centered(bounds: Rect, size: Size, y_offset: f64) -> Rect {
    Rect::new(
        bounds.mid_x() - size.width / 2.0,
        bounds.mid_y() - size.height / 2.0 + y_offset,
        size.width,
        size.height,
    )
}

/// Vertical shift that puts a centred window at the visual centre of the
/// screen, slightly above the geometric one. Never positive in Y-down space,
/// and zero for a window as tall as the bounds.
pub fn visual_center_offset(window_height: f64, bounds_height: f64) -> f64 {
    if bounds_height <= 0.0 {
        return 0.0;
    }
    let ratio = window_height / bounds_height;
    (0.5 * ratio - 0.5) * (bounds_height / 2.0)
}
