//! Applies window actions: expands cycles, consults the ledger, resolves the
//! frame and writes it to the window.

use tracing::{debug, instrument, trace, warn};

use super::action::WindowAction;
use super::direction::Direction;
use super::error::PlacementError;
use super::resolver::{FrameResolver, PlacementContext, TargetCheckpoint};
use crate::common::config::Settings;
use crate::model::history::WindowHistory;
use crate::sys::geometry::{Point, Rect};
use crate::sys::screen::{ScreenInfo, ScreenProvider};
use crate::sys::window::{WindowHandle, WindowId, WindowSnapshot};

#[derive(Clone, Debug, PartialEq)]
pub enum PlacementOutcome {
    /// The window was given `frame`. `direction` is what was applied after
    /// cycles were expanded.
    Applied { frame: Rect, direction: Direction },
    /// A window state was switched to `enabled`.
    Toggled { direction: Direction, enabled: bool },
    /// There was nothing to do.
    Skipped,
    /// Something failed and the window and ledger were left alone.
    Unchanged(PlacementError),
}

impl PlacementOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PlacementOutcome::Applied { .. } | PlacementOutcome::Toggled { .. })
    }
}

pub struct PlacementEngine<S: ScreenProvider> {
    screens: S,
    settings: Settings,
    ctx: PlacementContext,
}

impl<S: ScreenProvider> PlacementEngine<S> {
    pub fn new(screens: S, settings: Settings) -> Self {
        PlacementEngine {
            screens,
            settings,
            ctx: PlacementContext::new(),
        }
    }

    pub fn settings(&self) -> &Settings { &self.settings }

    pub fn update_settings(&mut self, settings: Settings) {
        debug!("placement settings updated");
        self.settings = settings;
    }

    pub fn screens(&self) -> &S { &self.screens }

    /// Display arrangements change at runtime; history is kept across them.
    pub fn screens_mut(&mut self) -> &mut S { &mut self.screens }

    pub fn history(&self) -> &WindowHistory { &self.ctx.history }

    pub fn context(&self) -> &PlacementContext { &self.ctx }

    /// The window is gone; its id will not come back.
    pub fn window_closed(&mut self, id: WindowId) { self.ctx.history.erase(id); }

    /// Marks the start of a trigger or keyboard gesture on `window`.
    pub fn begin_gesture(&mut self, window: &dyn WindowHandle) {
        let snapshot = window.snapshot().ok();
        trace!(?snapshot, "gesture started");
        self.ctx.begin_gesture(snapshot.as_ref());
    }

    fn resolver(&self) -> FrameResolver<'_> {
        FrameResolver::new(&self.settings, self.screens.main_screen().map(|s| s.visible_frame))
    }

    /// The frame `action` would produce on `screen`, without touching the
    /// window or the ledger.
    pub fn preview(
        &self,
        window: Option<WindowSnapshot>,
        action: &WindowAction,
        screen: &ScreenInfo,
    ) -> Rect {
        let last = window
            .map(|w| self.ctx.history.get_last_direction(w.id, 0, true))
            .unwrap_or(Direction::NoAction);
        let Some((action, _)) = expand(action, &last) else {
            return Rect::degenerate(screen.visible_frame.center());
        };
        let mut scratch = self.ctx.clone();
        self.resolver().resolve(&mut scratch, &action, window.as_ref(), screen.visible_frame, true)
    }

    #[instrument(level = "debug", skip_all, fields(window = %window.id(), direction = ?action.direction.kind()))]
    pub fn apply(&mut self, window: &mut dyn WindowHandle, action: &WindowAction) -> PlacementOutcome {
        match self.try_apply(window, action) {
            Ok(outcome) => {
                debug!(?outcome, "placement finished");
                outcome
            }
            Err(err) => {
                warn!(%err, "placement left the window unchanged");
                PlacementOutcome::Unchanged(err)
            }
        }
    }

    fn try_apply(
        &mut self,
        window: &mut dyn WindowHandle,
        action: &WindowAction,
    ) -> Result<PlacementOutcome, PlacementError> {
        if action.direction == Direction::NoAction {
            return Ok(PlacementOutcome::Skipped);
        }

        let id = window.id();
        let frame = window
            .frame()
            .map_err(|source| PlacementError::WindowUnavailable { id, source })?;
        let screen = self
            .screens
            .screen_containing(frame)
            .ok_or(PlacementError::ScreenUnavailable(id))?;

        if !self.ctx.history.has_record(id) {
            self.ctx.history.record_first(id, frame);
        }

        let last = self.ctx.history.get_last_direction(id, 0, true);
        let Some((action, is_cycling)) = expand(action, &last) else {
            return Ok(PlacementOutcome::Skipped);
        };
        trace!(direction = ?action.direction, is_cycling, "expanded");

        let snapshot = WindowSnapshot { id, frame };
        match &action.direction {
            Direction::NoAction => Ok(PlacementOutcome::Skipped),
            Direction::Fullscreen | Direction::Hide | Direction::Minimize => {
                self.toggle(window, &action.direction, is_cycling)
            }
            Direction::Undo => self.undo(window, snapshot, &screen),
            Direction::NextScreen => self.switch_screen(window, snapshot, &screen, true),
            Direction::PreviousScreen => self.switch_screen(window, snapshot, &screen, false),
            direction => {
                let main = self.screens.main_screen().map(|s| s.visible_frame);
                let resolver = FrameResolver::new(&self.settings, main);
                let checkpoint = self.ctx.checkpoint();
                let target =
                    resolver.resolve(&mut self.ctx, &action, Some(&snapshot), screen.visible_frame, false);
                self.write_or_rollback(window, target, &screen, checkpoint)?;
                self.ctx.history.record_direction(id, direction.clone(), is_cycling);
                Ok(PlacementOutcome::Applied { frame: target, direction: direction.clone() })
            }
        }
    }

    fn toggle(
        &mut self,
        window: &mut dyn WindowHandle,
        direction: &Direction,
        is_cycling: bool,
    ) -> Result<PlacementOutcome, PlacementError> {
        let id = window.id();
        let (enabled, result) = match direction {
            Direction::Fullscreen => {
                let enabled = !window.is_fullscreen();
                (enabled, window.set_fullscreen(enabled))
            }
            Direction::Hide => {
                let enabled = !window.is_hidden();
                (enabled, window.set_hidden(enabled))
            }
            Direction::Minimize => {
                let enabled = !window.is_minimized();
                (enabled, window.set_minimized(enabled))
            }
            other => return Err(PlacementError::NoFrame(other.clone())),
        };
        result.map_err(|source| PlacementError::StateChangeFailed {
            id,
            direction: direction.clone(),
            source,
        })?;
        self.ctx.history.record_direction(id, direction.clone(), is_cycling);
        Ok(PlacementOutcome::Toggled { direction: direction.clone(), enabled })
    }

    fn undo(
        &mut self,
        window: &mut dyn WindowHandle,
        snapshot: WindowSnapshot,
        screen: &ScreenInfo,
    ) -> Result<PlacementOutcome, PlacementError> {
        let target = self.ctx.history.undo_placement(snapshot.id);
        let checkpoint = self.ctx.checkpoint();
        let frame = if target.has_frame() {
            let main = self.screens.main_screen().map(|s| s.visible_frame);
            let resolver = FrameResolver::new(&self.settings, main);
            resolver.resolve_direction(&mut self.ctx, &target, Some(&snapshot), screen.visible_frame, false)
        } else {
            snapshot.frame
        };
        self.write_or_rollback(window, frame, screen, checkpoint)?;
        self.ctx.history.pop_direction(snapshot.id);
        Ok(PlacementOutcome::Applied { frame, direction: Direction::Undo })
    }

    fn switch_screen(
        &mut self,
        window: &mut dyn WindowHandle,
        snapshot: WindowSnapshot,
        screen: &ScreenInfo,
        forward: bool,
    ) -> Result<PlacementOutcome, PlacementError> {
        let Some(target) = self.screens.neighbour(screen.id, forward) else {
            debug!("no other screen to move to");
            return Ok(PlacementOutcome::Skipped);
        };
        let current = self.ctx.history.current_placement(snapshot.id);
        let checkpoint = self.ctx.checkpoint();
        let frame = if current.has_frame() && !current.is_history() {
            let main = self.screens.main_screen().map(|s| s.visible_frame);
            let resolver = FrameResolver::new(&self.settings, main);
            resolver.resolve_direction(&mut self.ctx, &current, Some(&snapshot), target.visible_frame, false)
        } else {
            match snapshot.frame.unit_within(screen.visible_frame) {
                Some(unit) => target.visible_frame.scaled_unit(unit),
                None => Rect::from_parts(target.visible_frame.origin, snapshot.frame.size),
            }
        };
        debug!(from = ?screen.id, to = ?target.id, ?current, ?frame, "moving to screen");
        self.write_or_rollback(window, frame, &target, checkpoint)?;
        let direction = if forward { Direction::NextScreen } else { Direction::PreviousScreen };
        Ok(PlacementOutcome::Applied { frame, direction })
    }

    /// Writes a freshly resolved frame. On failure the context forgets that
    /// frame was ever the target.
    fn write_or_rollback(
        &mut self,
        window: &mut dyn WindowHandle,
        frame: Rect,
        screen: &ScreenInfo,
        checkpoint: TargetCheckpoint,
    ) -> Result<(), PlacementError> {
        self.write_frame(window, frame, screen).inspect_err(|_| self.ctx.rollback(checkpoint))
    }

    /// Sets the frame, then nudges the window back inside `screen` if the
    /// application clamped it to a size that overflows the right or bottom
    /// edge.
    fn write_frame(
        &mut self,
        window: &mut dyn WindowHandle,
        frame: Rect,
        screen: &ScreenInfo,
    ) -> Result<(), PlacementError> {
        let id = window.id();
        window
            .set_frame(frame)
            .map_err(|source| PlacementError::SetFrameFailed { id, source })?;

        let live = match window.frame() {
            Ok(live) => live,
            Err(err) => {
                warn!(%id, %err, "could not read back the frame");
                return Ok(());
            }
        };
        let fitted = fit_inside(live, screen.visible_frame);
        if fitted != live {
            debug!(%id, ?live, ?fitted, "window overflows its screen, shifting");
            if let Err(err) = window.set_frame(fitted) {
                warn!(%id, %err, "could not shift the window back on screen");
            }
        }
        Ok(())
    }

    /// Restores the pre-placement size of a window the user started dragging,
    /// keeping the grabbed point under `pointer`, and forgets its history.
    /// Returns the new frame when the window was resized.
    pub fn restore_on_drag(&mut self, window: &mut dyn WindowHandle, pointer: Point) -> Option<Rect> {
        if !self.settings.restore_frame_on_drag {
            return None;
        }
        let id = window.id();
        let initial = self.ctx.history.get_initial_frame(id)?;
        let placed = self.ctx.history.current_placement(id) != Direction::InitialFrame;
        self.ctx.history.erase(id);
        if !placed {
            return None;
        }

        let live = window.frame().ok()?;
        let grab = if live.width() > 0.0 { (pointer.x - live.min_x()) / live.width() } else { 0.5 };
        let frame = Rect::new(
            pointer.x - grab * initial.width(),
            live.min_y(),
            initial.width(),
            initial.height(),
        );
        match window.set_frame(frame) {
            Ok(()) => {
                debug!(%id, ?frame, "restored size on drag");
                Some(frame)
            }
            Err(err) => {
                warn!(%id, %err, "could not restore size on drag");
                None
            }
        }
    }
}

/// Shifts `frame` left and up until its right and bottom edges are inside
/// `bounds`, never past the top-left corner. Size is kept.
pub fn fit_inside(frame: Rect, bounds: Rect) -> Rect {
    let mut fitted = frame;
    if frame.max_x() > bounds.max_x() {
        fitted.origin.x = f64::max(bounds.min_x(), bounds.max_x() - frame.width());
    }
    if frame.max_y() > bounds.max_y() {
        fitted.origin.y = f64::max(bounds.min_y(), bounds.max_y() - frame.height());
    }
    fitted
}

/// Replaces cycles with the member to apply next, given the direction the
/// window is currently in. The flag is set when that advances an ongoing
/// cycle. Returns `None` for an empty cycle.
pub fn expand(action: &WindowAction, last: &Direction) -> Option<(WindowAction, bool)> {
    match &action.direction {
        Direction::Cycle(children) => {
            let first = children.first()?;
            let current = children.iter().position(|c| c.direction == *last);
            match current {
                Some(idx) => {
                    let next = &children[(idx + 1) % children.len()];
                    expand(next, last).map(|(action, _)| (action, true))
                }
                None => expand(first, last),
            }
        }
        direction => match direction.edge_cycle() {
            Some(members) => {
                let next = direction.next_in_cycle(last);
                let is_cycling = members.contains(last);
                Some((WindowAction { direction: next, ..action.clone() }, is_cycling))
            }
            None => Some((action.clone(), false)),
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;
    use crate::sys::geometry::Size;
    use crate::sys::screen::{ScreenId, ScreenLayout};
    use crate::sys::window::VirtualWindow;

    const W: WindowId = WindowId(3);

    fn screen() -> Rect { Rect::new(0.0, 0.0, 1000.0, 800.0) }

    fn engine() -> PlacementEngine<ScreenLayout> {
        PlacementEngine::new(ScreenLayout::single(screen(), screen()), Settings::default())
    }

    fn window() -> VirtualWindow { VirtualWindow::new(W, Rect::new(100.0, 100.0, 400.0, 300.0)) }

    fn applied_frame(outcome: PlacementOutcome) -> Rect {
        match outcome {
            PlacementOutcome::Applied { frame, .. } => frame,
            other => panic!("expected a frame, got {other:?}"),
        }
    }

    #[test]
    fn no_action_is_skipped_without_recording() {
        let mut e = engine();
        let mut w = window();
        assert_eq!(e.apply(&mut w, &WindowAction::new(Direction::NoAction)), PlacementOutcome::Skipped);
        assert!(!e.history().has_record(W));
        assert_eq!(w.writes(), 0);
    }

    #[test]
    fn first_placement_records_initial_frame() {
        let mut e = engine();
        let mut w = window();
        let frame = applied_frame(e.apply(&mut w, &WindowAction::new(Direction::LeftHalf)));
        assert_eq!(frame, Rect::new(0.0, 0.0, 500.0, 800.0));
        assert_eq!(w.frame().unwrap(), frame);
        assert_eq!(e.history().get_initial_frame(W), Some(Rect::new(100.0, 100.0, 400.0, 300.0)));
        assert_eq!(e.history().get_last_direction(W, 0, false), Direction::LeftHalf);
    }

    #[test]
    fn failed_write_is_not_recorded() {
        let mut e = engine();
        let mut w = window();
        w.freeze();
        let outcome = e.apply(&mut w, &WindowAction::new(Direction::Maximize));
        assert!(matches!(outcome, PlacementOutcome::Unchanged(PlacementError::SetFrameFailed { .. })));
        assert_eq!(e.history().get_last_direction(W, 0, true), Direction::InitialFrame);
        assert_eq!(w.frame().unwrap(), Rect::new(100.0, 100.0, 400.0, 300.0));
    }

    #[test]
    fn failed_write_does_not_move_the_adjustment_start() {
        let mut e = engine();
        let mut w = window();
        e.begin_gesture(&w);
        let mut stuck = w.clone();
        stuck.freeze();
        let outcome = e.apply(&mut stuck, &WindowAction::new(Direction::Larger));
        assert!(matches!(outcome, PlacementOutcome::Unchanged(PlacementError::SetFrameFailed { .. })));
        assert_eq!(e.context().last_target_frame(), Some(Rect::new(100.0, 100.0, 400.0, 300.0)));

        let frame = applied_frame(e.apply(&mut w, &WindowAction::new(Direction::Larger)));
        assert_eq!(frame, Rect::new(80.0, 80.0, 440.0, 340.0));
    }

    #[test]
    fn failed_undo_keeps_history_and_target() {
        let mut e = engine();
        let mut w = window();
        e.apply(&mut w, &WindowAction::new(Direction::LeftHalf));
        e.begin_gesture(&w);
        let mut stuck = w.clone();
        stuck.freeze();
        let outcome = e.apply(&mut stuck, &WindowAction::new(Direction::Undo));
        assert!(matches!(outcome, PlacementOutcome::Unchanged(PlacementError::SetFrameFailed { .. })));
        assert_eq!(e.history().get_last_direction(W, 0, false), Direction::LeftHalf);
        assert_eq!(e.context().last_target_frame(), Some(Rect::new(0.0, 0.0, 500.0, 800.0)));
    }

    #[test]
    fn closed_window_is_unavailable() {
        let mut e = engine();
        let mut w = window();
        w.close();
        let outcome = e.apply(&mut w, &WindowAction::new(Direction::Maximize));
        assert!(matches!(outcome, PlacementOutcome::Unchanged(PlacementError::WindowUnavailable { .. })));
        assert!(!e.history().has_record(W));
    }

    #[test]
    fn missing_screen_writes_nothing() {
        let mut e = PlacementEngine::new(ScreenLayout::default(), Settings::default());
        let mut w = window();
        let outcome = e.apply(&mut w, &WindowAction::new(Direction::Maximize));
        assert_eq!(outcome, PlacementOutcome::Unchanged(PlacementError::ScreenUnavailable(W)));
        assert!(!e.history().has_record(W));
        assert_eq!(w.writes(), 0);
    }

    #[test]
    fn cycle_walks_its_children() {
        let mut e = engine();
        let mut w = window();
        let cycle = WindowAction::cycle(vec![
            WindowAction::new(Direction::LeftHalf),
            WindowAction::new(Direction::LeftThird),
            WindowAction::new(Direction::LeftTwoThirds),
        ]);

        let directions: Vec<Direction> = (0..4)
            .map(|_| match e.apply(&mut w, &cycle) {
                PlacementOutcome::Applied { direction, .. } => direction,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            directions,
            vec![Direction::LeftHalf, Direction::LeftThird, Direction::LeftTwoThirds, Direction::LeftHalf]
        );
        assert!(e.history().is_cycling(W));
        assert_eq!(e.history().get_last_direction(W, 0, false), Direction::LeftHalf);
    }

    #[test]
    fn empty_cycle_is_skipped() {
        let mut e = engine();
        let mut w = window();
        assert_eq!(e.apply(&mut w, &WindowAction::cycle(vec![])), PlacementOutcome::Skipped);
    }

    #[test]
    fn edge_cycle_advances_from_the_ledger() {
        let mut e = engine();
        let mut w = window();
        let top = WindowAction::new(Direction::CycleTop);
        assert_eq!(applied_frame(e.apply(&mut w, &top)), Rect::new(0.0, 0.0, 1000.0, 400.0));
        let third = applied_frame(e.apply(&mut w, &top));
        assert_eq!(third.height().round(), 267.0);
        assert!(e.history().is_cycling(W));
    }

    #[test]
    fn toggles_are_recorded() {
        let mut e = engine();
        let mut w = window();
        assert_eq!(
            e.apply(&mut w, &WindowAction::new(Direction::Minimize)),
            PlacementOutcome::Toggled { direction: Direction::Minimize, enabled: true }
        );
        assert!(w.is_minimized());
        assert_eq!(e.history().get_last_direction(W, 0, false), Direction::Minimize);
        assert_eq!(
            e.apply(&mut w, &WindowAction::new(Direction::Fullscreen)),
            PlacementOutcome::Toggled { direction: Direction::Fullscreen, enabled: true }
        );
        assert!(w.is_fullscreen());
        assert_eq!(w.writes(), 0);
    }

    #[test]
    fn undo_returns_to_previous_placement() {
        let mut e = engine();
        let mut w = window();
        e.apply(&mut w, &WindowAction::new(Direction::LeftHalf));
        e.apply(&mut w, &WindowAction::new(Direction::RightHalf));

        let undo = WindowAction::new(Direction::Undo);
        assert_eq!(applied_frame(e.apply(&mut w, &undo)), Rect::new(0.0, 0.0, 500.0, 800.0));
        assert_eq!(e.history().get_last_direction(W, 0, false), Direction::LeftHalf);
        assert_eq!(applied_frame(e.apply(&mut w, &undo)), Rect::new(100.0, 100.0, 400.0, 300.0));
        assert_eq!(e.history().get_last_direction(W, 0, false), Direction::InitialFrame);
        assert_eq!(applied_frame(e.apply(&mut w, &undo)), Rect::new(100.0, 100.0, 400.0, 300.0));
    }

    #[test]
    fn overflowing_window_is_shifted_back() {
        let mut e = engine();
        let mut w = window().with_min_size(Size::new(600.0, 500.0));
        let frame = applied_frame(e.apply(&mut w, &WindowAction::new(Direction::BottomRightQuarter)));
        assert_eq!(frame, Rect::new(500.0, 400.0, 500.0, 400.0));
        assert_eq!(w.frame().unwrap(), Rect::new(400.0, 300.0, 600.0, 500.0));
    }

    #[test]
    fn next_screen_reapplies_current_direction() {
        let left = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let right = Rect::new(1000.0, 0.0, 1600.0, 1000.0);
        let layout = ScreenLayout::new(vec![
            ScreenInfo::new(ScreenId(1), left, left),
            ScreenInfo::new(ScreenId(2), right, right),
        ]);
        let mut e = PlacementEngine::new(layout, Settings::default());
        let mut w = window();
        e.apply(&mut w, &WindowAction::new(Direction::LeftHalf));

        let frame = applied_frame(e.apply(&mut w, &WindowAction::new(Direction::NextScreen)));
        assert_eq!(frame, Rect::new(1000.0, 0.0, 800.0, 1000.0));
        assert_eq!(e.history().get_last_direction(W, 0, false), Direction::LeftHalf);

        let back = applied_frame(e.apply(&mut w, &WindowAction::new(Direction::PreviousScreen)));
        assert_eq!(back, Rect::new(0.0, 0.0, 500.0, 800.0));
    }

    #[test]
    fn next_screen_maps_unplaced_window_proportionally() {
        let left = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let right = Rect::new(1000.0, 0.0, 2000.0, 1600.0);
        let layout = ScreenLayout::new(vec![
            ScreenInfo::new(ScreenId(1), left, left),
            ScreenInfo::new(ScreenId(2), right, right),
        ]);
        let mut e = PlacementEngine::new(layout, Settings::default());
        let mut w = window();
        let frame = applied_frame(e.apply(&mut w, &WindowAction::new(Direction::NextScreen)));
        assert_eq!(frame, Rect::new(1200.0, 200.0, 800.0, 600.0));
    }

    #[test]
    fn single_screen_switch_is_skipped() {
        let mut e = engine();
        let mut w = window();
        assert_eq!(e.apply(&mut w, &WindowAction::new(Direction::NextScreen)), PlacementOutcome::Skipped);
    }

    #[test]
    fn size_adjustments_compound_within_a_gesture() {
        let mut e = engine();
        let mut w = window();
        e.begin_gesture(&w);
        let larger = WindowAction::new(Direction::Larger);
        assert_eq!(applied_frame(e.apply(&mut w, &larger)), Rect::new(80.0, 80.0, 440.0, 340.0));
        assert_eq!(applied_frame(e.apply(&mut w, &larger)), Rect::new(60.0, 60.0, 480.0, 380.0));
        let smaller = WindowAction::new(Direction::Smaller);
        assert_eq!(applied_frame(e.apply(&mut w, &smaller)), Rect::new(80.0, 80.0, 440.0, 340.0));
    }

    #[test]
    fn preview_does_not_mutate() {
        let mut e = engine();
        let mut w = window();
        e.apply(&mut w, &WindowAction::new(Direction::LeftHalf));
        let before = e.context().clone();
        let screen = e.screens().main_screen().unwrap();
        let snapshot = w.snapshot().unwrap();

        let preview = e.preview(Some(snapshot), &WindowAction::new(Direction::CycleLeft), &screen);
        assert_eq!(preview.width().round(), 333.0);
        assert_eq!(e.context().last_target_frame(), before.last_target_frame());
        assert_eq!(e.history().get_last_direction(W, 0, true), Direction::LeftHalf);
        assert_eq!(w.writes(), 1);
    }

    #[test]
    fn restore_on_drag_brings_back_initial_size() {
        let mut e = engine();
        let mut w = window();
        e.apply(&mut w, &WindowAction::new(Direction::Maximize));
        let restored = e.restore_on_drag(&mut w, Point::new(500.0, 10.0)).unwrap();
        assert_eq!(restored, Rect::new(300.0, 0.0, 400.0, 300.0));
        assert!(!e.history().has_record(W));
        assert_eq!(e.restore_on_drag(&mut w, Point::new(500.0, 10.0)), None);
    }

    #[test]
    fn restore_on_drag_respects_setting() {
        let mut settings = Settings::default();
        settings.restore_frame_on_drag = false;
        let mut e = PlacementEngine::new(ScreenLayout::single(screen(), screen()), settings);
        let mut w = window();
        e.apply(&mut w, &WindowAction::new(Direction::Maximize));
        assert_eq!(e.restore_on_drag(&mut w, Point::new(500.0, 10.0)), None);
        assert!(e.history().has_record(W));
    }

    #[test]
    fn fit_inside_keeps_size() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(fit_inside(Rect::new(80.0, 90.0, 50.0, 20.0), bounds), Rect::new(50.0, 80.0, 50.0, 20.0));
        assert_eq!(fit_inside(Rect::new(10.0, 10.0, 150.0, 20.0), bounds), Rect::new(0.0, 10.0, 150.0, 20.0));
        assert_eq!(fit_inside(Rect::new(-10.0, 0.0, 50.0, 50.0), bounds), Rect::new(-10.0, 0.0, 50.0, 50.0));
    }
}
