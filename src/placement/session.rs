//! Event sequencing for the two interactive gestures: holding the trigger key
//! with the radial menu open, and dragging a window towards a screen edge.
//!
//! Sessions only decide which action is selected. Applying it is left to the
//! caller, through [`PlacementEngine`](super::engine::PlacementEngine).

use tracing::{debug, trace};

use super::action::WindowAction;
use super::direction::Direction;
use super::snap::{classify_drag, classify_radial, on_screen, resolve_radial};
use crate::common::config::{RadialMenuSettings, SnappingSettings};
use crate::sys::geometry::{Point, Rect};
use crate::sys::window::{WindowId, WindowSnapshot};

#[derive(Clone, Debug)]
pub enum RadialEvent {
    /// The trigger key went down with the pointer at `origin`. `window` is the
    /// window that would be placed, if there is one.
    Open { origin: Point, window: Option<WindowId> },
    PointerMoved(Point),
    /// Step to the next member of the edge cycle under the pointer.
    Advance,
    /// A bound key was pressed while the trigger is held.
    Select(WindowAction),
    /// The trigger key was released.
    Close,
    Escape,
    /// Ends the session without placing anything, whatever is selected.
    ForceClose,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionResponse {
    /// The event does not apply in the current state.
    Ignored,
    Unchanged,
    /// A different action is now selected and should be previewed.
    Changed(WindowAction),
    /// The session ended with this action selected for `window`.
    Commit { window: Option<WindowId>, action: WindowAction },
    /// The session ended without a placement.
    Discarded,
}

#[derive(Clone, Debug)]
struct ActiveRadial {
    origin: Point,
    window: Option<WindowId>,
    /// Last classification before cycle expansion.
    raw: Direction,
    selection: WindowAction,
}

#[derive(Clone, Debug)]
pub struct RadialSession {
    active: Option<ActiveRadial>,
    settings: RadialMenuSettings,
}

impl Default for RadialSession {
    fn default() -> Self { Self::new(RadialMenuSettings::default()) }
}

impl RadialSession {
    pub fn new(settings: RadialMenuSettings) -> Self { RadialSession { active: None, settings } }

    pub fn is_active(&self) -> bool { self.active.is_some() }

    pub fn selection(&self) -> Option<&WindowAction> { self.active.as_ref().map(|a| &a.selection) }

    pub fn update_settings(&mut self, settings: RadialMenuSettings) { self.settings = settings; }

    pub fn handle_event(&mut self, event: RadialEvent) -> SessionResponse {
        trace!(?event, active = self.is_active(), "radial event");
        match event {
            RadialEvent::Open { origin, window } => {
                if self.active.is_some() {
                    return SessionResponse::Ignored;
                }
                self.active = Some(ActiveRadial {
                    origin,
                    window,
                    raw: Direction::NoAction,
                    selection: WindowAction::new(Direction::NoAction),
                });
                debug!(?origin, ?window, "radial menu opened");
                SessionResponse::Unchanged
            }
            RadialEvent::PointerMoved(pointer) => {
                let Some(active) = self.active.as_mut() else {
                    return SessionResponse::Ignored;
                };
                let raw = classify_radial(active.origin, pointer, &self.settings);
                if raw == active.raw {
                    return SessionResponse::Unchanged;
                }
                let direction = resolve_radial(&raw, &active.selection.direction);
                active.raw = raw;
                active.selection = WindowAction::new(direction);
                SessionResponse::Changed(active.selection.clone())
            }
            RadialEvent::Advance => {
                let Some(active) = self.active.as_mut() else {
                    return SessionResponse::Ignored;
                };
                if active.raw.edge_cycle().is_none() {
                    return SessionResponse::Unchanged;
                }
                let direction = active.raw.next_in_cycle(&active.selection.direction);
                active.selection = WindowAction::new(direction);
                SessionResponse::Changed(active.selection.clone())
            }
            RadialEvent::Select(action) => {
                let Some(active) = self.active.as_mut() else {
                    return SessionResponse::Ignored;
                };
                active.selection = action;
                SessionResponse::Changed(active.selection.clone())
            }
            RadialEvent::Close | RadialEvent::Escape => {
                let Some(active) = self.active.take() else {
                    return SessionResponse::Ignored;
                };
                if active.window.is_none() || active.selection.direction == Direction::NoAction {
                    debug!("radial menu closed without a selection");
                    return SessionResponse::Discarded;
                }
                debug!(direction = ?active.selection.direction.kind(), "radial menu committed");
                SessionResponse::Commit { window: active.window, action: active.selection }
            }
            RadialEvent::ForceClose => match self.active.take() {
                Some(_) => {
                    debug!("radial menu force closed");
                    SessionResponse::Discarded
                }
                None => SessionResponse::Ignored,
            },
        }
    }
}

/// Tracks one window drag and the snap direction under the pointer.
#[derive(Clone, Debug)]
pub struct DragSession {
    dragged: Option<WindowSnapshot>,
    current: Direction,
    settings: SnappingSettings,
}

impl Default for DragSession {
    fn default() -> Self { Self::new(SnappingSettings::default()) }
}

impl DragSession {
    pub fn new(settings: SnappingSettings) -> Self {
        DragSession {
            dragged: None,
            current: Direction::NoAction,
            settings,
        }
    }

    /// Starts tracking `window`. A drag of another window replaces the
    /// previous one.
    pub fn begin(&mut self, window: WindowSnapshot) {
        if self.dragged.map(|w| w.id) != Some(window.id) {
            debug!(id = %window.id, "drag started");
            self.dragged = Some(window);
            self.current = Direction::NoAction;
        }
    }

    /// Re-classifies the pointer. Returns the new direction when it changed.
    pub fn pointer_moved(&mut self, pointer: Point, bounds: Rect) -> Option<Direction> {
        if self.dragged.is_none() || !self.settings.enabled {
            return None;
        }
        let next = if on_screen(pointer, bounds) {
            classify_drag(pointer, bounds, &self.settings, &self.current)
        } else {
            Direction::NoAction
        };
        if next == self.current {
            return None;
        }
        trace!(from = ?self.current, to = ?next, "snap direction changed");
        self.current = next.clone();
        Some(next)
    }

    /// Ends the drag, returning the direction to apply if there is one.
    pub fn end(&mut self) -> Option<(WindowSnapshot, Direction)> {
        let dragged = self.dragged.take()?;
        let direction = std::mem::replace(&mut self.current, Direction::NoAction);
        if direction == Direction::NoAction {
            return None;
        }
        debug!(id = %dragged.id, ?direction, "drag committed");
        Some((dragged, direction))
    }

    pub fn cancel(&mut self) {
        self.dragged = None;
        self.current = Direction::NoAction;
    }

    pub fn dragged(&self) -> Option<WindowSnapshot> { self.dragged }

    pub fn current(&self) -> &Direction { &self.current }

    pub fn update_settings(&mut self, settings: SnappingSettings) { self.settings = settings; }
}
