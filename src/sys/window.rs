use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use super::geometry::{Rect, Size};

/// An identifier representing a window.
///
/// Handed out by the platform layer. A window that is destroyed and recreated
/// gets a new id, so history never carries over between the two.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// The id and frame of a window at the moment a placement was requested.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WindowSnapshot {
    pub id: WindowId,
    pub frame: Rect,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WindowError {
    #[error("window {0} no longer exists")]
    Gone(WindowId),
    #[error("window {id} rejected the request: {reason}")]
    Rejected { id: WindowId, reason: String },
}

/// The accessibility surface the engine needs from a window.
pub trait WindowHandle {
    fn id(&self) -> WindowId;
    fn frame(&self) -> Result<Rect, WindowError>;
    fn set_frame(&mut self, frame: Rect) -> Result<(), WindowError>;

    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), WindowError>;
    fn is_minimized(&self) -> bool;
    fn set_minimized(&mut self, minimized: bool) -> Result<(), WindowError>;
    fn is_hidden(&self) -> bool;
    fn set_hidden(&mut self, hidden: bool) -> Result<(), WindowError>;

    fn snapshot(&self) -> Result<WindowSnapshot, WindowError> {
        Ok(WindowSnapshot { id: self.id(), frame: self.frame()? })
    }
}

/// An in-memory window. Applications may clamp the frames they are given to a
/// minimum size, which is modelled by `min_size`.
#[derive(Clone, Debug)]
pub struct VirtualWindow {
    id: WindowId,
    frame: Rect,
    min_size: Size,
    fullscreen: bool,
    minimized: bool,
    hidden: bool,
    closed: bool,
    frozen: bool,
    writes: usize,
}

impl VirtualWindow {
    pub fn new(id: WindowId, frame: Rect) -> Self {
        VirtualWindow {
            id,
            frame,
            min_size: Size::default(),
            fullscreen: false,
            minimized: false,
            hidden: false,
            closed: false,
            frozen: false,
            writes: 0,
        }
    }

    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    /// Makes every subsequent frame write fail, as a window stuck in an
    /// unresponsive app would.
    pub fn freeze(&mut self) { self.frozen = true; }

    pub fn close(&mut self) { self.closed = true; }

    pub fn writes(&self) -> usize { self.writes }

    fn check_open(&self) -> Result<(), WindowError> {
        if self.closed { Err(WindowError::Gone(self.id)) } else { Ok(()) }
    }
}

impl WindowHandle for VirtualWindow {
    fn id(&self) -> WindowId { self.id }

    fn frame(&self) -> Result<Rect, WindowError> {
        self.check_open()?;
        Ok(self.frame)
    }

    fn set_frame(&mut self, frame: Rect) -> Result<(), WindowError> {
        self.check_open()?;
        if self.frozen {
            return Err(WindowError::Rejected {
                id: self.id,
                reason: "application is not responding".into(),
            });
        }
        let mut applied = frame;
        applied.size.width = f64::max(applied.size.width, self.min_size.width);
        applied.size.height = f64::max(applied.size.height, self.min_size.height);
        trace!(id = %self.id, ?frame, ?applied, "set_frame");
        self.frame = applied;
        self.writes += 1;
        Ok(())
    }

    fn is_fullscreen(&self) -> bool { self.fullscreen }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), WindowError> {
        self.check_open()?;
        self.fullscreen = fullscreen;
        Ok(())
    }

    fn is_minimized(&self) -> bool { self.minimized }

    fn set_minimized(&mut self, minimized: bool) -> Result<(), WindowError> {
        self.check_open()?;
        self.minimized = minimized;
        Ok(())
    }

    fn is_hidden(&self) -> bool { self.hidden }

    fn set_hidden(&mut self, hidden: bool) -> Result<(), WindowError> {
        self.check_open()?;
        self.hidden = hidden;
        Ok(())
    }
}
