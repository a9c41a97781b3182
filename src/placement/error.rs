use thiserror::Error;

use super::direction::Direction;
use crate::sys::window::{WindowError, WindowId};

/// Reasons a placement left the window untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlacementError {
    #[error("could not read the frame of {id}: {source}")]
    WindowUnavailable {
        id: WindowId,
        #[source]
        source: WindowError,
    },
    #[error("no screen found for {0}")]
    ScreenUnavailable(WindowId),
    #[error("setting the frame of {id} failed: {source}")]
    SetFrameFailed {
        id: WindowId,
        #[source]
        source: WindowError,
    },
    #[error("{direction:?} could not be applied to {id}: {source}")]
    StateChangeFailed {
        id: WindowId,
        direction: Direction,
        #[source]
        source: WindowError,
    },
    #[error("{0:?} does not describe a frame")]
    NoFrame(Direction),
}
