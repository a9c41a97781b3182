pub mod action;
pub mod direction;
pub mod engine;
pub mod error;
pub mod keybinds;
pub mod resolver;
pub mod session;
pub mod snap;

pub use action::{
    Anchor, CustomFrame, CustomPosition, CustomSize, Keybind, PositionMode, SizeMode, Unit,
    WindowAction,
};
pub use direction::{Direction, DirectionKind};
pub use engine::{PlacementEngine, PlacementOutcome};
pub use error::PlacementError;
pub use keybinds::KeybindError;
pub use resolver::{FrameResolver, PlacementContext};
pub use session::{DragSession, RadialEvent, RadialSession, SessionResponse};

#[cfg(test)]
mod tests;
