//! Platform-neutral input.
//!
//! The window runtime translates winit events (see [`platform`]) into
//! [`InputEvent`]s; apps read held state from [`InputState`] and this frame's
//! changes from [`InputFrame`].

mod frame;
pub mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, MouseWheelDelta,
    PointerButtonEvent,
};
