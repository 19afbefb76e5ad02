use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton, MouseButtonState, MouseWheelDelta};

/// What changed during one frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,

    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Wheel deltas of this frame, in arrival order.
    pub fn wheel(&self) -> impl Iterator<Item = MouseWheelDelta> + '_ {
        self.events.iter().filter_map(|ev| match ev {
            InputEvent::MouseWheel(d) => Some(*d),
            _ => None,
        })
    }

    /// Positions at which `button` went down this frame.
    pub fn presses(&self, button: MouseButton) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.events.iter().filter_map(move |ev| match ev {
            InputEvent::PointerButton(b) if b.button == button && b.state == MouseButtonState::Pressed => {
                Some((b.x, b.y))
            }
            _ => None,
        })
    }
}
