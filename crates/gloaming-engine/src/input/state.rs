use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// Held keys and buttons, pointer position and focus for one window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Logical pixels; `None` while the pointer is outside the window.
    pub pointer_pos: Option<(f32, f32)>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `ev` into the held state and records transitions in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered to unfocused windows.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((*x, *y)),
            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },

            InputEvent::PointerButton(b) => {
                self.pointer_pos = Some((b.x, b.y));
                match b.state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(b.button) {
                            frame.buttons_pressed.insert(b.button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(&b.button) {
                            frame.buttons_released.insert(b.button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel(_) => {}
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseWheelDelta, PointerButtonEvent};

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn key_transitions_recorded_once() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::Escape, KeyState::Pressed));
        st.apply_event(&mut fr, key(Key::Escape, KeyState::Pressed));
        assert!(fr.key_pressed(Key::Escape));
        assert_eq!(fr.keys_pressed.len(), 1);
        assert!(st.key_down(Key::Escape));
        st.apply_event(&mut fr, key(Key::Escape, KeyState::Released));
        assert!(!st.key_down(Key::Escape));
        assert!(fr.keys_released.contains(&Key::Escape));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::ArrowDown, KeyState::Pressed));
        st.apply_event(&mut fr, InputEvent::Focused(false));
        assert!(st.keys_down.is_empty());
    }

    #[test]
    fn frame_queries() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::MouseWheel(MouseWheelDelta::Line { x: 0.0, y: -2.0 }));
        st.apply_event(
            &mut fr,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x: 10.0,
                y: 20.0,
            }),
        );
        assert_eq!(fr.wheel().count(), 1);
        assert_eq!(fr.presses(MouseButton::Left).collect::<Vec<_>>(), vec![(10.0, 20.0)]);
        assert_eq!(st.pointer_pos, Some((10.0, 20.0)));
        fr.clear();
        assert!(fr.events.is_empty());
    }

    #[test]
    fn digits_map_to_sections() {
        assert_eq!(Key::Digit1.digit_index(), Some(0));
        assert_eq!(Key::Digit4.digit_index(), Some(3));
        assert_eq!(Key::Space.digit_index(), None);
    }
}
