//! Keyboard intent capture.
//!
//! Key events are folded into an [`InputIntent`] snapshot that the
//! locomotion step samples once per frame. The snapshot is last-writer-wins:
//! releasing `ArrowUp` clears `forward` even while `W` is still held, which
//! matches how the park has always handled duplicate bindings.

use bevy::input::keyboard::KeyCode;
use bevy::prelude::Resource;
use hashbrown::HashMap;

/// Boolean desires of the player, sampled from input.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Each flag mirrors one independently held key."
)]
pub struct InputIntent {
    /// Move toward -Z.
    pub forward: bool,
    /// Move toward +Z.
    pub backward: bool,
    /// Move toward -X.
    pub left: bool,
    /// Move toward +X.
    pub right: bool,
    /// Jump when grounded.
    pub jump: bool,
    /// Run instead of walk while moving.
    pub sprint: bool,
    /// Start an emote when grounded and not on cooldown.
    pub emote: bool,
}

/// Logical action a key is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Walk away from the camera.
    Forward,
    /// Walk toward the camera.
    Backward,
    /// Strafe left.
    Left,
    /// Strafe right.
    Right,
    /// Jump when grounded.
    Jump,
    /// Run while held.
    Sprint,
    /// Wave.
    Emote,
}

impl InputIntent {
    /// Records a press (`pressed == true`) or release of `action`.
    pub fn apply(&mut self, action: InputAction, pressed: bool) {
        let flag = match action {
            InputAction::Forward => &mut self.forward,
            InputAction::Backward => &mut self.backward,
            InputAction::Left => &mut self.left,
            InputAction::Right => &mut self.right,
            InputAction::Jump => &mut self.jump,
            InputAction::Sprint => &mut self.sprint,
            InputAction::Emote => &mut self.emote,
        };
        *flag = pressed;
    }

    /// Whether any horizontal movement key is held.
    #[must_use]
    pub const fn wants_to_move(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Rows of the on-screen controls legend: key label, key, description.
pub const CONTROLS_LEGEND: [(&str, KeyCode, &str); 7] = [
    ("W", KeyCode::KeyW, "Forward"),
    ("S", KeyCode::KeyS, "Backward"),
    ("A", KeyCode::KeyA, "Left"),
    ("D", KeyCode::KeyD, "Right"),
    ("Shift", KeyCode::ShiftLeft, "Sprint (hold)"),
    ("Space", KeyCode::Space, "Jump"),
    ("Enter", KeyCode::Enter, "Emote"),
];

/// Mapping from physical keys to [`InputAction`]s.
///
/// # Examples
///
/// ```
/// use bevy::input::keyboard::KeyCode;
/// use promenade::input::{InputIntent, KeyBindings};
///
/// let bindings = KeyBindings::default();
/// let mut intent = InputIntent::default();
/// bindings.handle_key(&mut intent, KeyCode::KeyW, true);
/// assert!(intent.forward);
/// // Unbound keys are ignored.
/// assert!(!bindings.handle_key(&mut intent, KeyCode::KeyQ, true));
/// ```
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<KeyCode, InputAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_pairs([
            (KeyCode::KeyW, InputAction::Forward),
            (KeyCode::ArrowUp, InputAction::Forward),
            (KeyCode::KeyS, InputAction::Backward),
            (KeyCode::ArrowDown, InputAction::Backward),
            (KeyCode::KeyA, InputAction::Left),
            (KeyCode::ArrowLeft, InputAction::Left),
            (KeyCode::KeyD, InputAction::Right),
            (KeyCode::ArrowRight, InputAction::Right),
            (KeyCode::ShiftLeft, InputAction::Sprint),
            (KeyCode::ShiftRight, InputAction::Sprint),
            (KeyCode::Space, InputAction::Jump),
            (KeyCode::Enter, InputAction::Emote),
        ])
    }
}

impl KeyBindings {
    /// Builds a binding table from `(key, action)` pairs. Later pairs win.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (KeyCode, InputAction)>) -> Self {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    /// Action bound to `key`, if any.
    #[must_use]
    pub fn action_for(&self, key: KeyCode) -> Option<InputAction> {
        self.map.get(&key).copied()
    }

    /// Applies a key event to `intent`.
    ///
    /// Returns `false` when the key is not bound and the event was ignored.
    pub fn handle_key(&self, intent: &mut InputIntent, key: KeyCode, pressed: bool) -> bool {
        let Some(action) = self.action_for(key) else {
            return false;
        };
        intent.apply(action, pressed);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::w(KeyCode::KeyW, InputAction::Forward)]
    #[case::up(KeyCode::ArrowUp, InputAction::Forward)]
    #[case::s(KeyCode::KeyS, InputAction::Backward)]
    #[case::a(KeyCode::KeyA, InputAction::Left)]
    #[case::right_arrow(KeyCode::ArrowRight, InputAction::Right)]
    #[case::shift(KeyCode::ShiftLeft, InputAction::Sprint)]
    #[case::space(KeyCode::Space, InputAction::Jump)]
    #[case::enter(KeyCode::Enter, InputAction::Emote)]
    fn default_bindings(#[case] key: KeyCode, #[case] expected: InputAction) {
        assert_eq!(KeyBindings::default().action_for(key), Some(expected));
    }

    #[test]
    fn press_then_release_clears_flag() {
        let bindings = KeyBindings::default();
        let mut intent = InputIntent::default();
        bindings.handle_key(&mut intent, KeyCode::Space, true);
        assert!(intent.jump);
        bindings.handle_key(&mut intent, KeyCode::Space, false);
        assert_eq!(intent, InputIntent::default());
    }

    #[test]
    fn last_writer_wins_across_duplicate_keys() {
        let bindings = KeyBindings::default();
        let mut intent = InputIntent::default();
        bindings.handle_key(&mut intent, KeyCode::KeyW, true);
        bindings.handle_key(&mut intent, KeyCode::ArrowUp, true);
        bindings.handle_key(&mut intent, KeyCode::ArrowUp, false);
        assert!(!intent.forward);
    }

    #[test]
    fn unbound_keys_leave_intent_untouched() {
        let bindings = KeyBindings::default();
        let mut intent = InputIntent {
            left: true,
            ..Default::default()
        };
        assert!(!bindings.handle_key(&mut intent, KeyCode::KeyZ, true));
        assert_eq!(
            intent,
            InputIntent {
                left: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn later_pairs_replace_earlier_bindings() {
        let bindings = KeyBindings::from_pairs([
            (KeyCode::KeyW, InputAction::Forward),
            (KeyCode::KeyW, InputAction::Jump),
        ]);
        assert_eq!(bindings.action_for(KeyCode::KeyW), Some(InputAction::Jump));
    }

    #[test]
    fn legend_covers_every_action_once() {
        let bindings = KeyBindings::default();
        let mut seen = Vec::new();
        for (label, key, _) in CONTROLS_LEGEND {
            let action = bindings
                .action_for(key)
                .unwrap_or_else(|| panic!("legend key {label} is unbound"));
            assert!(!seen.contains(&action), "{action:?} listed twice");
            seen.push(action);
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn wants_to_move_ignores_non_directional_flags() {
        let intent = InputIntent {
            jump: true,
            sprint: true,
            emote: true,
            ..Default::default()
        };
        assert!(!intent.wants_to_move());
    }
}
