//! Builders for [`InputIntent`] snapshots.

use promenade::input::{InputAction, InputIntent};

/// Intent with every action in `actions` held and everything else released.
///
/// # Examples
/// ```
/// use promenade::input::InputAction;
/// use test_utils::held;
/// let intent = held(&[InputAction::Forward, InputAction::Sprint]);
/// assert!(intent.forward && intent.sprint && !intent.jump);
/// ```
#[must_use]
pub fn held(actions: &[InputAction]) -> InputIntent {
    let mut intent = InputIntent::default();
    for action in actions {
        intent.apply(*action, true);
    }
    intent
}
