//! Fixed-step loops over the pure controllers.

use promenade::input::InputIntent;
use promenade::locomotion::{ControlledEntityState, LocomotionController};
use promenade::wander::{Crowd, RandomSource, WanderController};

/// Steps `state` with a constant `intent` for `seconds` of simulated time.
///
/// Returns the number of steps taken; a non-positive `dt` takes none.
pub fn run_for(
    controller: &LocomotionController,
    state: &mut ControlledEntityState,
    intent: &InputIntent,
    seconds: f32,
    dt: f32,
) -> usize {
    let mut elapsed = 0.0;
    let mut steps = 0;
    if dt <= 0.0 {
        return steps;
    }
    while elapsed < seconds {
        elapsed += controller.step(state, intent, dt);
        steps += 1;
    }
    steps
}

/// Steps every NPC in `crowd` for `frames` frames of `dt` seconds.
pub fn run_crowd_for<R: RandomSource>(
    crowd: &mut Crowd,
    controller: &WanderController,
    rng: &mut R,
    frames: usize,
    dt: f32,
) {
    for _ in 0..frames {
        crowd.step(controller, rng, dt);
    }
}
