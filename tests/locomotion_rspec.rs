//! Behavioural tests for player locomotion using rust-rspec.
//!
//! Drives the pure [`LocomotionController`] through walking, jumping and
//! emoting without an ECS.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use std::f32::consts::PI;

use approx::assert_abs_diff_eq;
use glam::Vec3;
use promenade::input::{InputAction, InputIntent};
use promenade::locomotion::{ControlledEntityState, LocomotionController};
use promenade::MotionState;
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use test_utils::{held, run_for};

const DT: f32 = 0.016;

/// A controller and the player it moves.
#[derive(Debug, Clone, Default)]
struct PlayerFixture {
    controller: LocomotionController,
    state: ControlledEntityState,
    /// Simulated seconds spent in the phase under test.
    elapsed: f32,
}

impl PlayerFixture {
    fn step(&mut self, intent: &InputIntent) -> f32 {
        self.controller.step(&mut self.state, intent, DT)
    }

    /// Steps with `intent` until `done` holds, recording the elapsed time.
    fn step_until(&mut self, intent: &InputIntent, done: impl Fn(&ControlledEntityState) -> bool) {
        self.elapsed = 0.0;
        for _ in 0..1_000 {
            self.elapsed += self.step(intent);
            if done(&self.state) {
                return;
            }
        }
        panic!("condition not reached after 1000 steps: {:?}", self.state);
    }
}

fn walking_and_jumping(scenario: &mut Scenario<PlayerFixture>) {
    scenario.when("forward is held for one frame", |ctx| {
        ctx.before_each(|world| {
            world.step(&held(&[InputAction::Forward]));
        });

        ctx.then("the player moves 0.064 toward -Z", |world| {
            assert_abs_diff_eq!(world.state.position.z, -0.064, epsilon = 1e-6);
            assert_abs_diff_eq!(world.state.position.x, 0.0);
        });

        ctx.then("the desired heading faces -Z", |world| {
            assert_abs_diff_eq!(world.state.target_heading.abs(), PI, epsilon = 1e-6);
            assert_eq!(world.state.motion, MotionState::Walk);
        });
    });

    scenario.when("jump is held until the player lands", |ctx| {
        ctx.before_each(|world| {
            let jump = held(&[InputAction::Jump]);
            world.step(&jump);
            assert!(!world.state.grounded, "jump should leave the ground");
            world.step_until(&InputIntent::default(), |s| s.grounded);
        });

        ctx.then("the flight lasts about twice impulse over gravity", |world| {
            // 2 * 6 / 15 = 0.8 s, less the launch frame.
            assert!(
                (0.7..0.85).contains(&world.elapsed),
                "unexpected flight time {}",
                world.elapsed
            );
        });

        ctx.then("the player rests on the ground", |world| {
            assert_eq!(world.state.position.y, 0.0);
            assert_eq!(world.state.vertical_velocity, 0.0);
        });
    });

    scenario.when("the player sprints into the arena edge", |ctx| {
        ctx.before_each(|world| {
            let dash = held(&[InputAction::Right, InputAction::Sprint]);
            run_for(&world.controller, &mut world.state, &dash, 10.0, DT);
        });

        ctx.then("the position is clamped to the bound", |world| {
            assert_eq!(world.state.position.x, promenade::ARENA_BOUND);
            assert_eq!(world.state.motion, MotionState::Run);
        });

        ctx.then("the body leans into the run", |world| {
            assert!(world.state.posture.body().lean > 0.0);
        });
    });
}

fn emoting(scenario: &mut Scenario<PlayerFixture>) {
    scenario.when("emote is pressed while moving keys are held", |ctx| {
        ctx.before_each(|world| {
            world.step(&held(&[InputAction::Emote, InputAction::Forward]));
        });

        ctx.then("the player stays put and waves", |world| {
            assert_eq!(world.state.position, Vec3::ZERO);
            assert_eq!(world.state.motion, MotionState::Emote);
            assert!(world.state.emote_cooldown);
        });
    });

    scenario.when("the emote is left to play out", |ctx| {
        ctx.before_each(|world| {
            world.step(&held(&[InputAction::Emote]));
            let walk = held(&[InputAction::Forward]);
            world.step_until(&walk, |s| s.motion != MotionState::Emote);
        });

        ctx.then("it ends after 2.2 seconds", |world| {
            assert!(world.elapsed >= 2.2 - 1e-4, "ended early at {}", world.elapsed);
            assert!(world.elapsed < 2.2 + DT, "ended late at {}", world.elapsed);
        });

        ctx.then("movement keys were ignored throughout", |world| {
            assert_eq!(world.state.position, Vec3::ZERO);
            assert_eq!(world.state.motion, MotionState::Idle);
            assert!(!world.state.emote_cooldown);
        });
    });

    scenario.when("emote is pressed in mid-air", |ctx| {
        ctx.before_each(|world| {
            world.step(&held(&[InputAction::Jump]));
            world.step(&held(&[InputAction::Emote]));
        });

        ctx.then("nothing happens until the player lands", |world| {
            assert_ne!(world.state.motion, MotionState::Emote);
            assert_eq!(world.state.emote_timer, 0.0);
        });
    });
}

#[test]
fn player_locomotion_behaviour() {
    run_serial(&rspec::given(
        "a grounded player at the origin",
        PlayerFixture::default(),
        |scenario: &mut Scenario<PlayerFixture>| {
            walking_and_jumping(scenario);
            emoting(scenario);
        },
    ));
}
