//! Lifecycle tests for wandering NPCs.

use std::f32::consts::PI;

use approx::assert_abs_diff_eq;
use glam::Vec2;
use promenade::wander::{Crowd, NpcState, WanderController, WanderPhase};
use promenade::{MotionState, WANDER_BOUND};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::{fixture, rstest};
use test_utils::{run_crowd_for, ScriptedRandom};

const DT: f32 = 0.1;

#[fixture]
fn controller() -> WanderController {
    WanderController::default()
}

/// Steps `npc` until its phase changes and returns the time taken.
fn time_until_phase_change(
    controller: &WanderController,
    npc: &mut NpcState,
    rng: &mut ScriptedRandom,
) -> f32 {
    let start = npc.phase;
    let mut elapsed = 0.0;
    for _ in 0..1_000 {
        elapsed += controller.step(npc, rng, DT);
        if npc.phase != start {
            return elapsed;
        }
    }
    panic!("phase never left {start:?}");
}

#[rstest]
fn first_npc_of_the_park_idles_for_one_second() {
    let crowd = Crowd::park();
    let first = crowd.iter().next().expect("park crowd is populated");
    assert_eq!(first.state.phase, WanderPhase::Idle);
    assert_abs_diff_eq!(first.state.timer, 1.0);
    assert_eq!(first.state.phase.motion(), MotionState::Idle);
}

#[rstest]
fn non_emote_roll_sets_off_toward_a_target(controller: WanderController) {
    let mut npc = NpcState::spawn(Vec2::ZERO, 0);
    // No emote, a quarter turn, half the wander radius.
    let mut rng = ScriptedRandom::new([0.9, 0.25, 0.5]);

    let waited = time_until_phase_change(&controller, &mut npc, &mut rng);

    assert!(waited >= 1.0 - 1e-4, "left idle after only {waited}s");
    assert_eq!(npc.phase, WanderPhase::Walking);
    assert_abs_diff_eq!(npc.target.x, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(npc.target.y, 12.0, epsilon = 1e-4);
    assert!(npc.target.abs().max_element() <= WANDER_BOUND);
}

#[rstest]
fn emote_roll_waves_then_idles_again(controller: WanderController) {
    let mut npc = NpcState::spawn(Vec2::new(4.0, 4.0), 0);
    // Emote, then the shortest idle.
    let mut rng = ScriptedRandom::new([0.1, 0.0]);

    time_until_phase_change(&controller, &mut npc, &mut rng);
    assert_eq!(npc.phase, WanderPhase::Emote);
    assert_eq!(npc.phase.motion(), MotionState::Emote);

    let waved = time_until_phase_change(&controller, &mut npc, &mut rng);
    assert!((2.2 - 1e-4..2.2 + 2.0 * DT).contains(&waved), "waved for {waved}s");
    assert_eq!(npc.phase, WanderPhase::Idle);
    assert_abs_diff_eq!(npc.timer, 1.5);
    assert_eq!(npc.position, Vec2::new(4.0, 4.0));
}

#[rstest]
fn walker_arrives_and_faces_its_direction_of_travel(controller: WanderController) {
    let mut npc = NpcState::spawn(Vec2::ZERO, 0);
    // Walk a half turn (toward -X) for the minimum distance, then idle.
    let mut rng = ScriptedRandom::new([0.9, 0.5, 0.0, 0.0]);

    time_until_phase_change(&controller, &mut npc, &mut rng);
    assert_eq!(npc.phase, WanderPhase::Walking);
    let target = npc.target;
    assert_abs_diff_eq!(target.x, -3.0, epsilon = 1e-4);

    time_until_phase_change(&controller, &mut npc, &mut rng);
    assert_eq!(npc.phase, WanderPhase::Idle);
    assert!(npc.position.distance(target) < controller.settings.arrive_threshold);
    // Facing -X is a heading of -π/2.
    assert_abs_diff_eq!(npc.target_heading, -PI / 2.0, epsilon = 1e-4);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(42)]
fn seeded_crowd_stays_inside_the_wander_bound(controller: WanderController, #[case] seed: u64) {
    let mut crowd = Crowd::park();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    run_crowd_for(&mut crowd, &controller, &mut rng, 3_000, 1.0 / 30.0);

    for npc in crowd.iter() {
        let position = npc.state.position;
        assert!(
            position.abs().max_element() <= WANDER_BOUND + 1e-3,
            "npc {} escaped to {position:?}",
            npc.id.0
        );
        assert!(npc.state.heading > -PI && npc.state.heading <= PI);
        assert!(npc.state.timer >= 0.0);
    }
}

#[rstest]
fn same_seed_replays_the_same_crowd(controller: WanderController) {
    let mut a = Crowd::park();
    let mut b = Crowd::park();
    let mut rng_a = ChaCha8Rng::seed_from_u64(9);
    let mut rng_b = ChaCha8Rng::seed_from_u64(9);

    run_crowd_for(&mut a, &controller, &mut rng_a, 500, 1.0 / 60.0);
    run_crowd_for(&mut b, &controller, &mut rng_b, 500, 1.0 / 60.0);

    assert_eq!(a, b);
}
