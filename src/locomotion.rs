//! Player locomotion: intent in, transform and motion state out.
//!
//! [`LocomotionController::step`] runs once per rendered frame. It is a total
//! function over its inputs: oversized or negative frame deltas are clamped,
//! positions saturate at the arena edge and the avatar never sinks below the
//! ground plane.

use glam::{Vec2, Vec3};
use log::{debug, trace};
use serde::Deserialize;

use crate::animation::MotionState;
use crate::input::InputIntent;
use crate::posture::{Posture, PostureSettings};
use crate::vector_math::{heading_from_direction, planar_normalize, smooth_heading};
use crate::{
    ARENA_BOUND, EMOTE_DURATION, GRAVITY, JUMP_IMPULSE, MAX_DELTA_SECONDS,
    PLAYER_ROTATION_SPEED, RUN_SPEED, WALK_SPEED,
};

/// Tunables for the player avatar.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocomotionSettings {
    /// Planar speed while walking, in units per second.
    pub walk_speed: f32,
    /// Planar speed while sprinting.
    pub run_speed: f32,
    /// Upward velocity applied on the jump frame.
    pub jump_impulse: f32,
    /// Vertical acceleration; negative pulls toward the ground.
    pub gravity: f32,
    /// Heading convergence rate, see [`smooth_heading`].
    pub rotation_speed: f32,
    /// Half-extent of the square the avatar is confined to.
    pub arena_bound: f32,
    /// Seconds an emote locks the avatar in place.
    pub emote_duration: f32,
    /// Frame deltas above this are clamped before integrating.
    pub max_delta_seconds: f32,
    /// When false, the sprint key is ignored and the avatar only walks.
    pub allow_sprint: bool,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            run_speed: RUN_SPEED,
            jump_impulse: JUMP_IMPULSE,
            gravity: GRAVITY,
            rotation_speed: PLAYER_ROTATION_SPEED,
            arena_bound: ARENA_BOUND,
            emote_duration: EMOTE_DURATION,
            max_delta_seconds: MAX_DELTA_SECONDS,
            allow_sprint: true,
        }
    }
}

/// Mutable state of the controlled avatar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlledEntityState {
    /// World position; `y` is height above the ground plane.
    pub position: Vec3,
    /// Current facing about +Y, in `(-π, π]`.
    pub heading: f32,
    /// Facing the avatar is turning toward; kept after the keys are released.
    pub target_heading: f32,
    /// Upward velocity in units per second.
    pub vertical_velocity: f32,
    /// Whether the avatar stands on the ground plane.
    pub grounded: bool,
    /// Locomotion state driving the animation mapper.
    pub motion: MotionState,
    /// Seconds of emote remaining; zero when not emoting.
    pub emote_timer: f32,
    /// Set when an emote starts; cleared when it finishes.
    pub emote_cooldown: bool,
    /// Running lean and bounce of the body.
    pub posture: Posture,
}

impl Default for ControlledEntityState {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

impl ControlledEntityState {
    /// A grounded, idle avatar at `position`.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            heading: 0.0,
            target_heading: 0.0,
            vertical_velocity: 0.0,
            grounded: true,
            motion: MotionState::Idle,
            emote_timer: 0.0,
            emote_cooldown: false,
            posture: Posture::default(),
        }
    }

    /// Whether an emote is currently playing.
    #[must_use]
    pub const fn is_emoting(&self) -> bool {
        self.emote_timer > 0.0
    }
}

/// Clamps a frame delta into `[0, max]`, mapping non-finite values to zero.
///
/// # Examples
///
/// ```
/// use promenade::locomotion::clamp_dt;
/// assert_eq!(clamp_dt(0.5, 0.1), 0.1);
/// assert_eq!(clamp_dt(-1.0, 0.1), 0.0);
/// assert_eq!(clamp_dt(f32::NAN, 0.1), 0.0);
/// ```
#[must_use]
pub const fn clamp_dt(dt: f32, max: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, max.max(0.0))
    } else {
        0.0
    }
}

/// Horizontal direction requested by `intent` as a unit planar vector.
///
/// Forward is -Z and right is +X. Opposing keys cancel; diagonals are
/// normalised so they are no faster than a single axis.
#[must_use]
pub fn intent_direction(intent: &InputIntent) -> Vec2 {
    const fn axis(neg: bool, pos: bool) -> f32 {
        match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
    if !intent.wants_to_move() {
        return Vec2::ZERO;
    }
    planar_normalize(
        axis(intent.left, intent.right),
        axis(intent.forward, intent.backward),
    )
}

/// Steps the controlled avatar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionController {
    /// Speeds, jump and arena tunables.
    pub settings: LocomotionSettings,
    /// Running posture tunables.
    pub posture: PostureSettings,
}

impl LocomotionController {
    /// Builds a controller from its two settings blocks.
    #[must_use]
    pub const fn new(settings: LocomotionSettings, posture: PostureSettings) -> Self {
        Self { settings, posture }
    }

    /// Advances `state` by one frame and returns the clamped delta used.
    pub fn step(&self, state: &mut ControlledEntityState, intent: &InputIntent, dt: f32) -> f32 {
        let step_dt = clamp_dt(dt, self.settings.max_delta_seconds);
        state.emote_timer = state.emote_timer.max(0.0);

        if state.is_emoting() {
            self.continue_emote(state, step_dt);
            return step_dt;
        }

        if intent.emote && !state.emote_cooldown && state.grounded {
            debug!("emote started at {:?}", state.position);
            state.emote_timer = self.settings.emote_duration;
            state.emote_cooldown = true;
            set_motion(state, MotionState::Emote);
            return step_dt;
        }

        let direction = intent_direction(intent);
        let moving = direction != Vec2::ZERO;
        let running = moving && intent.sprint && self.settings.allow_sprint;
        let motion = match (moving, running) {
            (false, _) => MotionState::Idle,
            (true, false) => MotionState::Walk,
            (true, true) => MotionState::Run,
        };
        set_motion(state, motion);

        let speed = if running {
            self.settings.run_speed
        } else {
            self.settings.walk_speed
        };
        state.position.x += direction.x * speed * step_dt;
        state.position.z += direction.y * speed * step_dt;

        if moving {
            state.target_heading = heading_from_direction(direction);
        }
        state.heading = smooth_heading(
            state.heading,
            state.target_heading,
            self.settings.rotation_speed,
            step_dt,
        );

        if intent.jump && state.grounded {
            debug!("jump from {:?}", state.position);
            state.vertical_velocity = self.settings.jump_impulse;
            state.grounded = false;
        }

        self.integrate_vertical(state, step_dt);

        let bound = self.settings.arena_bound;
        state.position.x = state.position.x.clamp(-bound, bound);
        state.position.z = state.position.z.clamp(-bound, bound);

        let posture_running = state.motion == MotionState::Run && state.grounded;
        state.posture.update(posture_running, step_dt, &self.posture);
        step_dt
    }

    fn continue_emote(&self, state: &mut ControlledEntityState, dt: f32) {
        state.emote_timer -= dt;
        if state.emote_timer <= 0.0 {
            state.emote_timer = 0.0;
            state.emote_cooldown = false;
            set_motion(state, MotionState::Idle);
        }
        self.integrate_vertical(state, dt);
        state.posture.update(false, dt, &self.posture);
    }

    fn integrate_vertical(&self, state: &mut ControlledEntityState, dt: f32) {
        state.vertical_velocity += self.settings.gravity * dt;
        state.position.y += state.vertical_velocity * dt;
        if state.position.y <= 0.0 {
            state.position.y = 0.0;
            state.vertical_velocity = 0.0;
            state.grounded = true;
        }
    }
}

fn set_motion(state: &mut ControlledEntityState, motion: MotionState) {
    if state.motion != motion {
        trace!("player motion {:?} -> {:?}", state.motion, motion);
        state.motion = motion;
    }
}
