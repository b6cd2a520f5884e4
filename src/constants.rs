//! Park-wide tuning constants shared across the simulation.
//!
//! These values are the defaults for [`crate::config::Tuning`]. A TOML file
//! can override any of them at start-up; the constants remain the reference
//! values used by tests.

/// Half-extent of the square arena the player may walk in.
pub const ARENA_BOUND: f32 = 24.0;
/// Half-extent NPC wander targets are clamped to.
pub const WANDER_BOUND: f32 = 22.0;
/// Largest frame delta fed to an integration step, in seconds.
pub const MAX_DELTA_SECONDS: f32 = 0.1;

/// Player walking speed in units per second.
pub const WALK_SPEED: f32 = 4.0;
/// Player sprinting speed in units per second.
pub const RUN_SPEED: f32 = 8.0;
/// Upward velocity given by a jump.
pub const JUMP_IMPULSE: f32 = 6.0;
/// Constant vertical acceleration in units per second squared.
pub const GRAVITY: f32 = -15.0;
/// Rate at which the player turns toward its movement direction.
pub const PLAYER_ROTATION_SPEED: f32 = 10.0;
/// Length of an emote for both the player and NPCs, in seconds.
pub const EMOTE_DURATION: f32 = 2.2;

/// NPC walking speed in units per second.
pub const NPC_SPEED: f32 = 1.5;
/// Rate at which NPCs turn toward their target.
pub const NPC_ROTATION_SPEED: f32 = 8.0;
/// Distance at which an NPC counts as having reached its wander target.
pub const ARRIVE_THRESHOLD: f32 = 0.5;
/// Shortest NPC idle spell.
pub const IDLE_MIN_SECONDS: f32 = 1.5;
/// Upper bound of an NPC idle spell.
pub const IDLE_MAX_SECONDS: f32 = 4.0;
/// Spread of wander distances beyond [`WANDER_MIN_DISTANCE`].
pub const WANDER_RADIUS: f32 = 18.0;
/// Minimum distance of a fresh wander target from the NPC.
pub const WANDER_MIN_DISTANCE: f32 = 3.0;
/// Probability that an expired idle becomes a wave.
pub const EMOTE_CHANCE: f32 = 0.25;

/// Idle timer of the first NPC; later spawns add [`SPAWN_STAGGER_SECONDS`]
/// per seed so they do not switch phase in lockstep.
pub const INITIAL_IDLE_SECONDS: f32 = 1.0;
/// Extra first-idle seconds per spawn index.
pub const SPAWN_STAGGER_SECONDS: f32 = 0.5;

/// Camera position relative to the player.
pub const CAMERA_OFFSET: [f32; 3] = [0.0, 6.0, 10.0];
/// Look-at point relative to the player.
pub const CAMERA_LOOK_OFFSET: [f32; 3] = [0.0, 1.5, 0.0];
/// Exponential approach rate of the camera.
pub const CAMERA_SMOOTH_SPEED: f32 = 3.0;
