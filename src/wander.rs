//! Ambient NPC wandering.
//!
//! Each NPC runs a three-phase timer machine: it idles for a random spell,
//! then either waves or walks to a random nearby point, then idles again.
//! NPCs never interact with each other, the player or the scenery; they walk
//! straight through props.
//!
//! Randomness is injected through [`RandomSource`] so a seeded generator
//! reproduces a whole crowd exactly.

use std::f32::consts::TAU;

use glam::Vec2;
use log::{debug, trace};
use rand::Rng;
use serde::Deserialize;

use crate::animation::MotionState;
use crate::locomotion::clamp_dt;
use crate::vector_math::{clamp_planar, heading_from_direction, smooth_heading};
use crate::{
    ARRIVE_THRESHOLD, EMOTE_CHANCE, EMOTE_DURATION, IDLE_MAX_SECONDS, IDLE_MIN_SECONDS,
    INITIAL_IDLE_SECONDS, MAX_DELTA_SECONDS, NPC_ROTATION_SPEED, NPC_SPEED,
    SPAWN_STAGGER_SECONDS, WANDER_BOUND, WANDER_MIN_DISTANCE, WANDER_RADIUS,
};

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f32;
}

impl<R: Rng> RandomSource for R {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Tunables for wandering NPCs.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WanderSettings {
    /// Walking speed in units per second.
    pub speed: f32,
    /// Heading convergence rate.
    pub rotation_speed: f32,
    /// Distance below which the wander target counts as reached.
    pub arrive_threshold: f32,
    /// Shortest idle spell, in seconds.
    pub idle_min: f32,
    /// Upper bound (exclusive) of an idle spell.
    pub idle_max: f32,
    /// Spread of wander distances beyond `min_distance`.
    pub wander_radius: f32,
    /// Nearest a fresh wander target may be.
    pub min_distance: f32,
    /// Probability that an expired idle turns into an emote.
    pub emote_chance: f32,
    /// Seconds an NPC waves for.
    pub emote_duration: f32,
    /// Half-extent wander targets are clamped to.
    pub target_bound: f32,
    /// Frame deltas above this are clamped.
    pub max_delta_seconds: f32,
}

impl Default for WanderSettings {
    fn default() -> Self {
        Self {
            speed: NPC_SPEED,
            rotation_speed: NPC_ROTATION_SPEED,
            arrive_threshold: ARRIVE_THRESHOLD,
            idle_min: IDLE_MIN_SECONDS,
            idle_max: IDLE_MAX_SECONDS,
            wander_radius: WANDER_RADIUS,
            min_distance: WANDER_MIN_DISTANCE,
            emote_chance: EMOTE_CHANCE,
            emote_duration: EMOTE_DURATION,
            target_bound: WANDER_BOUND,
            max_delta_seconds: MAX_DELTA_SECONDS,
        }
    }
}

/// Behaviour phase of an NPC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WanderPhase {
    /// Standing still until the timer runs out.
    #[default]
    Idle,
    /// Heading for the current target.
    Walking,
    /// Waving until the timer runs out.
    Emote,
}

impl WanderPhase {
    /// Animation state shown while in this phase.
    #[must_use]
    pub const fn motion(self) -> MotionState {
        match self {
            Self::Idle => MotionState::Idle,
            Self::Walking => MotionState::Walk,
            Self::Emote => MotionState::Emote,
        }
    }
}

/// Mutable state of one NPC. Positions are planar (`y` is world Z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpcState {
    /// Planar position.
    pub position: Vec2,
    /// Current facing about +Y.
    pub heading: f32,
    /// Facing the NPC is turning toward.
    pub target_heading: f32,
    /// Current behaviour phase.
    pub phase: WanderPhase,
    /// Seconds left in the idle or emote phase.
    pub timer: f32,
    /// Wander destination; only meaningful while walking.
    pub target: Vec2,
}

impl NpcState {
    /// Fresh idle NPC. `seed` staggers the first idle so a crowd does not
    /// switch phase in lockstep.
    #[must_use]
    pub fn spawn(position: Vec2, seed: u16) -> Self {
        Self {
            position,
            heading: 0.0,
            target_heading: 0.0,
            phase: WanderPhase::Idle,
            timer: INITIAL_IDLE_SECONDS + f32::from(seed) * SPAWN_STAGGER_SECONDS,
            target: position,
        }
    }
}

/// Picks a wander target around `origin`.
///
/// The angle is uniform over a full turn and the distance uniform over
/// `[min_distance, min_distance + wander_radius)`; the point is then clamped
/// to `target_bound`. Points inside scenery are accepted.
pub fn pick_wander_target<R: RandomSource + ?Sized>(
    origin: Vec2,
    settings: &WanderSettings,
    rng: &mut R,
) -> Vec2 {
    let angle = rng.unit() * TAU;
    let distance = settings.min_distance + rng.unit() * settings.wander_radius;
    let point = origin + Vec2::new(angle.cos(), angle.sin()) * distance;
    clamp_planar(point, settings.target_bound)
}

/// Steps wandering NPCs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WanderController {
    /// Tunables shared by every NPC.
    pub settings: WanderSettings,
}

impl WanderController {
    /// Builds a controller from `settings`.
    #[must_use]
    pub const fn new(settings: WanderSettings) -> Self {
        Self { settings }
    }

    /// Random idle duration in `[idle_min, idle_max)`.
    pub fn idle_duration<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f32 {
        let s = &self.settings;
        s.idle_min + rng.unit() * (s.idle_max - s.idle_min)
    }

    /// Advances one NPC by a frame and returns the clamped delta used.
    pub fn step<R: RandomSource + ?Sized>(
        &self,
        state: &mut NpcState,
        rng: &mut R,
        dt: f32,
    ) -> f32 {
        let step_dt = clamp_dt(dt, self.settings.max_delta_seconds);
        match state.phase {
            WanderPhase::Emote => {
                state.timer -= step_dt;
                if state.timer <= 0.0 {
                    state.phase = WanderPhase::Idle;
                    state.timer = self.idle_duration(rng);
                }
            }
            WanderPhase::Idle => {
                state.timer -= step_dt;
                if state.timer <= 0.0 {
                    if rng.unit() < self.settings.emote_chance {
                        state.phase = WanderPhase::Emote;
                        state.timer = self.settings.emote_duration;
                    } else {
                        state.target = pick_wander_target(state.position, &self.settings, rng);
                        state.phase = WanderPhase::Walking;
                        state.timer = 0.0;
                    }
                }
            }
            WanderPhase::Walking => self.walk(state, rng, step_dt),
        }
        state.timer = state.timer.max(0.0);

        state.heading = smooth_heading(
            state.heading,
            state.target_heading,
            self.settings.rotation_speed,
            step_dt,
        );
        step_dt
    }

    fn walk<R: RandomSource + ?Sized>(&self, state: &mut NpcState, rng: &mut R, dt: f32) {
        let to_target = state.target - state.position;
        let distance = to_target.length();
        if distance < self.settings.arrive_threshold {
            state.phase = WanderPhase::Idle;
            state.timer = self.idle_duration(rng);
            return;
        }
        let direction = to_target / distance;
        // Never step past the target, however fast the walker.
        state.position += direction * (self.settings.speed * dt).min(distance);
        state.target_heading = heading_from_direction(direction);
    }
}

/// Index of an NPC inside a [`Crowd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NpcId(pub usize);

/// One crowd member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Npc {
    /// Position of the record in its crowd.
    pub id: NpcId,
    /// Render scale of the NPC's model.
    pub scale: f32,
    /// Wander state advanced by [`Crowd::step`].
    pub state: NpcState,
}

/// Where the park's crowd starts: `(x, z, scale)`.
pub const PARK_SPAWNS: [(f32, f32, f32); 20] = [
    // around the central path
    (3.0, 4.0, 0.35),
    (-2.0, -3.0, 0.5),
    (5.0, -2.0, 0.28),
    // north-east
    (15.0, -12.0, 0.45),
    (18.0, -8.0, 0.3),
    (12.0, -18.0, 0.55),
    // north-west
    (-14.0, -14.0, 0.4),
    (-18.0, -10.0, 0.25),
    (-11.0, -19.0, 0.6),
    // south-west
    (-16.0, 8.0, 0.38),
    (-12.0, 15.0, 0.5),
    (-20.0, 12.0, 0.32),
    // south-east
    (16.0, 10.0, 0.42),
    (12.0, 18.0, 0.55),
    // by the pond
    (6.0, -7.0, 0.22),
    (13.0, -5.0, 0.48),
    // scattered
    (-7.0, 5.0, 0.33),
    (0.0, 12.0, 0.27),
    (-5.0, -10.0, 0.52),
    (20.0, 0.0, 0.36),
];

/// Arena of independent NPC records, indexed by [`NpcId`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Crowd {
    npcs: Vec<Npc>,
}

impl Crowd {
    /// Empty crowd.
    #[must_use]
    pub const fn new() -> Self {
        Self { npcs: Vec::new() }
    }

    /// The park's default crowd from [`PARK_SPAWNS`].
    #[must_use]
    pub fn park() -> Self {
        let mut crowd = Self::new();
        for (x, z, scale) in PARK_SPAWNS {
            crowd.spawn(Vec2::new(x, z), scale);
        }
        crowd
    }

    /// Adds an idle NPC; its spawn order is its stagger seed.
    pub fn spawn(&mut self, position: Vec2, scale: f32) -> NpcId {
        let id = NpcId(self.npcs.len());
        let seed = u16::try_from(id.0).unwrap_or(u16::MAX);
        self.npcs.push(Npc {
            id,
            scale,
            state: NpcState::spawn(position, seed),
        });
        id
    }

    /// Record for `id`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, id: NpcId) -> Option<&Npc> {
        self.npcs.get(id.0)
    }

    /// Records in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.iter()
    }

    /// Number of NPCs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.npcs.len()
    }

    /// Whether the crowd has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    /// Steps every NPC independently.
    pub fn step<R: RandomSource + ?Sized>(
        &mut self,
        controller: &WanderController,
        rng: &mut R,
        dt: f32,
    ) {
        for npc in &mut self.npcs {
            let before = npc.state.phase;
            controller.step(&mut npc.state, rng, dt);
            let after = npc.state.phase;
            if before != after {
                debug!("npc {} {:?} -> {:?}", npc.id.0, before, after);
                if after == WanderPhase::Walking {
                    trace!("npc {} heading for {:?}", npc.id.0, npc.state.target);
                }
            }
        }
    }
}
