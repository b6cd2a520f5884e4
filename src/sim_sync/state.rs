//! Resources owning the simulation state.

use bevy::prelude::Resource;
use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::Tuning;
use crate::input::InputIntent;
use crate::locomotion::{ControlledEntityState, LocomotionController};
use crate::posture::PostureSettings;
use crate::wander::{Crowd, WanderController};

/// Inputs used to build the [`ParkSimulation`].
///
/// Insert this before adding [`ParkPlugin`](super::ParkPlugin) to override
/// the defaults.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ParkSettings {
    /// Controller tunables; validated when the plugin is built.
    pub tuning: Tuning,
    /// Seed of the NPC random stream.
    pub seed: u64,
}

/// The player, the crowd and the random stream that drives the crowd.
#[derive(Resource, Debug, Clone)]
pub struct ParkSimulation {
    locomotion: LocomotionController,
    wander: WanderController,
    player: ControlledEntityState,
    crowd: Crowd,
    rng: ChaCha8Rng,
    elapsed: f32,
    frame_dt: f32,
}

impl ParkSimulation {
    /// Places the player at the origin and the crowd at its park spawns.
    #[must_use]
    pub fn new(settings: &ParkSettings) -> Self {
        let tuning = &settings.tuning;
        Self {
            locomotion: LocomotionController::new(tuning.locomotion, tuning.posture),
            wander: WanderController::new(tuning.wander),
            player: ControlledEntityState::at(Vec3::ZERO),
            crowd: Crowd::park(),
            rng: ChaCha8Rng::seed_from_u64(settings.seed),
            elapsed: 0.0,
            frame_dt: 0.0,
        }
    }

    /// Advances the player and every NPC by one frame.
    ///
    /// Returns the clamped timestep the player was advanced by.
    pub fn step(&mut self, intent: &InputIntent, dt: f32) -> f32 {
        let used = self.locomotion.step(&mut self.player, intent, dt);
        self.crowd.step(&self.wander, &mut self.rng, used);
        self.elapsed += used;
        self.frame_dt = used;
        used
    }

    /// The controlled avatar.
    #[must_use]
    pub const fn player(&self) -> &ControlledEntityState {
        &self.player
    }

    /// Every wandering NPC.
    #[must_use]
    pub const fn crowd(&self) -> &Crowd {
        &self.crowd
    }

    /// Posture tunables, needed for the arm pump.
    #[must_use]
    pub const fn posture_settings(&self) -> &PostureSettings {
        &self.locomotion.posture
    }

    /// Simulated seconds since start.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Clamped timestep of the most recent step.
    #[must_use]
    pub const fn frame_dt(&self) -> f32 {
        self.frame_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::MotionState;

    #[test]
    fn same_seed_gives_same_crowd_paths() {
        let settings = ParkSettings {
            seed: 7,
            ..ParkSettings::default()
        };
        let mut a = ParkSimulation::new(&settings);
        let mut b = ParkSimulation::new(&settings);
        let idle = InputIntent::default();
        for _ in 0..600 {
            a.step(&idle, 1.0 / 30.0);
            b.step(&idle, 1.0 / 30.0);
        }
        assert_eq!(a.crowd(), b.crowd());
    }

    #[test]
    fn step_reports_the_clamped_timestep() {
        let mut sim = ParkSimulation::new(&ParkSettings::default());
        let dt = sim.step(&InputIntent::default(), 2.0);
        assert_eq!(dt, crate::MAX_DELTA_SECONDS);
        assert_eq!(sim.frame_dt(), crate::MAX_DELTA_SECONDS);
        assert_eq!(sim.player().motion, MotionState::Idle);
    }

    #[test]
    fn forward_intent_moves_the_player() {
        let mut sim = ParkSimulation::new(&ParkSettings::default());
        let intent = InputIntent {
            forward: true,
            ..InputIntent::default()
        };
        sim.step(&intent, 0.1);
        assert!(sim.player().position.z < 0.0);
    }
}
