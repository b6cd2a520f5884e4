//! Bevy plugin wiring the park simulation into the schedule.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::error;
use thiserror::Error;

use crate::animation::MotionState;
use crate::input::{InputIntent, KeyBindings};

use super::{
    apply_npc_outputs_system, apply_player_outputs_system, capture_input_system,
    spawn_avatars_system, step_simulation_system, ArmPivot, AvatarBody, ParkSettings,
    ParkSimulation, PlayerAvatar,
};

/// Event raised when the plugin rejects the supplied [`ParkSettings`].
///
/// The plugin falls back to default tuning and keeps running.
#[derive(Event, Debug, Clone, Error)]
#[error("rejected park settings: {detail}")]
pub struct ParkSyncError {
    /// Description of the underlying error.
    pub detail: String,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_park_error(event: On<ParkSyncError>) {
    error!("{}", event.event());
}

/// Bevy plugin installing the park simulation and its sync systems.
///
/// Reads [`ParkSettings`] (inserting the defaults when absent) and builds
/// the [`ParkSimulation`] from them. Per frame the systems run in order:
/// input capture, simulation step, then output application.
#[derive(Default, Debug)]
pub struct ParkPlugin;

impl Plugin for ParkPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_park_error);
        app.register_type::<MotionState>()
            .register_type::<PlayerAvatar>()
            .register_type::<AvatarBody>()
            .register_type::<ArmPivot>();

        app.init_resource::<ParkSettings>();
        let mut settings = app.world().resource::<ParkSettings>().clone();
        if let Err(e) = settings.tuning.validate() {
            app.world_mut().trigger(ParkSyncError {
                detail: e.to_string(),
            });
            settings.tuning = crate::config::Tuning::default();
            app.insert_resource(settings.clone());
        }

        app.insert_resource(ParkSimulation::new(&settings));
        app.init_resource::<InputIntent>();
        app.init_resource::<KeyBindings>();
        app.init_resource::<ButtonInput<KeyCode>>();

        app.add_systems(Startup, spawn_avatars_system);
        app.add_systems(
            Update,
            (
                capture_input_system,
                step_simulation_system,
                apply_player_outputs_system,
                apply_npc_outputs_system,
            )
                .chain(),
        );
    }
}
