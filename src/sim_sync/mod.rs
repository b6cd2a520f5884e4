//! Synchronisation between the park simulation and the Bevy ECS.
//!
//! The simulation itself is plain data held in [`ParkSimulation`]. The
//! systems here feed it keyboard intent, advance it once per frame and copy
//! the results onto avatar transforms and clip mixers.

mod components;
mod plugin;
mod state;
mod systems;

pub use components::{ArmPivot, ArmSide, AvatarBody, NpcAvatar, PlayerAvatar};
pub use plugin::{ParkPlugin, ParkSyncError};
pub use state::{ParkSettings, ParkSimulation};
pub use systems::{
    apply_npc_outputs_system, apply_player_outputs_system, capture_input_system,
    spawn_avatars_system, step_simulation_system,
};
