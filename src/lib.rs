#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate providing the park simulation.
//!
//! The controllers in [`locomotion`], [`wander`], [`camera`] and
//! [`animation`] are plain data and run without an ECS. [`sim_sync`] and
//! [`presentation`] wire them into Bevy; `spawn_world` adds meshes and
//! `legend` the controls panel when the `render` feature is enabled.
pub mod animation;
pub mod camera;
pub mod config;
pub mod constants;
pub mod input;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod legend;
pub mod locomotion;
pub mod logging;
pub mod numeric;
pub mod posture;
pub mod presentation;
pub mod scenery;
pub mod sim_sync;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod spawn_world;
pub mod vector_math;
pub mod wander;
pub use constants::*;

// Re-export commonly used items
pub use animation::{AnimationDirective, ClipMixer, LoopMode, MotionState};
pub use camera::{CameraPose, CameraRig, CameraSettings};
pub use config::{ConfigError, Tuning};
pub use input::{InputAction, InputIntent, KeyBindings};
pub use locomotion::{ControlledEntityState, LocomotionController, LocomotionSettings};
pub use logging::init as init_logging;
pub use posture::{Posture, PostureSettings};
pub use presentation::{camera_follow_system, FollowCamera, PresentationPlugin};
pub use sim_sync::{ParkPlugin, ParkSettings, ParkSimulation};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use legend::{spawn_legend_system, toggle_legend_system};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use spawn_world::{dress_avatars_system, spawn_world_system};
pub use wander::{Crowd, NpcId, NpcState, RandomSource, WanderController, WanderPhase};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use promenade::prelude::*;
    //! ```

    pub use crate::AnimationDirective;
    pub use crate::ControlledEntityState;
    pub use crate::InputIntent;
    pub use crate::LocomotionController;
    pub use crate::MotionState;
    pub use crate::ParkPlugin;
    pub use crate::WanderController;
}
