//! Presentation layer plugin owning the follow camera.
//!
//! `PresentationPlugin` spawns the camera and keeps it trailing the player.
//! It is a passive observer of simulation state: the camera reads the
//! player's position after the sync systems have run and never feeds back
//! into the simulation.

use bevy::prelude::*;

use crate::camera::{CameraPose, CameraRig, CameraSettings};
use crate::sim_sync::{apply_player_outputs_system, ParkSettings, ParkSimulation};

/// Component driving an entity's transform with a [`CameraRig`].
///
/// Exactly one entity is expected to carry it. With the `render` feature it
/// is spawned alongside `Camera3d`; headless apps get a bare transform.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use promenade::camera::CameraSettings;
/// use promenade::presentation::FollowCamera;
///
/// let follow = FollowCamera::new(CameraSettings::default(), Vec3::ZERO);
/// assert_eq!(follow.rig().position(), Vec3::new(0.0, 6.0, 10.0));
/// ```
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FollowCamera {
    rig: CameraRig,
}

impl FollowCamera {
    /// Creates a camera already settled on `target`.
    #[must_use]
    pub fn new(settings: CameraSettings, target: Vec3) -> Self {
        Self {
            rig: CameraRig::new(settings, target),
        }
    }

    /// Smoothing state driving the transform.
    #[must_use]
    pub const fn rig(&self) -> &CameraRig {
        &self.rig
    }
}

/// Builds the transform for `pose`, aimed at its look-at point.
#[must_use]
pub fn pose_transform(pose: CameraPose) -> Transform {
    Transform::from_translation(pose.position).looking_at(pose.look_at, Vec3::Y)
}

/// Moves the camera toward the player and aims it.
///
/// Smooths with the simulation's clamped timestep rather than the raw frame
/// delta, so after a hitch the camera lags by the same amount as the avatar
/// instead of snapping toward it. Skips the frame when no camera exists
/// (e.g. during initialisation).
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn camera_follow_system(
    sim: Res<ParkSimulation>,
    mut cameras: Query<(&mut Transform, &mut FollowCamera)>,
) {
    let Ok((mut transform, mut follow)) = cameras.single_mut() else {
        return;
    };
    let pose = follow.rig.update(sim.player().position, sim.frame_dt());
    *transform = pose_transform(pose);
}

/// Plugin owning camera setup and presentation layer systems.
///
/// # Responsibilities
///
/// - Spawns the follow camera at startup unless one already exists.
/// - Runs `camera_follow_system` after the player outputs are applied.
///
/// # Dependencies
///
/// Requires [`ParkPlugin`](crate::ParkPlugin) for the simulation resources.
#[derive(Debug)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, camera_setup);
        app.add_systems(
            Update,
            camera_follow_system.after(apply_player_outputs_system),
        );
    }
}

/// Spawns the follow camera at startup if none exists.
///
/// A host application that spawned its own [`FollowCamera`] keeps it.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn camera_setup(
    mut commands: Commands,
    settings: Res<ParkSettings>,
    sim: Res<ParkSimulation>,
    cameras: Query<(), With<FollowCamera>>,
) {
    if !cameras.is_empty() {
        return;
    }
    let follow = FollowCamera::new(settings.tuning.camera, sim.player().position);
    let transform = pose_transform(follow.rig.desired(sim.player().position));
    let bundle = (Name::new("FollowCamera"), follow, transform);
    #[cfg(feature = "render")]
    commands.spawn((
        bundle,
        Camera3d::default(),
        bevy::pbr::DistanceFog {
            color: Color::srgb(0.79, 0.9, 1.0),
            falloff: bevy::pbr::FogFalloff::Linear {
                start: 25.0,
                end: 60.0,
            },
            ..default()
        },
    ));
    #[cfg(not(feature = "render"))]
    commands.spawn(bundle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParkPlugin, MAX_DELTA_SECONDS};
    use approx::assert_abs_diff_eq;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    #[test]
    fn pose_transform_looks_at_target() {
        let pose = CameraPose {
            position: Vec3::new(0.0, 6.0, 10.0),
            look_at: Vec3::new(0.0, 1.5, 0.0),
        };
        let transform = pose_transform(pose);
        let expected = (pose.look_at - pose.position).normalize();
        let forward = transform.forward();
        assert_abs_diff_eq!(forward.x, expected.x, epsilon = 1e-5);
        assert_abs_diff_eq!(forward.y, expected.y, epsilon = 1e-5);
        assert_abs_diff_eq!(forward.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn follow_camera_starts_settled() {
        let follow = FollowCamera::new(CameraSettings::default(), Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(follow.rig().position(), Vec3::new(1.0, 6.0, 11.0));
    }

    #[test]
    fn camera_smooths_with_the_clamped_step() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs(1)));
        app.add_plugins((ParkPlugin, PresentationPlugin));
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyW);

        let mut mirror = CameraRig::new(CameraSettings::default(), Vec3::ZERO);
        for _ in 0..4 {
            app.update();
            let sim = app.world().resource::<ParkSimulation>();
            assert!(sim.frame_dt() <= MAX_DELTA_SECONDS);
            mirror.update(sim.player().position, sim.frame_dt());
        }
        let player_z = app.world().resource::<ParkSimulation>().player().position.z;
        assert!(player_z < 0.0, "player never walked");

        let mut cameras = app.world_mut().query::<&FollowCamera>();
        let follow = cameras
            .single(app.world())
            .expect("exactly one follow camera");
        assert_eq!(follow.rig().position(), mirror.position());
    }
}
