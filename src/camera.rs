//! Third-person follow camera.
//!
//! Translation lags behind the target through an exponential approach while
//! the aim snaps to the look-at point every frame, giving a soft follow that
//! never loses sight of the avatar.

use glam::Vec3;
use serde::Deserialize;

use crate::vector_math::exp_blend_factor;
use crate::{CAMERA_LOOK_OFFSET, CAMERA_OFFSET, CAMERA_SMOOTH_SPEED};

/// Tunables for the follow camera.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSettings {
    /// Camera position relative to the target.
    pub offset: [f32; 3],
    /// Look-at point relative to the target.
    pub look_offset: [f32; 3],
    /// Exponential approach rate of the camera position.
    pub smooth_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            offset: CAMERA_OFFSET,
            look_offset: CAMERA_LOOK_OFFSET,
            smooth_speed: CAMERA_SMOOTH_SPEED,
        }
    }
}

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera aims at.
    pub look_at: Vec3,
}

/// Smoothed follow state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// Offsets and smoothing rate.
    pub settings: CameraSettings,
    position: Vec3,
}

impl CameraRig {
    /// Places the camera at its desired pose for `target`, with no lag.
    #[must_use]
    pub fn new(settings: CameraSettings, target: Vec3) -> Self {
        Self {
            settings,
            position: target + Vec3::from_array(settings.offset),
        }
    }

    /// Desired pose for `target` before smoothing.
    #[must_use]
    pub fn desired(&self, target: Vec3) -> CameraPose {
        CameraPose {
            position: target + Vec3::from_array(self.settings.offset),
            look_at: target + Vec3::from_array(self.settings.look_offset),
        }
    }

    /// Moves the camera toward `target` by one frame of `dt` seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec3;
    /// use promenade::camera::{CameraRig, CameraSettings};
    ///
    /// let mut rig = CameraRig::new(CameraSettings::default(), Vec3::ZERO);
    /// let pose = rig.update(Vec3::new(0.0, 0.0, -5.0), 0.016);
    /// // Position lags, aim does not.
    /// assert!(pose.position.z > 5.0);
    /// assert_eq!(pose.look_at, Vec3::new(0.0, 1.5, -5.0));
    /// ```
    pub fn update(&mut self, target: Vec3, dt: f32) -> CameraPose {
        let desired = self.desired(target);
        let t = exp_blend_factor(self.settings.smooth_speed, dt);
        self.position = self.position.lerp(desired.position, t);
        CameraPose {
            position: self.position,
            look_at: desired.look_at,
        }
    }

    /// Current camera position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }
}
