//! Running posture layered under the avatar's root transform.
//!
//! The root transform carries position and heading; the body transform
//! beneath it carries a forward lean and a stride bounce while running. The
//! renderer combines the two, so this module only produces numbers.

use serde::Deserialize;

use crate::vector_math::exp_blend_factor;

/// Tunables for the running posture.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostureSettings {
    /// Mean forward lean while running, in radians.
    pub lean_angle: f32,
    /// Amplitude of the lean oscillation over a stride, in radians.
    pub lean_sway: f32,
    /// Peak vertical bounce per stride.
    pub bounce_height: f32,
    /// Angular frequency of the stride, in radians per second.
    pub stride_frequency: f32,
    /// Exponential rate at which the body follows its target.
    pub blend_rate: f32,
    /// Peak extra arm rotation while running, in radians.
    pub arm_swing: f32,
    /// Angular frequency of the arm pump, in radians per second.
    pub arm_frequency: f32,
}

impl Default for PostureSettings {
    fn default() -> Self {
        Self {
            lean_angle: 0.18,
            lean_sway: 0.03,
            bounce_height: 0.06,
            stride_frequency: 12.0,
            blend_rate: 8.0,
            arm_swing: 0.15,
            arm_frequency: 14.0,
        }
    }
}

/// Secondary body transform relative to the root.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyPose {
    /// Rotation about the body's local X axis; positive leans forward.
    pub lean: f32,
    /// Vertical offset above the root.
    pub bounce: f32,
}

/// Per-entity posture state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Posture {
    run_time: f32,
    body: BodyPose,
}

impl Posture {
    /// Advances the posture by `dt`.
    ///
    /// `running` must already account for the grounded check: a jumping
    /// runner decays toward neutral like a walker does.
    pub fn update(&mut self, running: bool, dt: f32, settings: &PostureSettings) {
        let target = if running {
            self.run_time += dt;
            let phase = (self.run_time * settings.stride_frequency).sin();
            BodyPose {
                lean: settings.lean_angle + settings.lean_sway * phase,
                bounce: settings.bounce_height * phase.abs(),
            }
        } else {
            self.run_time = 0.0;
            BodyPose::default()
        };

        let t = exp_blend_factor(settings.blend_rate, dt);
        self.body.lean += (target.lean - self.body.lean) * t;
        self.body.bounce += (target.bounce - self.body.bounce) * t;
    }

    /// Current body transform.
    #[must_use]
    pub const fn body(&self) -> BodyPose {
        self.body
    }
}

/// Extra `(left, right)` arm rotation for a runner at clock time `elapsed`.
///
/// The arms pump in opposite phase. Walkers and idlers get `(0, 0)`.
#[must_use]
pub fn arm_swing(running: bool, elapsed: f32, settings: &PostureSettings) -> (f32, f32) {
    if !running {
        return (0.0, 0.0);
    }
    let phase = elapsed * settings.arm_frequency;
    let left = phase.sin() * settings.arm_swing;
    let right = (phase + std::f32::consts::PI).sin() * settings.arm_swing;
    (left, right)
}
