//! Planar vector and angle helpers.
//!
//! The park is a flat ground plane, so horizontal quantities are carried as
//! [`Vec2`] values whose `x` is world X and whose `y` is world Z. Headings are
//! rotations about +Y in radians, with a heading of zero facing +Z.
use std::f32::consts::{PI, TAU};

use glam::Vec2;

/// Returns the unit vector in the direction of the supplied planar
/// components.
///
/// Non-finite input and the zero vector both yield [`Vec2::ZERO`], so callers
/// can treat "no direction" uniformly.
///
/// # Examples
///
/// ```
/// use promenade::vector_math::planar_normalize;
/// let dir = planar_normalize(1.0, -1.0);
/// assert!((dir.length() - 1.0).abs() < 1e-6);
/// assert_eq!(planar_normalize(0.0, 0.0), glam::Vec2::ZERO);
/// ```
#[must_use]
pub fn planar_normalize(component_x: f32, component_z: f32) -> Vec2 {
    let vector = Vec2::new(component_x, component_z);
    if !vector.is_finite() {
        return Vec2::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Wraps an angle into `(-π, π]`.
///
/// # Examples
///
/// ```
/// use std::f32::consts::PI;
/// use promenade::vector_math::wrap_angle;
/// assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5);
/// assert!((wrap_angle(-PI) - PI).abs() < 1e-6);
/// ```
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Heading that faces along `direction` (`atan2(x, z)`).
#[must_use]
pub fn heading_from_direction(direction: Vec2) -> f32 {
    direction.x.atan2(direction.y)
}

/// Frame-rate independent blend factor `1 - e^(-rate * dt)`.
///
/// Always lies in `[0, 1)` for non-negative input.
#[must_use]
pub fn exp_blend_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate.max(0.0) * dt.max(0.0)).exp()
}

/// Turns `current` toward `target` along the shorter arc.
///
/// The wrapped difference is scaled by `min(1, rotation_speed * dt)`, giving
/// an exponential approach rather than a snap. The result is normalised into
/// `(-π, π]`.
///
/// # Examples
///
/// ```
/// use promenade::vector_math::smooth_heading;
/// // Crossing the ±π seam takes the short way round.
/// let next = smooth_heading(3.0, -3.0, 10.0, 0.016);
/// assert!(next > 3.0 || next < -3.0);
/// ```
#[must_use]
pub fn smooth_heading(current: f32, target: f32, rotation_speed: f32, dt: f32) -> f32 {
    let diff = wrap_angle(target - current);
    let step = (rotation_speed * dt).clamp(0.0, 1.0);
    wrap_angle(current + diff * step)
}

/// Clamps both planar components into `[-bound, bound]`.
#[must_use]
pub fn clamp_planar(point: Vec2, bound: f32) -> Vec2 {
    point.clamp(Vec2::splat(-bound), Vec2::splat(bound))
}
