//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between floating-point widths and
//! integer domains. They rely on debug assertions to flag unexpected
//! overflows while keeping the call-sites ergonomic.

/// Convert a finite `f64` into `f32`, asserting that it fits the target type.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Callers assert that the value fits within f32 bounds."
)]
#[must_use]
pub fn expect_f32(value: f64) -> f32 {
    debug_assert!(value.is_finite(), "expected finite f64 for f32 conversion");
    debug_assert!(
        value <= f64::from(f32::MAX),
        "f64 value {value} exceeds f32::MAX"
    );
    debug_assert!(
        value >= f64::from(f32::MIN),
        "f64 value {value} is below f32::MIN"
    );
    value as f32
}

/// Convert a count into `f64` for seed arithmetic.
///
/// Seeds are small indices; anything beyond `u32::MAX` saturates.
#[must_use]
pub fn seed_to_f64(seed: usize) -> f64 {
    f64::from(u32::try_from(seed).unwrap_or(u32::MAX))
}
