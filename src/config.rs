//! Runtime tuning loaded from TOML.
//!
//! Every section is optional; missing keys fall back to the constants in
//! [`crate::constants`]. A complete file looks like:
//!
//! ```toml
//! [locomotion]
//! walk_speed = 4.0
//! run_speed = 8.0
//!
//! [wander]
//! emote_chance = 0.25
//!
//! [camera]
//! offset = [0.0, 6.0, 10.0]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::camera::CameraSettings;
use crate::locomotion::LocomotionSettings;
use crate::posture::PostureSettings;
use crate::wander::WanderSettings;

/// Errors raised while loading a [`Tuning`] file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read tuning file {path}: {source}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unknown keys.
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but makes no sense for the simulation.
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending key.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// All tunables of the park, grouped per subsystem.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// `[locomotion]` section.
    pub locomotion: LocomotionSettings,
    /// `[posture]` section.
    pub posture: PostureSettings,
    /// `[wander]` section.
    pub wander: WanderSettings,
    /// `[camera]` section.
    pub camera: CameraSettings,
}

impl Tuning {
    /// Parses and validates tuning from a TOML string.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed input and
    /// [`ConfigError::Invalid`] when a value fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use promenade::config::Tuning;
    /// let tuning = Tuning::from_toml_str("[locomotion]\nrun_speed = 9.0\n").unwrap();
    /// assert_eq!(tuning.locomotion.run_speed, 9.0);
    /// assert_eq!(tuning.locomotion.walk_speed, promenade::WALK_SPEED);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let tuning: Self = toml::from_str(source)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reads tuning from `path`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`Tuning::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let source = fs::read_to_string(file).map_err(|err| ConfigError::Read {
            path: file.to_path_buf(),
            source: err,
        })?;
        let tuning = Self::from_toml_str(&source)?;
        log::info!("loaded tuning from {}", file.display());
        Ok(tuning)
    }

    /// Checks cross-field constraints serde cannot express.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let loco = &self.locomotion;
        positive("locomotion.walk_speed", loco.walk_speed)?;
        positive("locomotion.run_speed", loco.run_speed)?;
        positive("locomotion.arena_bound", loco.arena_bound)?;
        positive("locomotion.max_delta_seconds", loco.max_delta_seconds)?;
        positive("locomotion.emote_duration", loco.emote_duration)?;
        if loco.gravity >= 0.0 {
            return Err(ConfigError::Invalid {
                field: "locomotion.gravity",
                reason: "must pull downward (negative)",
            });
        }

        let wander = &self.wander;
        positive("wander.speed", wander.speed)?;
        positive("wander.arrive_threshold", wander.arrive_threshold)?;
        positive("wander.target_bound", wander.target_bound)?;
        positive("wander.max_delta_seconds", wander.max_delta_seconds)?;
        if wander.idle_min < 0.0 || wander.idle_max < wander.idle_min {
            return Err(ConfigError::Invalid {
                field: "wander.idle_max",
                reason: "idle range must satisfy 0 <= idle_min <= idle_max",
            });
        }
        if !(0.0..=1.0).contains(&wander.emote_chance) {
            return Err(ConfigError::Invalid {
                field: "wander.emote_chance",
                reason: "must be a probability in [0, 1]",
            });
        }

        if self.camera.smooth_speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "camera.smooth_speed",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

const fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be a positive finite number",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_document_yields_defaults() {
        let tuning = Tuning::from_toml_str("").expect("empty tuning parses");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let tuning = Tuning::from_toml_str(
            "[wander]\nemote_chance = 0.5\n[camera]\noffset = [0.0, 4.0, 8.0]\n",
        )
        .expect("partial tuning parses");
        assert_eq!(tuning.wander.emote_chance, 0.5);
        assert_eq!(tuning.wander.speed, crate::NPC_SPEED);
        assert_eq!(tuning.camera.offset, [0.0, 4.0, 8.0]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Tuning::from_toml_str("[locomotion]\nwarp_speed = 9.0\n")
            .expect_err("unknown key should fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[rstest]
    #[case::zero_walk("[locomotion]\nwalk_speed = 0.0\n", "locomotion.walk_speed")]
    #[case::upward_gravity("[locomotion]\ngravity = 9.8\n", "locomotion.gravity")]
    #[case::inverted_idle("[wander]\nidle_min = 5.0\nidle_max = 1.0\n", "wander.idle_max")]
    #[case::bad_chance("[wander]\nemote_chance = 1.5\n", "wander.emote_chance")]
    #[case::negative_smoothing("[camera]\nsmooth_speed = -1.0\n", "camera.smooth_speed")]
    fn invalid_values_name_their_field(#[case] source: &str, #[case] expected: &str) {
        match Tuning::from_toml_str(source) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected Invalid for {expected}, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Tuning::load("/definitely/not/here.toml").expect_err("load should fail");
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
