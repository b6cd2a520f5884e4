//! Utility helpers for tests.
//!
//! Intent builders, a scripted random source, stepping loops and a headless
//! Bevy app preconfigured with the park plugins.

pub mod app;
pub mod intent;
pub mod random;
pub mod stepping;

pub use app::{headless_app, install_error_observer, press, release, CapturedErrors};
pub use intent::held;
pub use random::ScriptedRandom;
pub use stepping::{run_crowd_for, run_for};
