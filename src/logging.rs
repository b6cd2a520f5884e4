//! Logger initialisation shared by the binary and the tests.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, all debug messages are printed. Otherwise only
/// info level and above are shown. `RUST_LOG` still takes precedence, so
/// `RUST_LOG=promenade::wander=trace` narrows output to NPC phase changes.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already set; that logger stays.
    if let Err(err) = builder.try_init() {
        log::debug!("keeping the installed logger: {err}");
    }
}
