//! Logger bootstrap for the command-line tool.

use std::env;

use log::LevelFilter;

/// Installs `env_logger` at Info, or Debug when `verbose` is set.
///
/// `RUST_LOG`, when present, overrides the level. The library itself only
/// emits through the `log` facade and never calls this. Panics if a logger
/// is already installed, so call it once at startup.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder.init();
    log::debug!("logger initialized at {level:?} level");
}
