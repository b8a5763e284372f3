//! Logger setup for the `painter` binary.

use std::sync::Once;

use crate::config::PainterConfig;

/// Used when neither the config nor `RUST_LOG` sets a filter.
pub const DEFAULT_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Pick the `env_logger` filter: the config's `log_filter` first, then
/// `RUST_LOG`, then [`DEFAULT_FILTER`]. Blank values count as unset.
pub fn resolve_filter(configured: Option<&str>, env: Option<&str>) -> String {
    [configured, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install the global logger for `config`. Only the first call has an effect.
pub fn init_logging(config: &PainterConfig) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let filter = resolve_filter(config.log_filter.as_deref(), env.as_deref());

        let installed = env_logger::Builder::new()
            .parse_filters(&filter)
            .format_timestamp_millis()
            .format_module_path(false)
            .try_init();
        match installed {
            Ok(()) => log::debug!("logging initialized with filter {:?}", filter),
            Err(e) => eprintln!("painter: logger not installed: {e}"),
        }
    });
}
