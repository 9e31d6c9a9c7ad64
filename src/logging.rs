use std::env;
use std::sync::Once;

/// `filter` uses `env_logger`'s directive syntax, e.g. `"debug"` or `"mini_gl_triangle=debug"`.
/// When it is `None`, `RUST_LOG` is consulted, then `info` is used.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the global logger. Calls after the first are ignored, and so is an
/// embedding application that already installed its own logger.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match config.filter.or_else(|| env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        match builder.try_init() {
            Ok(()) => log::debug!("Logging initialized"),
            Err(_) => log::debug!("Keeping the logger that was already installed"),
        }
    });
}
