use anyhow::Context;

use mini_gl_triangle::logging::{init_logging, LoggingConfig};
use mini_gl_triangle::Config;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = Config::default();
    mini_gl_triangle::run(config).context("triangle demo failed to start")
}
