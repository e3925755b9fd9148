mod logging;

pub use logging::init_logging;

use anyhow::Context;
use ferrous_route_domain::{CliOverrides, Config};

/// Runs before logging is initialised, so failures are only reported
/// through the returned error.
pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    Config::load(path, cli_overrides).context("Failed to load configuration")
}
