//! Layered configuration: defaults, dev accounts, TOML file, environment,
//! command line.

use crate::args::CliArgs;
use donut_config::{HarnessConfig, Result};
use tracing::debug;

/// Resolves the run configuration from the process environment.
pub fn resolve_config(args: &CliArgs) -> Result<HarnessConfig> {
    resolve_config_with(args, |key| std::env::var(key).ok())
}

/// Resolves the run configuration with environment lookups going through
/// `lookup`. Dev accounts only fill the funded account, which happens when
/// the account is resolved, so they rank below every other layer.
pub fn resolve_config_with<F>(args: &CliArgs, lookup: F) -> Result<HarnessConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &args.config {
        Some(path) => {
            debug!(target: "donut::config", path = %path.display(), "loading configuration file");
            HarnessConfig::load(path)?
        }
        None => HarnessConfig::default(),
    };
    config.apply_env_with(lookup);
    args.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}
