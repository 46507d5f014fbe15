//! CLI-aware configuration: applies global flags on top of the file and
//! environment loaded by `isylink-config`.

use isylink_config::Config;
use isylink_core::AdapterConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config file named by `--config` (or the default location)
/// and apply `--gateway`.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = isylink_config::load_config(global.config.as_deref())?;
    if let Some(ref gateway) = global.gateway {
        cfg.gateway_address = Some(gateway.clone());
    }
    Ok(cfg)
}

pub fn build_adapter_config(global: &GlobalOpts) -> Result<AdapterConfig, CliError> {
    let cfg = load(global)?;
    Ok(isylink_config::to_adapter_config(&cfg)?)
}
