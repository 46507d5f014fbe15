//! Gateway identity.

use isylink_core::{Adapter, CoreError};
use serde::Serialize;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct InfoView {
    gateway: String,
    app: String,
    version: String,
    platform: String,
    build: String,
    identity: Option<String>,
    model: Option<String>,
    make: Option<String>,
}

pub async fn handle(adapter: &Adapter, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = adapter
        .client()
        .fetch_configuration()
        .await
        .map_err(CoreError::from)?;

    let view = InfoView {
        gateway: adapter.config().gateway.to_string(),
        app: cfg.app.clone(),
        version: cfg.app_version.clone(),
        platform: cfg.platform.clone(),
        build: cfg.build_timestamp.clone(),
        identity: cfg.identity().map(str::to_owned),
        model: cfg.model().map(str::to_owned),
        make: cfg.device_specs.as_ref().map(|s| s.make.clone()),
    };

    let out = output::render_single(
        &global.output,
        &view,
        |v| {
            output::detail_lines(&[
                ("Gateway", v.gateway.clone()),
                ("Model", v.model.clone().unwrap_or_default()),
                ("Make", v.make.clone().unwrap_or_default()),
                ("Identity", v.identity.clone().unwrap_or_default()),
                ("App", v.app.clone()),
                ("Version", v.version.clone()),
                ("Platform", v.platform.clone()),
                ("Built", v.build.clone()),
            ])
        },
        |v| v.version.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
