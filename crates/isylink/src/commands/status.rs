//! Live status values.

use isylink_core::{Adapter, CoreError};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Clone, Serialize, Tabled)]
struct StatusRow {
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Formatted")]
    formatted: String,
    #[tabled(rename = "Unit")]
    uom: String,
}

pub async fn handle(adapter: &Adapter, global: &GlobalOpts) -> Result<(), CliError> {
    let status = adapter
        .client()
        .fetch_status()
        .await
        .map_err(CoreError::from)?;

    let rows: Vec<StatusRow> = status
        .iter()
        .flat_map(|(node, props)| {
            props.iter().map(move |p| StatusRow {
                node: node.to_owned(),
                property: p.id.clone(),
                value: p.value.clone(),
                formatted: p.formatted.clone(),
                uom: p.uom.clone(),
            })
        })
        .collect();

    let out = output::render_list(
        &global.output,
        &rows,
        StatusRow::clone,
        |r| format!("{}\t{}\t{}", r.node, r.property, r.value),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
