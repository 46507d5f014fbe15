//! One-shot poll.

use isylink_core::{Adapter, OutputUpdate};
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
pub(crate) struct UpdateRow {
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Output")]
    output: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Render updates with node names taken from the adapter's last snapshot.
pub(crate) fn render_updates(
    adapter: &Adapter,
    updates: &[OutputUpdate],
    global: &GlobalOpts,
) -> Result<String, CliError> {
    let snapshot = adapter.snapshot();
    let color = output::should_color(&global.color);
    output::render_list(
        &global.output,
        updates,
        |u| UpdateRow {
            node: u.node_id.clone(),
            name: snapshot
                .node(&u.node_id)
                .map(|n| n.name.clone())
                .unwrap_or_default(),
            output: format!("{}/{}", u.output_type, u.instance),
            value: output::switch_value(&u.value, color),
        },
        |u| format!("{}\t{}", u.node_id, u.value),
    )
}

pub async fn handle(adapter: &Adapter, global: &GlobalOpts) -> Result<(), CliError> {
    let updates = adapter.poll().await?;
    if updates.is_empty() && !global.quiet {
        eprintln!("No output changes");
        return Ok(());
    }
    let out = render_updates(adapter, &updates, global)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
