//! Long-running adapter: poll on an interval and stream published values.

use std::sync::Arc;

use isylink_core::{Adapter, MemoryPublisher, OutputValue};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

fn render_value(
    value: &OutputValue,
    global: &GlobalOpts,
    color: bool,
) -> Result<String, CliError> {
    Ok(match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact => serde_json::to_string(value)?,
        OutputFormat::Plain => format!("{}\t{}", value.address, value.value),
        OutputFormat::Table => format!(
            "{}  {}  {}",
            value.timestamp.format("%H:%M:%S"),
            value.address,
            output::switch_value(&value.value, color)
        ),
    })
}

pub async fn handle(
    adapter: &Adapter,
    publisher: &Arc<MemoryPublisher>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let mut values = publisher.subscribe();

    if let Err(e) = adapter.start().await {
        // The polling task keeps retrying on its interval.
        warn!(error = %e, "initial poll failed");
    }
    if !global.quiet {
        eprintln!(
            "Watching {} ({} nodes registered), Ctrl-C to stop",
            adapter.config().gateway,
            publisher.node_count()
        );
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let result = loop {
        tokio::select! {
            _ = &mut shutdown => break Ok(()),
            received = values.recv() => match received {
                Ok(value) => {
                    let line = match render_value(&value, global, color) {
                        Ok(line) => line,
                        Err(e) => break Err(e),
                    };
                    output::print_output(&line, global.quiet);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "output stream lagged");
                }
                Err(RecvError::Closed) => break Ok(()),
            },
        }
    };

    adapter.stop().await;
    result
}
