//! Switch a node through the command translator.

use isylink_core::{Adapter, CommandOutcome, DEFAULT_INSTANCE, InputType};

use crate::cli::{GlobalOpts, SwitchArgs};
use crate::error::CliError;
use crate::output;

use super::poll::render_updates;

pub async fn handle(
    adapter: &Adapter,
    args: SwitchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Registers the gateway's switches and their current values.
    adapter.poll().await?;

    let input = adapter
        .config()
        .addressing
        .input_address(&args.node, &InputType::Switch, DEFAULT_INSTANCE);
    let outcome = adapter.set_input(&input, &args.value).await?;

    if !global.quiet {
        match &outcome {
            CommandOutcome::Confirmed(_) => eprintln!("Node '{}' confirmed", args.node),
            CommandOutcome::StillStale(_) => {
                eprintln!("Node '{}' has not reported the new state yet", args.node);
            }
            CommandOutcome::Ignored | CommandOutcome::Cancelled => {}
        }
    }

    let out = render_updates(adapter, outcome.updates(), global)?;
    if !outcome.updates().is_empty() {
        output::print_output(&out, global.quiet);
    }
    Ok(())
}
