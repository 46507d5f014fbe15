//! Command dispatch: bridges CLI args -> adapter operations -> output formatting.

pub mod config_cmd;
pub mod info;
pub mod nodes;
pub mod poll;
pub mod run;
pub mod status;
pub mod switch;

use std::sync::Arc;

use isylink_core::{Adapter, MemoryPublisher};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a gateway-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    adapter: &Adapter,
    publisher: &Arc<MemoryPublisher>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Run => run::handle(adapter, publisher, global).await,
        Command::Poll => poll::handle(adapter, global).await,
        Command::Nodes => nodes::handle(adapter, global).await,
        Command::Status => status::handle(adapter, global).await,
        Command::Info => info::handle(adapter, global).await,
        Command::Switch(args) => switch::handle(adapter, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
