// ── Command outcomes ──

use serde::Serialize;

use crate::model::OutputUpdate;

/// What became of a set-input command.
///
/// A write is never treated as applied on its own; `Confirmed` means that
/// after the follow-up poll the node's published value is the commanded
/// state, whichever poll published it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "updates", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Input type the adapter does not handle; nothing was written.
    Ignored,
    /// The node's published value matches the commanded state.
    Confirmed(Vec<OutputUpdate>),
    /// The confirmation poll ran but the node still shows another state.
    StillStale(Vec<OutputUpdate>),
    /// Shutdown interrupted the propagation delay; no poll was made.
    Cancelled,
}

impl CommandOutcome {
    /// Wrap the updates of a confirmation poll.
    pub(crate) fn from_poll(confirmed: bool, updates: Vec<OutputUpdate>) -> Self {
        if confirmed {
            Self::Confirmed(updates)
        } else {
            Self::StillStale(updates)
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    /// Updates published by the confirmation poll.
    pub fn updates(&self) -> &[OutputUpdate] {
        match self {
            Self::Confirmed(updates) | Self::StillStale(updates) => updates,
            Self::Ignored | Self::Cancelled => &[],
        }
    }
}
