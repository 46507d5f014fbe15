// ── Last-known gateway state ──
//
// Immutable snapshots swapped in whole after each successful poll.

mod snapshot;

pub use snapshot::{GatewaySnapshot, SnapshotStore};
