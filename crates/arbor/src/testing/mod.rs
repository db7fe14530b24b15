//! Helpers for driving a [`Ui`](crate::Ui) in tests: a harness that speaks host input, and probe
//! widgets that log what they receive.

/// Host-input harness.
mod harness;
/// Event-logging widgets.
mod probe;

pub use harness::Harness;
pub use probe::{EventLog, Probe, event_log};

pub use crate::backend::record::{DrawLog, DrawOp, RecordingBackend};
