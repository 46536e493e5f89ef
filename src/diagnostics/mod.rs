// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the detail view.
//!
//! Load failures and state changes are recorded twice: as `tracing` events
//! for whoever is listening on the log, and in a memory-bounded ring buffer
//! that the host can inspect or export as JSON lines.
//!
//! - [`CircularBuffer`]: ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: timestamped event
//! - [`DiagnosticsLog`]: the buffer plus the `tracing` bridge

mod buffer;
mod events;
mod log;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use events::{DiagnosticEvent, DiagnosticEventKind};
pub use log::DiagnosticsLog;
