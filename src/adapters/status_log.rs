//! Status sink that writes snapshots to the serial log as JSON lines.
//!
//! The presentation layer on the other side of the serial port (or a
//! human with a terminal) greps for the `status` prefix and parses the
//! rest of the line.

use log::{info, warn};

use crate::app::ports::StatusSink;
use crate::app::status::StatusSnapshot;

pub struct LogStatusSink;

impl StatusSink for LogStatusSink {
    fn publish(&mut self, status: &StatusSnapshot) {
        match serde_json::to_string(status) {
            Ok(line) => info!("status {line}"),
            Err(err) => warn!("status serialization failed: {err}"),
        }
    }
}
