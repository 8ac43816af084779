//! Sensor failure types.
//!
//! All variants are `Copy` so they pass through the orchestrator
//! without allocation; adapter initialisation errors stay `anyhow` at
//! the binary boundary instead.

use core::fmt;

/// Transport-level failures surfaced by `SensorLink::poll`.
///
/// Both variants are retryable; the orchestrator decides the retry
/// cadence and when repeated failures degrade the displayed reading to
/// "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFailure {
    /// A full frame arrived but its checksum byte does not match the
    /// computed checksum. The serial channel is reopened before returning.
    ChecksumMismatch,
    /// The sensor sent nothing, or fewer than 9 bytes, within the timeout.
    NoResponse,
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
            Self::NoResponse => write!(f, "no response"),
        }
    }
}
