//! Published status snapshots.
//!
//! The orchestrator keeps exactly one current snapshot and replaces it
//! wholesale on every update; consumers read the latest value with no
//! queuing or backpressure.

use serde::Serialize;

use crate::display::tiers::Tier;
use crate::sensor::Reading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Warmup,
    WarmupWaiting,
    WarmupCompleted,
    ReadOk,
    ReadFailed,
}

/// One published status value. Reading and classification fields are
/// only present on `ReadOk`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub kind: StatusKind,
    pub timestamp_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ppm: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_status: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<&'static str>,
}

impl StatusSnapshot {
    /// A bare lifecycle event with no reading attached.
    pub fn event(kind: StatusKind, timestamp_ms: u64) -> Self {
        Self {
            kind,
            timestamp_ms,
            ppm: None,
            temperature_c: None,
            sensor_status: None,
            color: None,
            rating: None,
        }
    }

    pub fn read_ok(timestamp_ms: u64, reading: Reading, tier: &Tier) -> Self {
        Self {
            kind: StatusKind::ReadOk,
            timestamp_ms,
            ppm: Some(reading.ppm),
            temperature_c: Some(reading.temperature_c),
            sensor_status: Some(reading.status),
            color: Some(tier.hex),
            rating: Some(tier.rating),
        }
    }

    pub fn read_failed(timestamp_ms: u64) -> Self {
        Self::event(StatusKind::ReadFailed, timestamp_ms)
    }
}
