//! System configuration parameters
//!
//! All tunable parameters for the CO2Matrix indicator. The defaults match
//! the reference deployment (MH-Z19C on an M5 Atom Matrix).

use serde::{Deserialize, Serialize};

/// One ppm sample per minute for eight hours.
pub const HISTORY_CAPACITY: usize = 60 * 8;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Sensor polling ---
    /// Minimum interval between sensor read attempts (milliseconds)
    pub poll_interval_ms: u64,
    /// How long to wait for the 9-byte response frame (milliseconds)
    pub response_timeout_ms: u32,
    /// Consecutive read failures tolerated before the displayed reading
    /// degrades to "unknown" (degradation fires on failure N+1)
    pub max_failed_readings: u32,

    // --- Warm-up ---
    /// Minimum time the warm-up animation runs before polling starts
    /// (milliseconds)
    pub warmup_min_render_ms: u64,

    // --- Display ---
    /// Brightness multiplier applied to every channel (0-255)
    pub brightness: u8,

    // --- History ---
    /// Interval between history ring appends (milliseconds)
    pub history_interval_ms: u64,

    // --- Timing ---
    /// Cooperative yield between UI/render cycles (milliseconds)
    pub loop_yield_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Sensor
            poll_interval_ms: 2000,
            response_timeout_ms: 100,
            max_failed_readings: 5,

            // Warm-up
            warmup_min_render_ms: 6000,

            // Display
            brightness: 20,

            // History
            history_interval_ms: 60_000,

            // Timing
            loop_yield_ms: 10,
        }
    }
}
