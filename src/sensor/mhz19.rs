//! MH-Z19B/C link driver.
//!
//! Owns the serial channel and the most recent reading. Polling is
//! request/response; the calibration commands are fire-and-forget by
//! protocol design (the sensor never acknowledges them), so success is
//! defined as "the full 9-byte frame left the UART".
//!
//! Failure policy: corruption is recovered locally (the channel is
//! reopened) and surfaced as a typed, retryable failure. The caller
//! decides retry cadence and when to degrade the displayed value.

use log::warn;

use crate::error::ReadFailure;

use super::frame::{
    self, CMD_SELF_CALIBRATION, CMD_ZERO_CALIBRATE, FRAME_LEN, READ_COMMAND, SELF_CAL_OFF_ARG,
    SELF_CAL_ON_ARG,
};
use super::SerialPort;

/// Sentinel ppm value meaning "no valid reading yet / reading stale".
pub const PPM_UNKNOWN: i32 = -1;

/// A decoded sensor response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// CO2 concentration in ppm; [`PPM_UNKNOWN`] when invalid.
    pub ppm: i32,
    /// Die temperature in degrees Celsius (undocumented, coarse).
    pub temperature_c: i32,
    /// Raw device status byte (undocumented).
    pub status: u8,
}

impl Reading {
    /// The initial "nothing received yet" value.
    pub const fn unknown() -> Self {
        Self {
            ppm: PPM_UNKNOWN,
            temperature_c: 0,
            status: 0,
        }
    }
}

/// Serial link to the gas sensor.
pub struct SensorLink<P: SerialPort> {
    port: P,
    response_timeout_ms: u32,
    reading: Reading,
}

impl<P: SerialPort> SensorLink<P> {
    pub fn new(port: P, response_timeout_ms: u32) -> Self {
        Self {
            port,
            response_timeout_ms,
            reading: Reading::unknown(),
        }
    }

    /// Most recent successfully decoded reading ([`Reading::unknown`]
    /// before the first success).
    pub fn last_reading(&self) -> Reading {
        self.reading
    }

    /// Force the stored ppm to the unknown sentinel. Used by the
    /// orchestrator after repeated consecutive read failures.
    pub fn mark_unknown(&mut self) {
        self.reading.ppm = PPM_UNKNOWN;
    }

    /// Request and decode one concentration reading.
    pub fn poll(&mut self) -> Result<Reading, ReadFailure> {
        if self.port.write(&READ_COMMAND) != FRAME_LEN {
            return Err(ReadFailure::NoResponse);
        }

        let mut buf = [0u8; FRAME_LEN];
        let received = self.port.read(&mut buf, self.response_timeout_ms);
        if received < FRAME_LEN {
            return Err(ReadFailure::NoResponse);
        }

        if !frame::checksum_valid(&buf) {
            // Reopen the channel: a framing slip would otherwise corrupt
            // every subsequent response too.
            warn!(
                "checksum mismatch: calculated {:#04x}, frame {:02x?}",
                frame::checksum(&buf),
                buf
            );
            self.port.reconnect();
            return Err(ReadFailure::ChecksumMismatch);
        }

        self.reading = Reading {
            ppm: i32::from(buf[2]) * 256 + i32::from(buf[3]),
            temperature_c: i32::from(buf[4]) - 40,
            status: buf[5],
        };
        Ok(self.reading)
    }

    /// Enable or disable automatic baseline correction.
    /// Fire-and-forget; `true` means the full frame was written.
    pub fn set_calibration_mode(&mut self, enable: bool) -> bool {
        let arg = if enable {
            SELF_CAL_ON_ARG
        } else {
            SELF_CAL_OFF_ARG
        };
        self.send_command(CMD_SELF_CALIBRATION, arg)
    }

    /// Calibrate the zero point to the current concentration.
    /// The sensor assumes it is sitting in ~400 ppm fresh air.
    pub fn zero_point_calibrate(&mut self) -> bool {
        self.send_command(CMD_ZERO_CALIBRATE, 0x00)
    }

    fn send_command(&mut self, code: u8, arg: u8) -> bool {
        let cmd = frame::command(code, arg);
        self.port.write(&cmd) == FRAME_LEN
    }

    #[cfg(test)]
    pub(crate) fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}
