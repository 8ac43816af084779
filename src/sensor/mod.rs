//! Gas sensor subsystem — wire protocol codec and the UART link driver.
//!
//! The MH-Z19B/C speaks a fixed 9-byte binary protocol at 9600 baud.
//! [`frame`] holds the pure codec (frame layout, checksum, command
//! construction); [`mhz19`] owns the serial channel and implements the
//! poll / calibrate operations on top of it.

pub mod frame;
pub mod mhz19;

pub use mhz19::{Reading, SensorLink};

/// Byte-level serial channel to the sensor.
///
/// Mirrors the semantics of a raw UART: writes and reads report how many
/// bytes actually moved, and a short count is the failure signal. The
/// driver recovers from corruption by asking the port to reconnect.
pub trait SerialPort {
    /// Write `bytes`, returning how many were accepted.
    fn write(&mut self, bytes: &[u8]) -> usize;

    /// Read into `buf`, waiting up to `timeout_ms` for data.
    /// Returns the number of bytes received (possibly zero).
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> usize;

    /// Tear down and reopen the channel, discarding any buffered bytes.
    fn reconnect(&mut self);
}
