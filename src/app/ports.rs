//! Ports the orchestration layer depends on.
//!
//! Everything the core needs from the outside world goes through one of
//! these traits, so the whole control flow runs on the host under test
//! with scripted fakes. The `adapters` module provides the device-side
//! implementations.

use crate::app::status::StatusSnapshot;
use crate::display::{DisplayState, Rgb, CELLS};
use crate::sensor::{SensorLink, SerialPort};

/// Monotonic time source plus cooperative yielding.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Never goes backwards.
    fn now_ms(&self) -> u64;

    /// Yield the single execution context for roughly `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);
}

/// Physical LED matrix. One call pushes a complete frame.
pub trait MatrixPort {
    fn commit(&mut self, frame: &[Rgb; CELLS]);
}

/// Which of the four 90-degree quadrants the device currently sits in.
pub trait OrientationPort {
    fn quadrant(&mut self) -> u8;
}

/// Momentary push button, already mapped to logical "pressed".
pub trait ButtonPort {
    fn is_pressed(&mut self) -> bool;
}

/// Wireless access point toggle.
pub trait AccessPointPort {
    fn set_active(&mut self, active: bool);
    fn is_active(&self) -> bool;
}

/// Receiver for published status snapshots. Latest-value semantics:
/// there is no queue, a slow consumer just sees the newest snapshot.
pub trait StatusSink {
    fn publish(&mut self, status: &StatusSnapshot);
}

/// The display surface as seen by the menu controller: it only ever
/// switches states, never renders directly.
pub trait DisplayPort {
    fn set_state(&mut self, state: DisplayState, now_ms: u64);
}

/// Calibration operations the menu can trigger. `true` means the
/// command frame was fully written; the sensor never acknowledges.
pub trait CalibrationPort {
    fn zero_point_calibrate(&mut self) -> bool;
    fn set_calibration_mode(&mut self, enable: bool) -> bool;
}

impl<P: SerialPort> CalibrationPort for SensorLink<P> {
    fn zero_point_calibrate(&mut self) -> bool {
        SensorLink::zero_point_calibrate(self)
    }

    fn set_calibration_mode(&mut self, enable: bool) -> bool {
        SensorLink::set_calibration_mode(self, enable)
    }
}
