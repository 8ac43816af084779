//! LED matrix rendering.
//!
//! A pure state machine from (display state, elapsed time, latest
//! reading, orientation) to a full 25-cell RGB frame. Each render pass
//! draws in logical coordinates, remaps through [`rotation`] for the
//! current device quadrant, and commits the whole frame atomically.

pub mod rotation;
pub mod tiers;

use crate::app::ports::{DisplayPort, MatrixPort, OrientationPort};
use crate::sensor::Reading;

/// Matrix edge length.
pub const WIDTH: usize = 5;
/// Total addressable cells.
pub const CELLS: usize = WIDTH * WIDTH;

/// One RGB triple in the 0-255 channel domain.
pub type Rgb = (u8, u8, u8);

const BLACK: Rgb = (0x00, 0x00, 0x00);
const WHITE: Rgb = (0xFF, 0xFF, 0xFF);
const RED: Rgb = (0xFF, 0x00, 0x00);
const GREEN: Rgb = (0x00, 0xFF, 0x00);
const BLUE: Rgb = (0x00, 0x00, 0xFF);

/// One full sweep of the warm-up progress indicator.
const WARMUP_SWEEP_MS: u64 = 60_000;
/// Duration of the fresh-reading highlight on cell 19.
const FADE_MS: u64 = 1_000;
/// Brightness factor (per mille) for the "no data" pattern.
const NO_DATA_PERMILLE: u32 = 200;

/// The closed set of things the matrix can show. Transitions reset the
/// state entry timestamp, which drives state-relative animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Boot,
    Error,
    Warmup,
    Display,
    SettingCalibration,
    SettingSelfCalOn,
    SettingSelfCalOff,
    AppliedCalibration,
    AppliedSelfCalOn,
    AppliedSelfCalOff,
    WifiOn,
    WifiOff,
}

impl DisplayState {
    /// Accent color shared by the setting/applied pairs: blue for the
    /// zero-calibration option, green for self-cal-on, red for
    /// self-cal-off; Wi-Fi reuses green/red for on/off.
    fn accent(self) -> Rgb {
        match self {
            Self::SettingCalibration | Self::AppliedCalibration => BLUE,
            Self::SettingSelfCalOn | Self::AppliedSelfCalOn | Self::WifiOn => GREEN,
            Self::SettingSelfCalOff | Self::AppliedSelfCalOff | Self::WifiOff => RED,
            _ => BLACK,
        }
    }
}

/// Owns the matrix port and everything needed to draw a frame.
pub struct Display<M: MatrixPort, O: OrientationPort> {
    matrix: M,
    orientation: O,
    brightness: u8,
    state: DisplayState,
    entered_at_ms: u64,
    reading: Reading,
    reading_refreshed_at_ms: Option<u64>,
}

impl<M: MatrixPort, O: OrientationPort> Display<M, O> {
    pub fn new(matrix: M, orientation: O, brightness: u8) -> Self {
        Self {
            matrix,
            orientation,
            brightness,
            state: DisplayState::Boot,
            entered_at_ms: 0,
            reading: Reading::unknown(),
            reading_refreshed_at_ms: None,
        }
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Replace the reading shown in the `Display` state and restart the
    /// fresh-reading highlight.
    pub fn set_reading(&mut self, reading: Reading, now_ms: u64) {
        self.reading = reading;
        self.reading_refreshed_at_ms = Some(now_ms);
    }

    /// Switch states and immediately draw one frame, so no stale image
    /// survives a transition.
    pub fn set_state(&mut self, state: DisplayState, now_ms: u64) {
        self.state = state;
        self.entered_at_ms = now_ms;
        self.render(now_ms);
    }

    /// Draw one frame for the current state and commit it.
    pub fn render(&mut self, now_ms: u64) {
        let mut logical = [BLACK; CELLS];
        let elapsed = now_ms.saturating_sub(self.entered_at_ms);

        match self.state {
            DisplayState::Boot => self.checkerboard(&mut logical, WHITE, BLACK),
            DisplayState::Error => self.checkerboard(&mut logical, RED, BLUE),
            DisplayState::Warmup => self.warmup_sweep(&mut logical, elapsed),
            DisplayState::Display => self.readout(&mut logical, now_ms),
            DisplayState::SettingCalibration
            | DisplayState::SettingSelfCalOn
            | DisplayState::SettingSelfCalOff => {
                logical[0] = self.shade(self.state.accent(), 1000);
            }
            DisplayState::AppliedCalibration
            | DisplayState::AppliedSelfCalOn
            | DisplayState::AppliedSelfCalOff
            | DisplayState::WifiOn
            | DisplayState::WifiOff => {
                logical.fill(self.shade(self.state.accent(), 1000));
            }
        }

        let quadrant = self.orientation.quadrant();
        let mut physical = [BLACK; CELLS];
        for (index, color) in logical.iter().enumerate() {
            physical[rotation::rotate_index(index, quadrant)] = *color;
        }
        self.matrix.commit(&physical);
    }

    fn checkerboard(&self, frame: &mut [Rgb; CELLS], even: Rgb, odd: Rgb) {
        for (index, cell) in frame.iter_mut().enumerate() {
            *cell = if index % 2 == 0 {
                self.shade(even, 1000)
            } else {
                self.shade(odd, 1000)
            };
        }
    }

    fn warmup_sweep(&self, frame: &mut [Rgb; CELLS], elapsed_ms: u64) {
        // progress = (25 * elapsed / 60000) mod 25, i.e. one cell every
        // 2400 ms, wrapping each minute.
        let cell_span = WARMUP_SWEEP_MS / CELLS as u64;
        let position_ms = elapsed_ms % WARMUP_SWEEP_MS;
        let whole = (position_ms / cell_span) as usize;
        let fraction_permille = ((position_ms % cell_span) * 1000 / cell_span) as u32;

        for cell in &mut frame[..whole] {
            *cell = self.shade(WHITE, 1000);
        }
        frame[whole] = self.shade(WHITE, fraction_permille);
    }

    fn readout(&self, frame: &mut [Rgb; CELLS], now_ms: u64) {
        if self.reading.ppm < 0 {
            for (index, cell) in frame[..15].iter_mut().enumerate() {
                let base = if index % 2 == 0 { RED } else { GREEN };
                *cell = self.shade(base, NO_DATA_PERMILLE);
            }
            return;
        }

        let tier = tiers::classify(self.reading.ppm);
        let color = self.shade(tier.color, 1000);
        for cell in &mut frame[..15] {
            *cell = color;
        }

        if let Some(refreshed_at) = self.reading_refreshed_at_ms {
            let age = now_ms.saturating_sub(refreshed_at);
            if age < FADE_MS {
                // Linear decay from 50% to off over one second.
                let permille = ((FADE_MS - age) * 500 / FADE_MS) as u32;
                frame[19] = self.shade(tier.color, permille);
            }
        }

        // Coarse binary readout of ppm/100 on the bottom row, least
        // significant bit at cell 20.
        let bits = (self.reading.ppm / 100) as u32;
        for bit in 0..WIDTH {
            if bits >> bit & 1 == 1 {
                frame[20 + bit] = self.shade(WHITE, 1000);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn matrix_mut(&mut self) -> &mut M {
        &mut self.matrix
    }

    /// Scale a color by the global brightness and an extra per-mille
    /// factor, per channel in integer math.
    fn shade(&self, color: Rgb, permille: u32) -> Rgb {
        let numerator = u32::from(self.brightness) * permille;
        let channel = |c: u8| ((u32::from(c) * numerator) / (255 * 1000)) as u8;
        (channel(color.0), channel(color.1), channel(color.2))
    }
}

impl<M: MatrixPort, O: OrientationPort> DisplayPort for Display<M, O> {
    fn set_state(&mut self, state: DisplayState, now_ms: u64) {
        Display::set_state(self, state, now_ms);
    }
}
