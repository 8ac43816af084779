//! WS2812C 5x5 matrix driven over an RMT channel.
//!
//! Each pixel takes 24 bits, GRB order, most significant bit first.
//! Bit timing per the WS2812 datasheet: a one is ~700 ns high / 600 ns
//! low, a zero ~350 ns high / 800 ns low.

use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::rmt::config::TransmitConfig;
use esp_idf_hal::rmt::{PinState, Pulse, RmtChannel, TxRmtDriver, VariableLengthSignal};
use log::warn;

use crate::app::ports::MatrixPort;
use crate::display::{Rgb, CELLS};

pub struct Ws2812Matrix<'d> {
    tx: TxRmtDriver<'d>,
}

impl<'d> Ws2812Matrix<'d> {
    pub fn new(
        channel: impl Peripheral<P = impl RmtChannel> + 'd,
        pin: impl Peripheral<P = impl OutputPin> + 'd,
    ) -> Result<Self> {
        let config = TransmitConfig::new().clock_divider(1);
        let tx = TxRmtDriver::new(channel, pin, &config)?;
        Ok(Self { tx })
    }

    fn transmit(&mut self, frame: &[Rgb; CELLS]) -> Result<()> {
        let ticks_hz = self.tx.counter_clock()?;
        let t0h = Pulse::new_with_duration(ticks_hz, PinState::High, &Duration::from_nanos(350))?;
        let t0l = Pulse::new_with_duration(ticks_hz, PinState::Low, &Duration::from_nanos(800))?;
        let t1h = Pulse::new_with_duration(ticks_hz, PinState::High, &Duration::from_nanos(700))?;
        let t1l = Pulse::new_with_duration(ticks_hz, PinState::Low, &Duration::from_nanos(600))?;

        let mut signal = VariableLengthSignal::new();
        for (r, g, b) in frame {
            let grb = (u32::from(*g) << 16) | (u32::from(*r) << 8) | u32::from(*b);
            for bit in (0..24).rev() {
                let (high, low) = if grb >> bit & 1 == 1 {
                    (&t1h, &t1l)
                } else {
                    (&t0h, &t0l)
                };
                signal.push([high, low])?;
            }
        }
        self.tx.start_blocking(&signal)?;
        Ok(())
    }
}

impl MatrixPort for Ws2812Matrix<'_> {
    fn commit(&mut self, frame: &[Rgb; CELLS]) {
        // A dropped frame is invisible at the render cadence; the next
        // pass repaints everything anyway.
        if let Err(err) = self.transmit(frame) {
            warn!("matrix refresh failed: {err}");
        }
    }
}
