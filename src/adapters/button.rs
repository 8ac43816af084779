//! Push button on the embedded-hal digital seam, active low.
//!
//! Generic over any [`embedded_hal::digital::InputPin`], so the same
//! adapter wraps an ESP-IDF `PinDriver` on the device and a fake level
//! in host tests. The board's button sits on GPIO 39 (input-only,
//! already pulled up); the level is sampled from the main loop, which
//! is the only debounce needed at a 10 ms tick.

use embedded_hal::digital::InputPin;

use crate::app::ports::ButtonPort;

pub struct GpioButton<P: InputPin> {
    pin: P,
}

impl<P: InputPin> GpioButton<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> ButtonPort for GpioButton<P> {
    fn is_pressed(&mut self) -> bool {
        // A read error counts as not pressed; the next 10 ms sample
        // retries anyway.
        self.pin.is_low().unwrap_or(false)
    }
}
