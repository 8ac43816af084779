//! Firmware entry point for the M5 Atom Matrix build.
//!
//! Wires the hardware adapters to the orchestrator and runs the
//! cooperative main loop: sensor polling and history sampling are
//! time-gated inside the service, the UI ticks every cycle, and the
//! loop yields briefly so the IDLE task keeps the watchdog fed.

use anyhow::Result;
use log::info;

use esp_idf_hal::gpio::{InputPin, PinDriver};
use esp_idf_hal::i2c::{config::Config as I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::FromValueType;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use co2matrix::adapters::access_point::SoftAp;
use co2matrix::adapters::button::GpioButton;
use co2matrix::adapters::matrix::Ws2812Matrix;
use co2matrix::adapters::orientation::Mpu6886Orientation;
use co2matrix::adapters::status_log::LogStatusSink;
use co2matrix::adapters::time::MonotonicClock;
use co2matrix::adapters::uart::UartSensorPort;
use co2matrix::app::ports::Clock;
use co2matrix::app::AppService;
use co2matrix::config::SystemConfig;
use co2matrix::display::Display;
use co2matrix::sensor::SensorLink;

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("CO2Matrix v{} starting", env!("CARGO_PKG_VERSION"));

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let config = SystemConfig::default();

    let uart = UartSensorPort::new()?;
    let sensor = SensorLink::new(uart, config.response_timeout_ms);

    let matrix = Ws2812Matrix::new(peripherals.rmt.channel0, peripherals.pins.gpio27)?;
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio25,
        peripherals.pins.gpio21,
        &I2cConfig::new().baudrate(400.kHz().into()),
    )?;
    let orientation = Mpu6886Orientation::new(i2c)?;
    let display = Display::new(matrix, orientation, config.brightness);

    let button_pin = PinDriver::input(peripherals.pins.gpio39.downgrade_input())?;
    let mut button = GpioButton::new(button_pin);
    let mut access_point = SoftAp::new(peripherals.modem, sysloop, nvs)?;

    let mut clock = MonotonicClock::new();
    let mut sink = LogStatusSink;

    let loop_yield_ms = config.loop_yield_ms;
    let mut app = AppService::new(sensor, display, config);

    app.boot(clock.now_ms());
    app.warmup(&mut clock, &mut sink);

    // Cooperative main loop. After a calibration halt the service stops
    // polling and keeps the error pattern lit; only a power cycle
    // recovers, so the loop just keeps rendering.
    loop {
        let now = clock.now_ms();
        app.sensor_tick(now, &mut sink);
        app.ui_tick(now, &mut button, &mut access_point);
        clock.sleep_ms(loop_yield_ms);
    }
}
