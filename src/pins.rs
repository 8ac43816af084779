//! GPIO / peripheral pin assignments for the M5 Atom Matrix carrier.
//!
//! Single source of truth — every adapter references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// MH-Z19B/C CO2 sensor (UART, 9600 8N1)
// ---------------------------------------------------------------------------

/// UART TX towards the sensor's RX pad.
pub const SENSOR_UART_TX_GPIO: i32 = 33;
/// UART RX from the sensor's TX pad.
pub const SENSOR_UART_RX_GPIO: i32 = 23;
/// Fixed sensor baud rate per datasheet.
pub const SENSOR_BAUD_RATE: u32 = 9600;

// ---------------------------------------------------------------------------
// WS2812 5x5 LED matrix
// ---------------------------------------------------------------------------

/// Data line of the on-board 25-pixel WS2812C chain.
pub const MATRIX_DATA_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// MPU6886 accelerometer (I2C)
// ---------------------------------------------------------------------------

pub const IMU_I2C_SDA_GPIO: i32 = 25;
pub const IMU_I2C_SCL_GPIO: i32 = 21;
/// 7-bit I2C address of the MPU6886.
pub const IMU_I2C_ADDR: u8 = 0x68;

// ---------------------------------------------------------------------------
// User button (active-low, on-board, behind the LED matrix)
// ---------------------------------------------------------------------------

/// Input-only GPIO; LOW = pressed. No external pull needed on GPIO 39.
pub const BUTTON_GPIO: i32 = 39;
