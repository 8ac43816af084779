//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter        | Implements        | Connects to                |
//! |----------------|-------------------|----------------------------|
//! | `access_point` | AccessPointPort   | ESP-IDF Wi-Fi soft AP      |
//! | `button`       | ButtonPort        | Active-low GPIO            |
//! | `matrix`       | MatrixPort        | WS2812 chain via RMT       |
//! | `orientation`  | OrientationPort   | MPU6886 accelerometer, I2C |
//! | `status_log`   | StatusSink        | Serial log, JSON lines     |
//! | `time`         | Clock             | ESP high-resolution timer  |
//! | `uart`         | SerialPort        | UART1 to the MH-Z19        |

pub mod button;
pub mod orientation;
pub mod status_log;
pub mod time;

#[cfg(target_os = "espidf")]
pub mod access_point;
#[cfg(target_os = "espidf")]
pub mod matrix;
#[cfg(target_os = "espidf")]
pub mod uart;
