//! UART1 channel to the MH-Z19 sensor, via raw ESP-IDF driver calls.

use anyhow::Result;
use esp_idf_hal::delay::TickType;
use esp_idf_svc::sys::{self, esp};
use log::warn;

use crate::pins;
use crate::sensor::SerialPort;

const UART_PORT: sys::uart_port_t = 1;
/// Driver ring buffer; must exceed the 128-byte hardware FIFO.
const RX_BUFFER_BYTES: i32 = 256;

pub struct UartSensorPort(());

impl UartSensorPort {
    /// Install the UART driver on the sensor pins at the fixed
    /// datasheet baud rate (9600 8N1, no flow control).
    pub fn new() -> Result<Self> {
        let config = sys::uart_config_t {
            baud_rate: pins::SENSOR_BAUD_RATE as i32,
            data_bits: sys::uart_word_length_t_UART_DATA_8_BITS,
            parity: sys::uart_parity_t_UART_PARITY_DISABLE,
            stop_bits: sys::uart_stop_bits_t_UART_STOP_BITS_1,
            flow_ctrl: sys::uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
            ..Default::default()
        };
        unsafe {
            esp!(sys::uart_param_config(UART_PORT, &config))?;
            esp!(sys::uart_set_pin(
                UART_PORT,
                pins::SENSOR_UART_TX_GPIO,
                pins::SENSOR_UART_RX_GPIO,
                -1,
                -1,
            ))?;
            esp!(sys::uart_driver_install(
                UART_PORT,
                RX_BUFFER_BYTES,
                0,
                0,
                core::ptr::null_mut(),
                0,
            ))?;
        }
        Ok(Self(()))
    }
}

impl SerialPort for UartSensorPort {
    fn write(&mut self, bytes: &[u8]) -> usize {
        let written =
            unsafe { sys::uart_write_bytes(UART_PORT, bytes.as_ptr().cast(), bytes.len()) };
        if written < 0 {
            0
        } else {
            written as usize
        }
    }

    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> usize {
        let ticks = TickType::new_millis(u64::from(timeout_ms)).ticks();
        let received = unsafe {
            sys::uart_read_bytes(UART_PORT, buf.as_mut_ptr().cast(), buf.len() as u32, ticks)
        };
        if received < 0 {
            0
        } else {
            received as usize
        }
    }

    fn reconnect(&mut self) {
        // Discard anything buffered so a framing slip cannot poison the
        // next response.
        if let Err(err) = unsafe { esp!(sys::uart_flush_input(UART_PORT)) } {
            warn!("uart flush failed: {err}");
        }
    }
}

impl Drop for UartSensorPort {
    fn drop(&mut self) {
        unsafe {
            sys::uart_driver_delete(UART_PORT);
        }
    }
}
