//! Device orientation from the on-board MPU6886 accelerometer.
//!
//! The quadrant classification is pure and host-testable; the I2C
//! sampling half only exists on the device.

/// Classify a raw acceleration vector into a display quadrant.
///
/// Gravity dominates the reading on a stationary device. Flat on a
/// table (|z| largest) and "standing upright" both map to quadrant 0;
/// resting on the left, bottom or right edge picks the rotation that
/// keeps the image upright.
pub fn quadrant_from_accel(x: i32, y: i32, z: i32) -> u8 {
    let (ax, ay, az) = (x.abs(), y.abs(), z.abs());
    if az >= ax && az >= ay {
        return 0;
    }
    if ax > ay {
        if x > 0 {
            1
        } else {
            3
        }
    } else if y > 0 {
        0
    } else {
        2
    }
}

#[cfg(target_os = "espidf")]
mod mpu6886 {
    use anyhow::Result;
    use esp_idf_hal::delay::BLOCK;
    use esp_idf_hal::i2c::I2cDriver;
    use log::warn;

    use crate::app::ports::OrientationPort;
    use crate::pins;

    use super::quadrant_from_accel;

    const REG_PWR_MGMT_1: u8 = 0x6B;
    const REG_ACCEL_XOUT_H: u8 = 0x3B;

    /// Polls the accelerometer once per render pass. A failed sample
    /// keeps the last known quadrant so the image never flips on a
    /// transient bus error.
    pub struct Mpu6886Orientation<'d> {
        i2c: I2cDriver<'d>,
        last: u8,
    }

    impl<'d> Mpu6886Orientation<'d> {
        pub fn new(mut i2c: I2cDriver<'d>) -> Result<Self> {
            // Clear the sleep bit; the device powers up asleep.
            i2c.write(pins::IMU_I2C_ADDR, &[REG_PWR_MGMT_1, 0x00], BLOCK)?;
            Ok(Self { i2c, last: 0 })
        }

        fn sample(&mut self) -> Result<(i32, i32, i32)> {
            let mut raw = [0u8; 6];
            self.i2c
                .write_read(pins::IMU_I2C_ADDR, &[REG_ACCEL_XOUT_H], &mut raw, BLOCK)?;
            let x = i16::from_be_bytes([raw[0], raw[1]]);
            let y = i16::from_be_bytes([raw[2], raw[3]]);
            let z = i16::from_be_bytes([raw[4], raw[5]]);
            Ok((i32::from(x), i32::from(y), i32::from(z)))
        }
    }

    impl OrientationPort for Mpu6886Orientation<'_> {
        fn quadrant(&mut self) -> u8 {
            match self.sample() {
                Ok((x, y, z)) => {
                    self.last = quadrant_from_accel(x, y, z);
                }
                Err(err) => warn!("accelerometer read failed: {err}"),
            }
            self.last
        }
    }
}

#[cfg(target_os = "espidf")]
pub use mpu6886::Mpu6886Orientation;
