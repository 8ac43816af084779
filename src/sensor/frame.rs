//! MH-Z19 frame codec.
//!
//! Every exchange with the sensor is exactly nine bytes:
//!
//! | Byte | Meaning                                  |
//! |------|------------------------------------------|
//! | 0    | Start marker `0xFF`                      |
//! | 1    | Sensor address `0x01` (command frames)   |
//! | 2    | Command / response code                  |
//! | 3-7  | Payload (command arg or reported values) |
//! | 8    | Checksum over bytes 1-7                  |
//!
//! The checksum is the two's complement of the low byte of the sum of
//! bytes 1 through 7: sum modulo 256, bitwise invert, plus one.

/// Fixed frame length of the wire protocol.
pub const FRAME_LEN: usize = 9;

/// A raw 9-byte protocol frame.
pub type Frame = [u8; FRAME_LEN];

pub const START_BYTE: u8 = 0xFF;
pub const SENSOR_ADDR: u8 = 0x01;

/// Request the current gas concentration.
pub const CMD_READ: u8 = 0x86;
/// Calibrate the zero point to the current concentration (assumes 400 ppm).
pub const CMD_ZERO_CALIBRATE: u8 = 0x87;
/// Enable/disable automatic baseline correction; arg selects which.
pub const CMD_SELF_CALIBRATION: u8 = 0x79;
pub const SELF_CAL_ON_ARG: u8 = 0xA0;
pub const SELF_CAL_OFF_ARG: u8 = 0x00;

/// The fixed read-request frame, checksum included.
pub const READ_COMMAND: Frame = command(CMD_READ, 0x00);

/// Compute the checksum byte for `frame` (bytes 1-7; the start byte and
/// the checksum slot itself are excluded).
pub const fn checksum(frame: &Frame) -> u8 {
    let mut sum: u8 = 0;
    let mut i = 1;
    while i < FRAME_LEN - 1 {
        sum = sum.wrapping_add(frame[i]);
        i += 1;
    }
    (!sum).wrapping_add(1)
}

/// Whether the checksum slot of `frame` matches its contents.
pub fn checksum_valid(frame: &Frame) -> bool {
    checksum(frame) == frame[FRAME_LEN - 1]
}

/// Build a command frame for `code` with a single argument byte,
/// checksum appended.
pub const fn command(code: u8, arg: u8) -> Frame {
    let mut frame: Frame = [START_BYTE, SENSOR_ADDR, code, arg, 0, 0, 0, 0, 0];
    frame[FRAME_LEN - 1] = checksum(&frame);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_command_matches_datasheet() {
        // The canonical read request from the MH-Z19 datasheet.
        assert_eq!(
            READ_COMMAND,
            [0xFF, 0x01, 0x86, 0x00, 0x00, 0x00, 0x00, 0x00, 0x79]
        );
    }

    #[test]
    fn datasheet_response_vector() {
        // Example response for 608 ppm: 0x02*256 + 0x60.
        let frame: Frame = [0xFF, 0x86, 0x02, 0x60, 0x47, 0x00, 0x00, 0x00, 0xD1];
        assert_eq!(checksum(&frame), 0xD1);
        assert!(checksum_valid(&frame));
    }

    #[test]
    fn corrupt_byte_fails_validation() {
        let mut frame: Frame = [0xFF, 0x86, 0x02, 0x60, 0x47, 0x00, 0x00, 0x00, 0xD1];
        frame[3] ^= 0x10;
        assert!(!checksum_valid(&frame));
    }

    #[test]
    fn every_built_command_self_validates() {
        for code in [CMD_READ, CMD_ZERO_CALIBRATE, CMD_SELF_CALIBRATION] {
            for arg in [0x00, 0xA0, 0xFF] {
                let frame = command(code, arg);
                assert!(checksum_valid(&frame), "code={code:#04x} arg={arg:#04x}");
            }
        }
    }

    #[test]
    fn calibration_commands_are_distinct() {
        let zero = command(CMD_ZERO_CALIBRATE, 0x00);
        let on = command(CMD_SELF_CALIBRATION, SELF_CAL_ON_ARG);
        let off = command(CMD_SELF_CALIBRATION, SELF_CAL_OFF_ARG);
        assert_ne!(zero, on);
        assert_ne!(zero, off);
        assert_ne!(on, off);
    }
}
