//! Orientation remapping for the 5x5 matrix.
//!
//! The device can sit in any of four 90-degree quadrants; the renderer
//! draws in logical coordinates and this module maps each logical cell
//! index to the physical pixel index for the current quadrant.
//!
//! Quadrant 0 is identity, 1 and 3 are the transpose+mirror variants,
//! 2 is the 180-degree point reflection.

use super::WIDTH;

/// Map a logical cell index to the physical index for `quadrant`.
/// Anything outside `1..=3` is treated as identity.
pub fn rotate_index(index: usize, quadrant: u8) -> usize {
    let (x, y) = (index % WIDTH, index / WIDTH);
    let (x, y) = rotate_xy(x, y, quadrant);
    x + y * WIDTH
}

fn rotate_xy(x: usize, y: usize, quadrant: u8) -> (usize, usize) {
    let last = WIDTH - 1;
    match quadrant {
        1 => (y, last - x),
        2 => (last - x, last - y),
        3 => (last - y, x),
        _ => (x, y),
    }
}
