//! CO2 concentration tiers.
//!
//! Five ascending ppm buckets, each mapped to an LED color, a hex string
//! for the status interface, and a human-readable rating. The first tier
//! whose threshold strictly exceeds the ppm wins; readings past the last
//! threshold fall through to "terrible".

use super::Rgb;

/// One ppm bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    /// Exclusive upper bound of this bucket.
    pub threshold: i32,
    pub color: Rgb,
    /// Hex form of `color` at full brightness, as consumed by the
    /// status/presentation layer.
    pub hex: &'static str,
    pub rating: &'static str,
}

/// Ascending tier table. Order is load-bearing for [`classify`].
pub const TIERS: [Tier; 5] = [
    Tier {
        threshold: 500,
        color: (0x00, 0xC0, 0xF0),
        hex: "00C0F0",
        rating: "excellent",
    },
    Tier {
        threshold: 800,
        color: (0x10, 0xD6, 0x53),
        hex: "10D653",
        rating: "good",
    },
    Tier {
        threshold: 1000,
        color: (0xFF, 0xFD, 0x13),
        hex: "FFFD13",
        rating: "okay",
    },
    Tier {
        threshold: 1400,
        color: (0xFF, 0x6B, 0x0F),
        hex: "FF6B0F",
        rating: "bad",
    },
    Tier {
        threshold: i32::MAX,
        color: (0xFF, 0x3C, 0x13),
        hex: "FF3C13",
        rating: "terrible",
    },
];

/// Bucket a ppm reading. Boundaries are exclusive on the lower tier:
/// 499 is "excellent", 500 is "good".
pub fn classify(ppm: i32) -> &'static Tier {
    TIERS
        .iter()
        .find(|t| t.threshold > ppm)
        .unwrap_or(&TIERS[TIERS.len() - 1])
}
