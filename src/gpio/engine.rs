//! Bitfield scatter/gather for the `GPIOx_CRL` / `GPIOx_CRH` pair.
//!
//! Each configuration register holds eight 4-bit fields (lanes), one per pin. These
//! functions spread an 8-pin selection out to one bit or one nibble per lane, and use
//! that to merge a single 4-bit code into any subset of lanes with one
//! read-modify-write, regardless of how many pins are selected. Everything here is a
//! `const fn`, so selections known at build time fold to constants.

/// Width of one pin's field in `CRL` / `CRH`.
pub const LANE_WIDTH: u32 = 4;

/// Pins covered by one configuration register.
pub const PINS_PER_REGISTER: u32 = 8;

/// All four bits of a lane.
pub const FULL_LANE: u8 = 0b1111;

/// Broadcasts a low-order value into all eight lanes.
const LANE_ONES: u32 = 0x1111_1111;

/// Spreads an 8-bit pin selection so bit `i` lands on bit `4 * i`; all other bits are
/// clear. Three shift-mask-or steps, each doubling the gap between groups: 4+4, then
/// 2+2, then 1+1.
#[inline(always)]
pub const fn lane_selector(mask: u8) -> u32 {
    let m = mask as u32;
    let m = ((m & 0xf0) << 12) | (m & 0x0f);
    let m = ((m & 0x000c_000c) << 6) | (m & 0x0003_0003);
    ((m & 0x0202_0202) << 3) | (m & 0x0101_0101)
}

/// Lane `i` of the result is `0xf` if bit `i` of `mask` is set, and `0` otherwise.
#[inline(always)]
pub const fn expand_mask_to_nibbles(mask: u8) -> u32 {
    // Lanes are 4 bits apart, so the multiply can't carry between them.
    lane_selector(mask) * FULL_LANE as u32
}

/// Copies the low nibble of `value` into every lane.
#[inline(always)]
const fn broadcast(value: u8) -> u32 {
    (value as u32 & FULL_LANE as u32) * LANE_ONES
}

/// Returns `current` with the bits of `field` replaced by `value` in every lane that
/// `lanes` selects.
///
/// `lanes` is a nibble mask as produced by [`expand_mask_to_nibbles`]. `field` is the
/// part of the 4-bit code that the attribute owns, e.g. `0b0011` for the speed.
/// Bits outside `field`, and lanes outside `lanes`, keep their value from `current`.
#[inline(always)]
pub const fn merge_masked_field(current: u32, lanes: u32, field: u8, value: u8) -> u32 {
    (current & !(lanes & broadcast(field))) | (lanes & broadcast(value & field))
}

/// Nibble masks for both configuration registers of a 16-pin selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lanes {
    /// `CRL`; pins 0 - 7.
    pub low: u32,
    /// `CRH`; pins 8 - 15.
    pub high: u32,
}

impl Lanes {
    /// Splits a port mask into its two halves and expands each.
    #[inline(always)]
    pub const fn from_mask(mask: u16) -> Self {
        Self {
            low: expand_mask_to_nibbles(mask as u8),
            high: expand_mask_to_nibbles((mask >> 8) as u8),
        }
    }

    /// Lanes for an 8-pin selection that addresses a single register.
    #[inline(always)]
    pub const fn from_half(mask: u8) -> Self {
        Self {
            low: expand_mask_to_nibbles(mask),
            high: 0,
        }
    }
}
