//! IEEE-754 sentinel bit patterns.
//!
//! Special values are decoded with `from_bits` only. Any arithmetic on a
//! signaling NaN would quiet it, so the approximation paths return these
//! constants directly instead of propagating the input through math.

use half::f16;

/// Signed NaN variants plus infinities for one float width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinels<B> {
    pub snan: B,
    pub qnan: B,
    pub neg_snan: B,
    pub neg_qnan: B,
    pub pos_inf: B,
    pub neg_inf: B,
}

impl<B: Copy> Sentinels<B> {
    /// NaN pattern for a given sign and quiet bit.
    #[inline]
    pub fn nan(&self, negative: bool, quiet: bool) -> B {
        match (negative, quiet) {
            (false, false) => self.snan,
            (false, true) => self.qnan,
            (true, false) => self.neg_snan,
            (true, true) => self.neg_qnan,
        }
    }
}

pub const F16: Sentinels<u16> = Sentinels {
    snan: 0x7D00,
    qnan: 0x7E00,
    neg_snan: 0xFD00,
    neg_qnan: 0xFE00,
    pos_inf: 0x7C00,
    neg_inf: 0xFC00,
};

pub const F32: Sentinels<u32> = Sentinels {
    snan: 0x7FA0_0000,
    qnan: 0x7FC0_0000,
    neg_snan: 0xFFA0_0000,
    neg_qnan: 0xFFC0_0000,
    pos_inf: 0x7F80_0000,
    neg_inf: 0xFF80_0000,
};

pub const F64: Sentinels<u64> = Sentinels {
    snan: 0x7FF4_0000_0000_0000,
    qnan: 0x7FF8_0000_0000_0000,
    neg_snan: 0xFFF4_0000_0000_0000,
    neg_qnan: 0xFFF8_0000_0000_0000,
    pos_inf: 0x7FF0_0000_0000_0000,
    neg_inf: 0xFFF0_0000_0000_0000,
};

const F16_SIGN: u16 = 0x8000;
const F16_QUIET: u16 = 0x0200;
const F32_SIGN: u32 = 0x8000_0000;
const F32_QUIET: u32 = 0x0040_0000;
const F64_SIGN: u64 = 0x8000_0000_0000_0000;
const F64_QUIET: u64 = 0x0008_0000_0000_0000;

/// Map any NaN bit pattern onto the table sentinel of the same class.
#[inline]
pub fn nan_f32(bits: u32) -> f32 {
    f32::from_bits(F32.nan(bits & F32_SIGN != 0, bits & F32_QUIET != 0))
}

#[inline]
pub fn nan_f64(bits: u64) -> f64 {
    f64::from_bits(F64.nan(bits & F64_SIGN != 0, bits & F64_QUIET != 0))
}

#[inline]
pub fn nan_f16(bits: u16) -> f16 {
    f16::from_bits(F16.nan(bits & F16_SIGN != 0, bits & F16_QUIET != 0))
}

#[inline]
pub fn domain_error_f32() -> f32 {
    f32::from_bits(F32.qnan)
}

#[inline]
pub fn domain_error_f64() -> f64 {
    f64::from_bits(F64.qnan)
}
