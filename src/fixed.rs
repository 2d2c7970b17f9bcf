//! Fixed-point primitives for the quantized paths.
//!
//! Rounding is explicit per primitive:
//! - [`rounding_divide_by_pot`]: round half away from zero.
//! - [`saturating_rounding_doubling_high_mul`]: round half toward +inf,
//!   saturating the single overflow case.
//! - [`q15_mul`] / [`rounding_shift_right`]: add half, arithmetic shift
//!   (round half toward +inf), the shift-by-15-then-round convention.

use std::ops::RangeInclusive;

use crate::approx::reduce::frexp_f64;
use crate::error::{KernelError, KernelResult};

/// High 32 bits of `2 * a * b`, rounded; `i32::MIN * i32::MIN` saturates.
#[inline]
pub fn saturating_rounding_doubling_high_mul(a: i32, b: i32) -> i32 {
    if a == b && a == i32::MIN {
        return i32::MAX;
    }
    let ab = a as i64 * b as i64;
    let nudge: i64 = if ab >= 0 { 1 << 30 } else { 1 - (1 << 30) };
    // Division truncates toward zero; with the signed nudge this is
    // floor((ab + 2^30) / 2^31).
    ((ab + nudge) / (1_i64 << 31)) as i32
}

/// `x / 2^exponent`, rounded half away from zero. `exponent` in `0..=31`.
#[inline]
pub fn rounding_divide_by_pot(x: i32, exponent: u32) -> i32 {
    debug_assert!(exponent <= 31, "exponent {exponent} out of range");
    let mask = ((1_i64 << exponent) - 1) as i32;
    let remainder = x & mask;
    let threshold = (mask >> 1) + i32::from(x < 0);
    (x >> exponent) + i32::from(remainder > threshold)
}

/// `(x + 2^(shift-1)) >> shift` in 64-bit, `shift` in `1..=62`.
#[inline]
pub fn rounding_shift_right(x: i64, shift: u32) -> i64 {
    debug_assert!((1..=62).contains(&shift), "shift {shift} out of range");
    (x + (1_i64 << (shift - 1))) >> shift
}

/// Q15 product: `(a * b + 2^14) >> 15`, saturated to `i16`.
#[inline]
pub fn q15_mul(a: i16, b: i16) -> i16 {
    let p = rounding_shift_right(a as i64 * b as i64, 15);
    p.clamp(i16::MIN as i64, i16::MAX as i64) as i16
}

/// Shifts [`multiply_by_quantized_multiplier`] can apply without overflowing
/// the left shift or the rounding divide.
pub const SHIFT_RANGE: RangeInclusive<i32> = -31..=30;

/// A real-valued scale factor encoded as a Q31 multiplier and a power-of-two
/// exponent: `real ~= multiplier / 2^31 * 2^shift`.
///
/// The shift is always within [`SHIFT_RANGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizedMultiplier {
    multiplier: i32,
    shift: i32,
}

impl QuantizedMultiplier {
    pub const IDENTITY: Self = Self {
        multiplier: i32::MAX,
        shift: 0,
    };

    /// Wrap a precomputed multiplier and shift.
    pub fn new(multiplier: i32, shift: i32) -> KernelResult<Self> {
        if !SHIFT_RANGE.contains(&shift) {
            let real = multiplier as f64 / (1_i64 << 31) as f64 * (shift as f64).exp2();
            return Err(KernelError::MultiplierOutOfRange { real, shift });
        }
        Ok(Self { multiplier, shift })
    }

    #[inline]
    pub fn multiplier(&self) -> i32 {
        self.multiplier
    }

    #[inline]
    pub fn shift(&self) -> i32 {
        self.shift
    }

    pub fn from_real(real: f64) -> KernelResult<Self> {
        quantize_multiplier(real)
    }

    /// Apply to an accumulator value.
    #[inline]
    pub fn apply(&self, x: i32) -> i32 {
        multiply_by_quantized_multiplier(x, *self)
    }
}

/// Decompose a positive real scale into a [`QuantizedMultiplier`].
///
/// Scales below `2^-32` collapse to the zero multiplier; scales of `2^30`
/// or more cannot be applied without overflowing the left shift.
pub fn quantize_multiplier(real: f64) -> KernelResult<QuantizedMultiplier> {
    if !real.is_finite() || real <= 0.0 {
        return Err(KernelError::InvalidMultiplier(real));
    }
    let (q, mut shift) = frexp_f64(real);
    let mut q_fixed = (q * (1_i64 << 31) as f64).round() as i64;
    if q_fixed == 1_i64 << 31 {
        q_fixed /= 2;
        shift += 1;
    }
    if shift > *SHIFT_RANGE.end() {
        return Err(KernelError::MultiplierOutOfRange { real, shift });
    }
    if shift < *SHIFT_RANGE.start() {
        return Ok(QuantizedMultiplier {
            multiplier: 0,
            shift: 0,
        });
    }
    Ok(QuantizedMultiplier {
        multiplier: q_fixed as i32,
        shift,
    })
}

/// `x * real` where `real` was encoded by [`quantize_multiplier`].
#[inline]
pub fn multiply_by_quantized_multiplier(x: i32, m: QuantizedMultiplier) -> i32 {
    let left = m.shift.max(0) as u32;
    let right = (-m.shift).max(0) as u32;
    let shifted = x.saturating_mul(1 << left);
    rounding_divide_by_pot(saturating_rounding_doubling_high_mul(shifted, m.multiplier), right)
}
