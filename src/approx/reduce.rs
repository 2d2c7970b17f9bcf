//! Range reduction: `x = 2^e * (1 + t)` with `1 + t` in `[sqrt(0.5), sqrt(2))`.

use super::sentinel;
use super::tables::{SQRT_HALF_F32, SQRT_HALF_F64};

/// Outcome of reducing a logarithm argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogArgument<T> {
    /// The input is a special class; this is already the final result.
    Special(T),
    /// Finite positive input, `x = 2^exponent * (1 + t)`.
    Reduced { exponent: i32, t: T },
}

const F32_SIGN: u32 = 0x8000_0000;
const F32_MANTISSA: u32 = 0x007F_FFFF;
const F32_MIN_NORMAL: u32 = 0x0080_0000;
const F32_INF: u32 = 0x7F80_0000;
/// Exponent field of 0.5.
const F32_HALF_EXP: u32 = 0x3F00_0000;
const F32_SUBNORMAL_SHIFT: i32 = 25;

const F64_SIGN: u64 = 0x8000_0000_0000_0000;
const F64_MANTISSA: u64 = 0x000F_FFFF_FFFF_FFFF;
const F64_MIN_NORMAL: u64 = 0x0010_0000_0000_0000;
const F64_INF: u64 = 0x7FF0_0000_0000_0000;
const F64_HALF_EXP: u64 = 0x3FE0_0000_0000_0000;
const F64_SUBNORMAL_SHIFT: i32 = 54;

/// Split `x` into exponent and mantissa in `[0.5, 1)`, as `frexp` does.
/// Subnormals are pre-scaled by `2^25` so their mantissa is normalized.
///
/// `x` must be finite and non-zero; callers classify special values first.
#[inline]
pub(crate) fn frexp_f32(x: f32) -> (f32, i32) {
    let (bits, adjust) = if x.to_bits() & !F32_SIGN < F32_MIN_NORMAL {
        let scaled = x * f32::from_bits(((127 + F32_SUBNORMAL_SHIFT) as u32) << 23);
        (scaled.to_bits(), -F32_SUBNORMAL_SHIFT)
    } else {
        (x.to_bits(), 0)
    };
    let exponent = (((bits >> 23) & 0xFF) as i32) - 126 + adjust;
    let mantissa = f32::from_bits((bits & (F32_SIGN | F32_MANTISSA)) | F32_HALF_EXP);
    (mantissa, exponent)
}

/// [`frexp_f32`] for f64, same precondition.
#[inline]
pub(crate) fn frexp_f64(x: f64) -> (f64, i32) {
    let (bits, adjust) = if x.to_bits() & !F64_SIGN < F64_MIN_NORMAL {
        let scaled = x * f64::from_bits(((1023 + F64_SUBNORMAL_SHIFT) as u64) << 52);
        (scaled.to_bits(), -F64_SUBNORMAL_SHIFT)
    } else {
        (x.to_bits(), 0)
    };
    let exponent = (((bits >> 52) & 0x7FF) as i32) - 1022 + adjust;
    let mantissa = f64::from_bits((bits & (F64_SIGN | F64_MANTISSA)) | F64_HALF_EXP);
    (mantissa, exponent)
}

/// Classify and reduce a logarithm argument.
///
/// NaN maps onto its sentinel, `±0` to `-inf`, negatives to the domain-error
/// NaN and `+inf` to itself. Everything else is reduced.
#[inline]
pub fn reduce_log_f32(x: f32) -> LogArgument<f32> {
    let bits = x.to_bits();
    if x.is_nan() {
        return LogArgument::Special(sentinel::nan_f32(bits));
    }
    if bits & !F32_SIGN == 0 {
        return LogArgument::Special(f32::NEG_INFINITY);
    }
    if bits & F32_SIGN != 0 {
        return LogArgument::Special(sentinel::domain_error_f32());
    }
    if bits == F32_INF {
        return LogArgument::Special(f32::INFINITY);
    }

    let (m, mut exponent) = frexp_f32(x);
    // Both subtractions are exact (Sterbenz).
    let t = if m < SQRT_HALF_F32 {
        exponent -= 1;
        m + m - 1.0
    } else {
        m - 1.0
    };
    LogArgument::Reduced { exponent, t }
}

#[inline]
pub fn reduce_log_f64(x: f64) -> LogArgument<f64> {
    let bits = x.to_bits();
    if x.is_nan() {
        return LogArgument::Special(sentinel::nan_f64(bits));
    }
    if bits & !F64_SIGN == 0 {
        return LogArgument::Special(f64::NEG_INFINITY);
    }
    if bits & F64_SIGN != 0 {
        return LogArgument::Special(sentinel::domain_error_f64());
    }
    if bits == F64_INF {
        return LogArgument::Special(f64::INFINITY);
    }

    let (m, mut exponent) = frexp_f64(x);
    let t = if m < SQRT_HALF_F64 {
        exponent -= 1;
        m + m - 1.0
    } else {
        m - 1.0
    };
    LogArgument::Reduced { exponent, t }
}

/// Multiply `y` by `2^n` without intermediate overflow, stepping through
/// the representable exponent range the way `scalbnf` does.
#[inline]
pub fn scale_by_pow2_f32(mut y: f32, mut n: i32) -> f32 {
    const TWO_P127: f32 = f32::from_bits(0x7F00_0000);
    // 2^-126 * 2^24, keeps subnormal results to a single rounding.
    const TWO_M102: f32 = f32::from_bits(0x0C80_0000);

    if n > 127 {
        y *= TWO_P127;
        n -= 127;
        if n > 127 {
            y *= TWO_P127;
            n -= 127;
            n = n.min(127);
        }
    } else if n < -126 {
        y *= TWO_M102;
        n += 102;
        if n < -126 {
            y *= TWO_M102;
            n += 102;
            n = n.max(-126);
        }
    }
    y * f32::from_bits(((0x7F + n) as u32) << 23)
}
