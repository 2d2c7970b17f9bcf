//! Logarithms built on [`reduce_log_f32`] / [`reduce_log_f64`].
//!
//! Every entry point is total: special inputs short-circuit to the sentinel
//! chosen during reduction and never reach the polynomial.

use half::f16;

use super::reduce::{reduce_log_f32, reduce_log_f64, LogArgument};
use super::sentinel;
use super::tables::{
    INV_LN10_F64, INV_LN2_HI_F64, INV_LN2_LO_F64, LN2_HI_F32, LN2_HI_F64, LN2_LO_F32,
    LN2_LO_F64, LN_F32, LN_F64, LOG10E_HI_F32, LOG10E_LO_F32, LOG10_2_HI_F32,
    LOG10_2_HI_F64, LOG10_2_LO_F32, LOG10_2_LO_F64, LOG2E_M1_F32,
};

/// `ln(1 + t) - t` without the `-t^2/2` term: `t^3 * P(t)`.
#[inline(always)]
fn ln1p_cubic_f32(t: f32, t2: f32) -> f32 {
    t * (t2 * LN_F32.eval(t))
}

/// `ln(1 + t) - t` on the reduced range.
#[inline(always)]
fn ln1p_tail_f32(t: f32) -> f32 {
    let t2 = t * t;
    ln1p_cubic_f32(t, t2) - 0.5 * t2
}

/// Natural logarithm, f32.
#[inline]
pub fn ln_f32(x: f32) -> f32 {
    match reduce_log_f32(x) {
        LogArgument::Special(v) => v,
        LogArgument::Reduced { exponent, t } => {
            let t2 = t * t;
            let mut y = ln1p_cubic_f32(t, t2);
            let e = exponent as f32;
            if exponent != 0 {
                y += e * LN2_LO_F32;
            }
            y -= 0.5 * t2;
            let mut r = t + y;
            if exponent != 0 {
                r += e * LN2_HI_F32;
            }
            r
        }
    }
}

/// Base-2 logarithm, f32.
#[inline]
pub fn log2_f32(x: f32) -> f32 {
    match reduce_log_f32(x) {
        LogArgument::Special(v) => v,
        LogArgument::Reduced { exponent, t } => {
            let y = ln1p_tail_f32(t);
            let mut r = y * LOG2E_M1_F32;
            r += t * LOG2E_M1_F32;
            r += y;
            r += t;
            r + exponent as f32
        }
    }
}

/// Base-10 logarithm, f32.
#[inline]
pub fn log10_f32(x: f32) -> f32 {
    match reduce_log_f32(x) {
        LogArgument::Special(v) => v,
        LogArgument::Reduced { exponent, t } => {
            let y = ln1p_tail_f32(t);
            let e = exponent as f32;
            let mut r = (t + y) * LOG10E_LO_F32;
            r += y * LOG10E_HI_F32;
            r += t * LOG10E_HI_F32;
            r += e * LOG10_2_LO_F32;
            r + e * LOG10_2_HI_F32
        }
    }
}

/// Natural logarithm of an f16, evaluated through the f32 path.
///
/// NaN inputs keep their class at f16 width instead of going through the
/// (quieting) widening conversion.
#[inline]
pub fn ln_f16(x: f16) -> f16 {
    let bits = x.to_bits();
    if x.is_nan() {
        return sentinel::nan_f16(bits);
    }
    if bits & 0x8000 != 0 && bits & 0x7FFF != 0 {
        return f16::from_bits(sentinel::F16.qnan);
    }
    f16::from_f32(ln_f32(x.to_f32()))
}

/// `ln(1 + f)` on the reduced range, split as `(f, correction)` with
/// `ln(1 + f) = f - correction`.
#[inline(always)]
fn ln1p_parts_f64(f: f64) -> (f64, f64) {
    let s = f / (2.0 + f);
    let z = s * s;
    let r = z * LN_F64.eval(z);
    let hfsq = 0.5 * f * f;
    (hfsq, s * (hfsq + r))
}

/// Natural logarithm, f64.
#[inline]
pub fn ln_f64(x: f64) -> f64 {
    match reduce_log_f64(x) {
        LogArgument::Special(v) => v,
        LogArgument::Reduced { exponent, t } => {
            let k = exponent as f64;
            let (hfsq, tail) = ln1p_parts_f64(t);
            k * LN2_HI_F64 - ((hfsq - (tail + k * LN2_LO_F64)) - t)
        }
    }
}

/// Base-2 logarithm, f64.
#[inline]
pub fn log2_f64(x: f64) -> f64 {
    match reduce_log_f64(x) {
        LogArgument::Special(v) => v,
        LogArgument::Reduced { exponent, t } => {
            let (hfsq, tail) = ln1p_parts_f64(t);
            let ln_m = t - (hfsq - tail);
            ln_m * INV_LN2_LO_F64 + ln_m * INV_LN2_HI_F64 + exponent as f64
        }
    }
}

/// Base-10 logarithm, f64.
#[inline]
pub fn log10_f64(x: f64) -> f64 {
    match reduce_log_f64(x) {
        LogArgument::Special(v) => v,
        LogArgument::Reduced { exponent, t } => {
            let k = exponent as f64;
            let (hfsq, tail) = ln1p_parts_f64(t);
            let ln_m = t - (hfsq - tail);
            k * LOG10_2_LO_F64 + ln_m * INV_LN10_F64 + k * LOG10_2_HI_F64
        }
    }
}

/// Elementwise [`ln_f32`].
pub fn ln_slice_f32(input: &[f32], output: &mut [f32]) {
    assert_eq!(
        input.len(),
        output.len(),
        "input and output lengths differ"
    );
    for (o, &x) in output.iter_mut().zip(input) {
        *o = ln_f32(x);
    }
}
