//! Exponential, f32, Cody-Waite reduction plus the Cephes degree-5 table.

use super::reduce::scale_by_pow2_f32;
use super::sentinel;
use super::tables::{EXP_F32, EXP_MAX_ARG_F32, EXP_MIN_ARG_F32, LN2_HI_F32, LN2_LO_F32, LOG2E_F32};

/// `e^x`, f32.
///
/// 1. `n = round(x * log2(e))`
/// 2. `r = x - n * ln(2)` with the split constant, exact head first
/// 3. `e^r = 1 + r + r^2 * P(r)`
/// 4. scale by `2^n`
#[inline]
pub fn exp_f32(x: f32) -> f32 {
    if x.is_nan() {
        return sentinel::nan_f32(x.to_bits());
    }
    if x > EXP_MAX_ARG_F32 {
        return f32::INFINITY;
    }
    if x < EXP_MIN_ARG_F32 {
        return 0.0;
    }

    let n = (LOG2E_F32 * x + 0.5).floor();
    let mut r = x - n * LN2_HI_F32;
    r -= n * LN2_LO_F32;

    let r2 = r * r;
    let p = EXP_F32.eval(r) * r2 + r + 1.0;
    scale_by_pow2_f32(p, n as i32)
}

/// Elementwise [`exp_f32`].
pub fn exp_slice_f32(input: &[f32], output: &mut [f32]) {
    assert_eq!(
        input.len(),
        output.len(),
        "input and output lengths differ"
    );
    for (o, &x) in output.iter_mut().zip(input) {
        *o = exp_f32(x);
    }
}
