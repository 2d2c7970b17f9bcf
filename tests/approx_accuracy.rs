//! Dense-grid accuracy of the table-driven approximations.
//!
//! Every approximation is compared against the f64 standard library (and
//! the `scalar-ops` reference for the slice entry points) over:
//! 1. A geometric sweep across the whole finite range, subnormals included
//! 2. A dense linear sweep around 1.0, where the reduced argument is tiny
//! 3. Exact powers of two, where reconstruction must be exact

use dsp_kernels::approx::{
    exp_f32, exp_slice_f32, ln_f32, ln_f64, ln_slice_f32, log10_f32, log10_f64, log2_f32,
    log2_f64,
};
use scalar_ops::math::{scalar_exp, scalar_ln};

const F32_ULPS: f64 = 4.0;
const F64_ULPS: f64 = 2.0;

/// Spacing of f32 values at `v`.
fn ulp_f32(v: f64) -> f64 {
    let v = (v as f32).abs();
    if v == 0.0 {
        return f32::from_bits(1) as f64;
    }
    let next = f32::from_bits(v.to_bits() + 1);
    (next - v) as f64
}

fn ulp_f64(v: f64) -> f64 {
    let v = v.abs();
    if v == 0.0 {
        return f64::from_bits(1);
    }
    f64::from_bits(v.to_bits() + 1) - v
}

/// Geometric sweep over every binade of positive f32, `per_binade` samples each.
fn f32_log_grid(per_binade: u32) -> Vec<f32> {
    let mut xs = Vec::new();
    // Smallest subnormal through the largest finite binade.
    let mut bits = 1u32;
    while bits < 0x0080_0000 {
        xs.push(f32::from_bits(bits));
        bits = bits * 3 + 1;
    }
    for biased in 1..255u32 {
        for step in 0..per_binade {
            let mantissa = (step as u64 * 0x007F_FFFF / per_binade as u64) as u32;
            xs.push(f32::from_bits((biased << 23) | mantissa));
        }
    }
    xs
}

/// Every f32 within `radius` representable steps of 1.0.
fn around_one(radius: u32) -> Vec<f32> {
    let one = 1.0f32.to_bits();
    (one - radius..=one + radius).map(f32::from_bits).collect()
}

fn assert_close_f32(name: &str, x: f32, got: f32, want: f64) {
    assert_within_f32(name, x, got, want, F32_ULPS);
}

fn assert_within_f32(name: &str, x: f32, got: f32, want: f64, ulps: f64) {
    let err = (got as f64 - want).abs();
    let tol = ulps * ulp_f32(want);
    assert!(
        err <= tol,
        "{name}({x:e}) = {got:e}, want {want:e}, error {:.2} ulp",
        err / ulp_f32(want)
    );
}

// =============================================================================
// f32 logarithms
// =============================================================================

#[test]
fn ln_f32_full_range() {
    for x in f32_log_grid(512) {
        assert_close_f32("ln_f32", x, ln_f32(x), (x as f64).ln());
    }
}

#[test]
fn ln_f32_near_one() {
    for x in around_one(20_000) {
        assert_close_f32("ln_f32", x, ln_f32(x), (x as f64).ln());
    }
}

#[test]
fn log2_f32_full_range() {
    for x in f32_log_grid(256).into_iter().chain(around_one(5_000)) {
        assert_close_f32("log2_f32", x, log2_f32(x), (x as f64).log2());
    }
}

#[test]
fn log10_f32_full_range() {
    for x in f32_log_grid(256).into_iter().chain(around_one(5_000)) {
        assert_close_f32("log10_f32", x, log10_f32(x), (x as f64).log10());
    }
}

#[test]
fn log2_f32_is_exact_on_powers_of_two() {
    for e in -149..=127 {
        let x = 2f64.powi(e) as f32;
        assert_eq!(log2_f32(x), e as f32, "log2_f32(2^{e})");
    }
}

#[test]
fn ln_of_one_is_zero_everywhere() {
    assert_eq!(ln_f32(1.0), 0.0);
    assert_eq!(log2_f32(1.0), 0.0);
    assert_eq!(log10_f32(1.0), 0.0);
    assert_eq!(ln_f64(1.0), 0.0);
    assert_eq!(log2_f64(1.0), 0.0);
    assert_eq!(log10_f64(1.0), 0.0);
}

// =============================================================================
// f64 logarithms
// =============================================================================

fn f64_log_grid() -> Vec<f64> {
    let mut xs = Vec::new();
    for biased in (1..2047u64).step_by(3) {
        for step in 0..64u64 {
            let mantissa = step * (0x000F_FFFF_FFFF_FFFF / 64);
            xs.push(f64::from_bits((biased << 52) | mantissa));
        }
    }
    let one = 1.0f64.to_bits();
    xs.extend((one - 4_000..=one + 4_000).map(f64::from_bits));
    xs.extend([f64::from_bits(1), f64::from_bits(0x000F_FFFF_FFFF_FFFF), f64::MAX]);
    xs
}

#[test]
fn ln_f64_matches_std() {
    for x in f64_log_grid() {
        let want = x.ln();
        let got = ln_f64(x);
        assert!(
            (got - want).abs() <= F64_ULPS * ulp_f64(want),
            "ln_f64({x:e}) = {got:e}, want {want:e}"
        );
    }
}

#[test]
fn log2_log10_f64_match_std() {
    for x in f64_log_grid() {
        let (want2, want10) = (x.log2(), x.log10());
        let (got2, got10) = (log2_f64(x), log10_f64(x));
        assert!(
            (got2 - want2).abs() <= 2.0 * F64_ULPS * ulp_f64(want2),
            "log2_f64({x:e}) = {got2:e}, want {want2:e}"
        );
        assert!(
            (got10 - want10).abs() <= 2.0 * F64_ULPS * ulp_f64(want10),
            "log10_f64({x:e}) = {got10:e}, want {want10:e}"
        );
    }
}

// =============================================================================
// exp
// =============================================================================

#[test]
fn exp_f32_normal_range() {
    // Outputs stay normal for x above ln(f32::MIN_POSITIVE) ~ -87.3.
    let n = 200_000;
    for i in 0..=n {
        let x = -87.0 + 175.7 * i as f32 / n as f32;
        assert_close_f32("exp_f32", x, exp_f32(x), (x as f64).exp());
    }
}

#[test]
fn exp_f32_small_arguments() {
    for x in around_one(0).into_iter().chain((-2000..=2000).map(|i| i as f32 * 1e-6)) {
        assert_close_f32("exp_f32", x, exp_f32(x), (x as f64).exp());
    }
}

#[test]
fn exp_f32_saturates() {
    assert_eq!(exp_f32(89.0), f32::INFINITY);
    assert_eq!(exp_f32(f32::MAX), f32::INFINITY);
    assert_eq!(exp_f32(-104.0), 0.0);
    assert_eq!(exp_f32(f32::MIN), 0.0);
    let tiny = exp_f32(-100.0);
    assert!(tiny > 0.0 && tiny < f32::MIN_POSITIVE);
}

#[test]
fn exp_f32_subnormal_range() {
    // Results between f32::MIN_POSITIVE and the smallest subnormal.
    let n = 50_000;
    for i in 0..=n {
        let x = -103.9 + (103.9 - 87.4) * i as f32 / n as f32;
        let want = (x as f64).exp() as f32;
        let got = exp_f32(x);
        let err = (got as f64 - want as f64).abs();
        assert!(
            err <= 2.0 * f32::from_bits(1) as f64,
            "exp_f32({x:e}) = {got:e} ({:#010x}), want {want:e} ({:#010x})",
            got.to_bits(),
            want.to_bits()
        );
    }
}

// =============================================================================
// Slice entry points against the scalar references
// =============================================================================

#[test]
fn slices_track_scalar_references() {
    let input: Vec<f32> = (1..=4096).map(|i| i as f32 * 0.037).collect();

    let mut reference = vec![0.0f32; input.len()];
    let mut got = vec![0.0f32; input.len()];
    scalar_ln(input.as_ptr(), reference.as_mut_ptr(), input.len());
    ln_slice_f32(&input, &mut got);
    for ((x, g), r) in input.iter().zip(&got).zip(&reference) {
        // The reference is itself rounded to f32.
        assert_within_f32("ln_slice_f32", *x, *g, *r as f64, F32_ULPS + 1.0);
    }

    let exps: Vec<f32> = input.iter().map(|x| x - 80.0).collect();
    scalar_exp(exps.as_ptr(), reference.as_mut_ptr(), exps.len());
    exp_slice_f32(&exps, &mut got);
    for ((x, g), r) in exps.iter().zip(&got).zip(&reference) {
        assert_within_f32("exp_slice_f32", *x, *g, *r as f64, F32_ULPS + 1.0);
    }
}
