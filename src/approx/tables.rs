//! Compiled-in coefficient tables and reconstruction constants.
//!
//! All polynomial tables are minimax fits (Cephes for the f32 paths, fdlibm
//! for the f64 logarithm), stored highest degree first for [`Polynomial::eval`].

use super::poly::Polynomial;

// ── ln, f32 (Cephes logf) ───────────────────────────────────────────────────

/// `ln(1+t) = t - t^2/2 + t^3 * P(t)` for `t + 1` in `[sqrt(0.5), sqrt(2))`.
pub const LN_F32: Polynomial<f32, 9> = Polynomial::new([
    7.037_683_629_2e-2,
    -1.151_461_031_0e-1,
    1.167_699_874_0e-1,
    -1.242_014_084_6e-1,
    1.424_932_278_7e-1,
    -1.666_805_766_5e-1,
    2.000_071_476_5e-1,
    -2.499_999_399_3e-1,
    3.333_333_117_4e-1,
]);

/// sqrt(0.5): lower edge of the reduced mantissa domain.
pub const SQRT_HALF_F32: f32 = core::f32::consts::FRAC_1_SQRT_2;
/// ln(2) split so that `e * LN2_HI_F32` is exact for any f32 exponent.
pub const LN2_HI_F32: f32 = 0.693_359_375;
pub const LN2_LO_F32: f32 = -2.121_944_4e-4;

/// log2(e) - 1.
pub const LOG2E_M1_F32: f32 = 0.442_695_040_888_963_4;

/// log10(e) and log10(2), each split into an exact head and a tail.
pub const LOG10E_HI_F32: f32 = 4.335_937_5e-1;
pub const LOG10E_LO_F32: f32 = 7.007_319_032_518_276e-4;
pub const LOG10_2_HI_F32: f32 = 3.007_812_5e-1;
pub const LOG10_2_LO_F32: f32 = 2.487_456_639_811_952e-4;

// ── exp, f32 (Cephes expf) ──────────────────────────────────────────────────

/// `exp(r) = 1 + r + r^2 * P(r)` for `|r| <= ln(2)/2`.
pub const EXP_F32: Polynomial<f32, 6> = Polynomial::new([
    1.987_569_150_0e-4,
    1.398_199_950_7e-3,
    8.333_451_907_3e-3,
    4.166_579_589_4e-2,
    1.666_666_545_9e-1,
    5.000_000_120_1e-1,
]);

pub const LOG2E_F32: f32 = core::f32::consts::LOG2_E;
/// ln(FLT_MAX): anything above overflows.
pub const EXP_MAX_ARG_F32: f32 = 88.722_839_052_068_35;
/// ln(2^-149): anything below underflows to zero.
pub const EXP_MIN_ARG_F32: f32 = -103.278_929_903_431_85;

// ── ln, f64 (fdlibm e_log) ──────────────────────────────────────────────────

/// `R(z) = z * P(z)` with `s = f / (2 + f)`, `z = s^2`, so that
/// `ln(1+f) = f - f^2/2 + s * (f^2/2 + R(z))`.
pub const LN_F64: Polynomial<f64, 7> = Polynomial::new([
    f64::from_bits(0x3FC2_F112_DF3E_5244), // Lg7
    f64::from_bits(0x3FC3_9A09_D078_C69F), // Lg6
    f64::from_bits(0x3FC7_4664_96CB_03DE), // Lg5
    f64::from_bits(0x3FCC_71C5_1D8E_78AF), // Lg4
    f64::from_bits(0x3FD2_4924_9422_9359), // Lg3
    f64::from_bits(0x3FD9_9999_9997_FA04), // Lg2
    f64::from_bits(0x3FE5_5555_5555_5593), // Lg1
]);

pub const SQRT_HALF_F64: f64 = core::f64::consts::FRAC_1_SQRT_2;
pub const LN2_HI_F64: f64 = f64::from_bits(0x3FE6_2E42_FEE0_0000);
pub const LN2_LO_F64: f64 = f64::from_bits(0x3DEA_39EF_3579_3C76);

/// 1/ln(2) split into head and tail.
pub const INV_LN2_HI_F64: f64 = f64::from_bits(0x3FF7_1547_6520_0000);
pub const INV_LN2_LO_F64: f64 = f64::from_bits(0x3DE7_05FC_2EEF_A200);

/// 1/ln(10) and log10(2) split into head and tail.
pub const INV_LN10_F64: f64 = f64::from_bits(0x3FDB_CB7B_1526_E50E);
pub const LOG10_2_HI_F64: f64 = f64::from_bits(0x3FD3_4413_509F_6000);
pub const LOG10_2_LO_F64: f64 = f64::from_bits(0x3D59_FEF3_11F1_2B36);
