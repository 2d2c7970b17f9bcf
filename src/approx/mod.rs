//! Table-driven transcendental approximations.
//!
//! Each function follows the same pipeline:
//! - **Range reduction**: split the input into an exponent and an argument on
//!   the domain the table was fit on (`[sqrt(0.5), sqrt(2))` for logarithms).
//! - **Polynomial**: Horner evaluation of a compiled-in minimax table.
//! - **Reconstruction**: fold the exponent back in with split constants.
//!
//! Special classes (NaN, zero, negative, infinity) never reach the
//! polynomial; they resolve to constants from [`sentinel`]. Every function
//! here is total.

pub mod exp;
pub mod log;
pub mod poly;
pub mod reduce;
pub mod sentinel;
pub mod tables;

pub use exp::{exp_f32, exp_slice_f32};
pub use log::{ln_f16, ln_f32, ln_f64, ln_slice_f32, log10_f32, log10_f64, log2_f32, log2_f64};
pub use poly::Polynomial;
pub use reduce::LogArgument;
pub use sentinel::Sentinels;
