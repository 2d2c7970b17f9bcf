//! Scalar reference kernels: `extern "C"` naive loops.
//!
//! These serve as the golden reference for `dsp-kernels` tests. Every
//! function is `#[no_mangle] pub extern "C"` so the symbols can also be
//! linked from native test harnesses.
//!
//! This crate is compiled with `opt-level = 1` (configured in the workspace
//! root Cargo.toml) so the reference loops stay in their written order and
//! accumulate exactly as the source reads.

pub mod blas;
pub mod math;
