//! dsp-kernels: numeric kernels for fixed-function DSP targets.
//!
//! This crate provides:
//! - **Table-driven approximations**: `ln`, `log2`, `log10` and `exp` with
//!   range reduction, compiled-in minimax tables and bit-exact NaN sentinels
//! - **Fixed-point primitives**: gemmlowp-style rounding multiplies and
//!   requantization multipliers
//! - **Shape-aware GEMM**: zero-point offsets, tuple output pipelines and a
//!   dispatcher that transposes wide problems once
//!
//! # Quick Start
//!
//! ```
//! use dsp_kernels::approx::ln_f32;
//! use dsp_kernels::gemm::{gemm_f32, MatrixView, MatrixViewMut};
//!
//! assert_eq!(ln_f32(1.0), 0.0);
//!
//! let a = [1.0f32, 2.0, 3.0, 4.0];
//! let mut c = [0.0f32; 4];
//! gemm_f32(
//!     MatrixView::row_major(&a, 2, 2).unwrap(),
//!     MatrixView::row_major(&a, 2, 2).unwrap(),
//!     MatrixViewMut::row_major(&mut c, 2, 2).unwrap(),
//! );
//! assert_eq!(c, [7.0, 10.0, 15.0, 22.0]);
//! ```

pub mod approx;
pub mod config;
pub mod error;
pub mod fixed;
pub mod gemm;

pub use config::DispatchConfig;
pub use error::{KernelError, KernelResult};
pub use fixed::{
    multiply_by_quantized_multiplier, q15_mul, quantize_multiplier, rounding_divide_by_pot,
    saturating_rounding_doubling_high_mul, QuantizedMultiplier,
};
pub use gemm::{gemm, gemm_f32, GemmDispatcher};
