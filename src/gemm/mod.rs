//! Low-precision and float GEMM behind a shape-aware dispatcher.
//!
//! ```
//! use dsp_kernels::gemm::{gemm, ConstantOffset, MatrixView, MatrixViewMut, QuantizedGemm};
//!
//! let lhs = [130u8, 128, 127, 129];
//! let rhs = [2u8, 4];
//! let mut out = [0i32; 2];
//! let kernel = QuantizedGemm::new(ConstantOffset(128), ConstantOffset(1), ());
//! gemm(
//!     &kernel,
//!     MatrixView::row_major(&lhs, 2, 2).unwrap(),
//!     MatrixView::row_major(&rhs, 2, 1).unwrap(),
//!     MatrixViewMut::row_major(&mut out, 2, 1).unwrap(),
//! );
//! assert_eq!(out, [2, 2]);
//! ```

pub mod dispatch;
pub mod kernel;
pub mod offsets;
pub mod pipeline;
pub mod view;

pub use dispatch::{default_dispatcher, gemm, gemm_f32, DispatchStats, GemmDispatcher, StatsSnapshot};
pub use kernel::{FloatGemm, GemmKernel, QuantizedGemm, QuantizedOperand};
pub use offsets::{ConstantOffset, OffsetVector, PerIndexOffsets};
pub use pipeline::{
    BiasAddition, Clamp, OutputStage, QuantizeDownByFixedPoint, QuantizeDownPerChannel,
    SaturatingCastToI16, SaturatingCastToI8, SaturatingCastToU8, VectorShape,
};
pub use view::{MatrixView, MatrixViewMut, Order};
