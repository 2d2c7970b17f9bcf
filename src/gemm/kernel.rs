//! Numeric inner kernels.
//!
//! A kernel computes one output cell from the two operand views. The
//! dispatcher owns the loop order; the kernel only has to know how to
//! describe itself for the transposed problem (`out^T = rhs^T * lhs^T`).

use std::marker::PhantomData;

use super::offsets::{assert_covers, OffsetVector};
use super::pipeline::OutputStage;
use super::view::MatrixView;

pub trait GemmKernel: Send + Sync {
    type Lhs: Copy + Send + Sync;
    type Rhs: Copy + Send + Sync;
    type Out: Copy + Send + Sync;
    type Transposed: GemmKernel<Lhs = Self::Rhs, Rhs = Self::Lhs, Out = Self::Out>;

    /// `out[row][col]` given its current contents.
    fn compute_cell(
        &self,
        lhs: &MatrixView<'_, Self::Lhs>,
        rhs: &MatrixView<'_, Self::Rhs>,
        row: usize,
        col: usize,
        current: Self::Out,
    ) -> Self::Out;

    /// The kernel for the problem with operands swapped and transposed.
    fn transposed(&self) -> Self::Transposed;

    /// Panics if per-index parameters do not cover a `rows x cols` output.
    fn check_operands(&self, _rows: usize, _cols: usize) {}
}

/// `out = alpha * lhs * rhs + beta * out` on f32, accumulated in f64.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatGemm {
    pub alpha: f32,
    pub beta: f32,
}

impl Default for FloatGemm {
    fn default() -> Self {
        Self { alpha: 1.0, beta: 0.0 }
    }
}

impl FloatGemm {
    pub fn new(alpha: f32, beta: f32) -> Self {
        Self { alpha, beta }
    }
}

impl GemmKernel for FloatGemm {
    type Lhs = f32;
    type Rhs = f32;
    type Out = f32;
    type Transposed = FloatGemm;

    #[inline(always)]
    fn compute_cell(
        &self,
        lhs: &MatrixView<'_, f32>,
        rhs: &MatrixView<'_, f32>,
        row: usize,
        col: usize,
        current: f32,
    ) -> f32 {
        let mut sum = 0.0f64;
        for l in 0..lhs.cols() {
            sum += lhs.get(row, l) as f64 * rhs.get(l, col) as f64;
        }
        // beta == 0 must not read `current`: it may hold NaN garbage.
        let prior = if self.beta != 0.0 {
            self.beta as f64 * current as f64
        } else {
            0.0
        };
        (self.alpha as f64 * sum + prior) as f32
    }

    fn transposed(&self) -> FloatGemm {
        *self
    }
}

/// Low-precision operand element, widened to `i32` before offsetting.
pub trait QuantizedOperand: Copy + Send + Sync + 'static {
    fn widen(self) -> i32;
}

impl QuantizedOperand for u8 {
    #[inline(always)]
    fn widen(self) -> i32 {
        self as i32
    }
}

impl QuantizedOperand for i8 {
    #[inline(always)]
    fn widen(self) -> i32 {
        self as i32
    }
}

impl QuantizedOperand for i16 {
    #[inline(always)]
    fn widen(self) -> i32 {
        self as i32
    }
}

/// `out = pipeline(sum_k (lhs - lhs_offset[row]) * (rhs - rhs_offset[col]))`.
///
/// `L` and `R` are the lhs-row and rhs-column offset vectors, `P` the output
/// pipeline. `A` and `B` are the operand element types (u8 by default, the
/// asymmetric-quantization layout).
pub struct QuantizedGemm<L, R, P, A = u8, B = u8> {
    pub lhs_offset: L,
    pub rhs_offset: R,
    pub pipeline: P,
    _operands: PhantomData<fn() -> (A, B)>,
}

impl<L, R, P> QuantizedGemm<L, R, P> {
    pub fn new(lhs_offset: L, rhs_offset: R, pipeline: P) -> Self {
        Self::for_operands(lhs_offset, rhs_offset, pipeline)
    }
}

impl<L, R, P, A, B> QuantizedGemm<L, R, P, A, B> {
    /// Same as [`new`](QuantizedGemm::new) for non-u8 operand types.
    pub fn for_operands(lhs_offset: L, rhs_offset: R, pipeline: P) -> Self {
        Self {
            lhs_offset,
            rhs_offset,
            pipeline,
            _operands: PhantomData,
        }
    }
}

impl<L: Clone, R: Clone, P: Clone, A, B> Clone for QuantizedGemm<L, R, P, A, B> {
    fn clone(&self) -> Self {
        Self::for_operands(
            self.lhs_offset.clone(),
            self.rhs_offset.clone(),
            self.pipeline.clone(),
        )
    }
}

impl<L: std::fmt::Debug, R: std::fmt::Debug, P: std::fmt::Debug, A, B> std::fmt::Debug
    for QuantizedGemm<L, R, P, A, B>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuantizedGemm")
            .field("lhs_offset", &self.lhs_offset)
            .field("rhs_offset", &self.rhs_offset)
            .field("pipeline", &self.pipeline)
            .field("lhs_type", &std::any::type_name::<A>())
            .field("rhs_type", &std::any::type_name::<B>())
            .finish()
    }
}

impl<L, R, P, A, B> QuantizedGemm<L, R, P, A, B>
where
    L: OffsetVector,
    R: OffsetVector,
    A: QuantizedOperand,
    B: QuantizedOperand,
{
    /// Raw offset-corrected dot product for one output cell. Wraps on
    /// overflow like the i32 accumulators it models.
    #[inline(always)]
    pub fn accumulate(
        &self,
        lhs: &MatrixView<'_, A>,
        rhs: &MatrixView<'_, B>,
        row: usize,
        col: usize,
    ) -> i32 {
        let lo = self.lhs_offset.at(row);
        let ro = self.rhs_offset.at(col);
        let mut acc = 0i32;
        for l in 0..lhs.cols() {
            let a = lhs.get(row, l).widen().wrapping_sub(lo);
            let b = rhs.get(l, col).widen().wrapping_sub(ro);
            acc = acc.wrapping_add(a.wrapping_mul(b));
        }
        acc
    }
}

impl<L, R, P, A, B> GemmKernel for QuantizedGemm<L, R, P, A, B>
where
    L: OffsetVector,
    R: OffsetVector,
    P: OutputStage<i32>,
    A: QuantizedOperand,
    B: QuantizedOperand,
{
    type Lhs = A;
    type Rhs = B;
    type Out = P::Output;
    type Transposed = QuantizedGemm<R, L, P, B, A>;

    #[inline(always)]
    fn compute_cell(
        &self,
        lhs: &MatrixView<'_, A>,
        rhs: &MatrixView<'_, B>,
        row: usize,
        col: usize,
        _current: P::Output,
    ) -> P::Output {
        self.pipeline.eval(self.accumulate(lhs, rhs, row, col), row, col)
    }

    fn transposed(&self) -> Self::Transposed {
        QuantizedGemm::for_operands(self.rhs_offset, self.lhs_offset, self.pipeline.transposed())
    }

    fn check_operands(&self, rows: usize, cols: usize) {
        assert_covers(&self.lhs_offset, rows, "lhs");
        assert_covers(&self.rhs_offset, cols, "rhs");
        self.pipeline.check(rows, cols);
    }
}
