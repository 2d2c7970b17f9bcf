//! Output pipeline: post-processing applied to each raw accumulator.
//!
//! A pipeline is `()` (raw `i32` out) or a tuple of stages, each stage
//! consuming the previous stage's output. Stages that depend on the output
//! position know how to re-index themselves when the dispatcher transposes
//! the problem.

use crate::fixed::QuantizedMultiplier;

/// One post-processing step, or a composition of them.
pub trait OutputStage<In>: Clone + Send + Sync {
    type Output: Copy + Send + Sync;

    fn eval(&self, value: In, row: usize, col: usize) -> Self::Output;

    /// The same stage for the transposed output (`row` and `col` swapped).
    fn transposed(&self) -> Self;

    /// Panics if a per-position vector does not cover a `rows x cols` output.
    fn check(&self, _rows: usize, _cols: usize) {}
}

/// Whether a per-position vector is indexed by output row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorShape {
    Row,
    Col,
}

impl VectorShape {
    pub fn transposed(self) -> Self {
        match self {
            VectorShape::Row => VectorShape::Col,
            VectorShape::Col => VectorShape::Row,
        }
    }

    #[inline(always)]
    fn index(self, row: usize, col: usize) -> usize {
        match self {
            VectorShape::Row => row,
            VectorShape::Col => col,
        }
    }

    fn assert_covers(self, len: usize, rows: usize, cols: usize, what: &str) {
        let (extent, axis) = match self {
            VectorShape::Row => (rows, "rows"),
            VectorShape::Col => (cols, "cols"),
        };
        assert!(
            len >= extent,
            "{what} has {len} entries, need {extent} ({axis})"
        );
    }
}

impl<In: Copy + Send + Sync> OutputStage<In> for () {
    type Output = In;

    #[inline(always)]
    fn eval(&self, value: In, _row: usize, _col: usize) -> In {
        value
    }

    fn transposed(&self) -> Self {}
}

/// `value + bias[row]` or `value + bias[col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiasAddition<'a> {
    pub bias: &'a [i32],
    pub shape: VectorShape,
}

impl<'a> BiasAddition<'a> {
    /// One bias per output column (per output channel of `lhs * rhs`).
    pub fn per_col(bias: &'a [i32]) -> Self {
        Self { bias, shape: VectorShape::Col }
    }

    pub fn per_row(bias: &'a [i32]) -> Self {
        Self { bias, shape: VectorShape::Row }
    }
}

impl OutputStage<i32> for BiasAddition<'_> {
    type Output = i32;

    #[inline(always)]
    fn eval(&self, value: i32, row: usize, col: usize) -> i32 {
        value.wrapping_add(self.bias[self.shape.index(row, col)])
    }

    fn transposed(&self) -> Self {
        Self {
            bias: self.bias,
            shape: self.shape.transposed(),
        }
    }

    fn check(&self, rows: usize, cols: usize) {
        self.shape.assert_covers(self.bias.len(), rows, cols, "bias");
    }
}

/// Requantize with a single fixed-point multiplier, then add the result
/// zero point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizeDownByFixedPoint {
    pub multiplier: QuantizedMultiplier,
    pub result_offset: i32,
}

impl OutputStage<i32> for QuantizeDownByFixedPoint {
    type Output = i32;

    #[inline(always)]
    fn eval(&self, value: i32, _row: usize, _col: usize) -> i32 {
        self.multiplier.apply(value).saturating_add(self.result_offset)
    }

    fn transposed(&self) -> Self {
        *self
    }
}

/// Requantize with one multiplier per output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizeDownPerChannel<'a> {
    pub multipliers: &'a [QuantizedMultiplier],
    pub shape: VectorShape,
    pub result_offset: i32,
}

impl OutputStage<i32> for QuantizeDownPerChannel<'_> {
    type Output = i32;

    #[inline(always)]
    fn eval(&self, value: i32, row: usize, col: usize) -> i32 {
        self.multipliers[self.shape.index(row, col)]
            .apply(value)
            .saturating_add(self.result_offset)
    }

    fn transposed(&self) -> Self {
        Self {
            shape: self.shape.transposed(),
            ..*self
        }
    }

    fn check(&self, rows: usize, cols: usize) {
        self.shape
            .assert_covers(self.multipliers.len(), rows, cols, "per-channel multipliers");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clamp {
    pub min: i32,
    pub max: i32,
}

impl OutputStage<i32> for Clamp {
    type Output = i32;

    #[inline(always)]
    fn eval(&self, value: i32, _row: usize, _col: usize) -> i32 {
        value.max(self.min).min(self.max)
    }

    fn transposed(&self) -> Self {
        *self
    }
}

macro_rules! saturating_cast_stage {
    ($(#[$meta:meta])* $name:ident => $ty:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl OutputStage<i32> for $name {
            type Output = $ty;

            #[inline(always)]
            fn eval(&self, value: i32, _row: usize, _col: usize) -> $ty {
                value.clamp(<$ty>::MIN as i32, <$ty>::MAX as i32) as $ty
            }

            fn transposed(&self) -> Self {
                *self
            }
        }
    };
}

saturating_cast_stage!(
    /// Clamp to `0..=255` and narrow.
    SaturatingCastToU8 => u8
);
saturating_cast_stage!(SaturatingCastToI8 => i8);
saturating_cast_stage!(SaturatingCastToI16 => i16);

impl<In, A> OutputStage<In> for (A,)
where
    A: OutputStage<In>,
{
    type Output = A::Output;

    #[inline(always)]
    fn eval(&self, value: In, row: usize, col: usize) -> Self::Output {
        self.0.eval(value, row, col)
    }

    fn transposed(&self) -> Self {
        (self.0.transposed(),)
    }

    fn check(&self, rows: usize, cols: usize) {
        self.0.check(rows, cols);
    }
}

impl<In, A, B> OutputStage<In> for (A, B)
where
    A: OutputStage<In>,
    B: OutputStage<A::Output>,
{
    type Output = B::Output;

    #[inline(always)]
    fn eval(&self, value: In, row: usize, col: usize) -> Self::Output {
        let v = self.0.eval(value, row, col);
        self.1.eval(v, row, col)
    }

    fn transposed(&self) -> Self {
        (self.0.transposed(), self.1.transposed())
    }

    fn check(&self, rows: usize, cols: usize) {
        self.0.check(rows, cols);
        self.1.check(rows, cols);
    }
}

impl<In, A, B, C> OutputStage<In> for (A, B, C)
where
    A: OutputStage<In>,
    B: OutputStage<A::Output>,
    C: OutputStage<B::Output>,
{
    type Output = C::Output;

    #[inline(always)]
    fn eval(&self, value: In, row: usize, col: usize) -> Self::Output {
        let v = self.0.eval(value, row, col);
        let v = self.1.eval(v, row, col);
        self.2.eval(v, row, col)
    }

    fn transposed(&self) -> Self {
        (self.0.transposed(), self.1.transposed(), self.2.transposed())
    }

    fn check(&self, rows: usize, cols: usize) {
        self.0.check(rows, cols);
        self.1.check(rows, cols);
        self.2.check(rows, cols);
    }
}

impl<In, A, B, C, D> OutputStage<In> for (A, B, C, D)
where
    A: OutputStage<In>,
    B: OutputStage<A::Output>,
    C: OutputStage<B::Output>,
    D: OutputStage<C::Output>,
{
    type Output = D::Output;

    #[inline(always)]
    fn eval(&self, value: In, row: usize, col: usize) -> Self::Output {
        let v = self.0.eval(value, row, col);
        let v = self.1.eval(v, row, col);
        let v = self.2.eval(v, row, col);
        self.3.eval(v, row, col)
    }

    fn transposed(&self) -> Self {
        (
            self.0.transposed(),
            self.1.transposed(),
            self.2.transposed(),
            self.3.transposed(),
        )
    }

    fn check(&self, rows: usize, cols: usize) {
        self.0.check(rows, cols);
        self.1.check(rows, cols);
        self.2.check(rows, cols);
        self.3.check(rows, cols);
    }
}

impl<In, A, B, C, D, E> OutputStage<In> for (A, B, C, D, E)
where
    A: OutputStage<In>,
    B: OutputStage<A::Output>,
    C: OutputStage<B::Output>,
    D: OutputStage<C::Output>,
    E: OutputStage<D::Output>,
{
    type Output = E::Output;

    #[inline(always)]
    fn eval(&self, value: In, row: usize, col: usize) -> Self::Output {
        let v = self.0.eval(value, row, col);
        let v = self.1.eval(v, row, col);
        let v = self.2.eval(v, row, col);
        let v = self.3.eval(v, row, col);
        self.4.eval(v, row, col)
    }

    fn transposed(&self) -> Self {
        (
            self.0.transposed(),
            self.1.transposed(),
            self.2.transposed(),
            self.3.transposed(),
            self.4.transposed(),
        )
    }

    fn check(&self, rows: usize, cols: usize) {
        self.0.check(rows, cols);
        self.1.check(rows, cols);
        self.2.check(rows, cols);
        self.3.check(rows, cols);
        self.4.check(rows, cols);
    }
}
