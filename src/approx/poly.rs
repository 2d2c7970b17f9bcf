//! Horner evaluation over compiled-in coefficient tables.

use std::ops::{Add, Mul};

/// Scalar types a coefficient table can be evaluated in.
pub trait PolyScalar: Copy + Add<Output = Self> + Mul<Output = Self> {
    const ZERO: Self;
}

impl PolyScalar for f32 {
    const ZERO: Self = 0.0;
}

impl PolyScalar for f64 {
    const ZERO: Self = 0.0;
}

/// A fixed-degree polynomial, coefficients ordered from the highest degree
/// down to the constant term.
///
/// Tables built with [`Polynomial::new`] never carry the unit coefficient of
/// the linear term of the function they approximate; the reconstruction step
/// adds that term back exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polynomial<T, const N: usize> {
    coeffs: [T; N],
}

impl<T: PolyScalar, const N: usize> Polynomial<T, N> {
    pub const fn new(coeffs: [T; N]) -> Self {
        Self { coeffs }
    }

    pub const fn degree(&self) -> usize {
        N.saturating_sub(1)
    }

    pub fn coeffs(&self) -> &[T; N] {
        &self.coeffs
    }

    /// Horner's scheme: `((c0 * x + c1) * x + c2) ... + c{N-1}`.
    #[inline(always)]
    pub fn eval(&self, x: T) -> T {
        let mut acc = T::ZERO;
        for &c in &self.coeffs {
            acc = acc * x + c;
        }
        acc
    }
}
