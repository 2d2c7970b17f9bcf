//! Zero-point offset vectors.
//!
//! The lhs offset is indexed by lhs row, the rhs offset by rhs column. A
//! constant offset is a degenerate broadcast vector; which one a kernel uses
//! is fixed by its type parameters, so the inner loop never branches on it.

/// Per-index integer zero points.
pub trait OffsetVector: Copy + Send + Sync {
    fn at(&self, index: usize) -> i32;

    /// Number of stored entries, `None` for a broadcast.
    fn len(&self) -> Option<usize>;
}

/// The same zero point for every index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConstantOffset(pub i32);

impl OffsetVector for ConstantOffset {
    #[inline(always)]
    fn at(&self, _index: usize) -> i32 {
        self.0
    }

    fn len(&self) -> Option<usize> {
        None
    }
}

/// One zero point per row (lhs) or column (rhs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerIndexOffsets<'a>(&'a [i32]);

impl<'a> PerIndexOffsets<'a> {
    pub fn new(offsets: &'a [i32]) -> Self {
        Self(offsets)
    }

    pub fn as_slice(&self) -> &'a [i32] {
        self.0
    }
}

impl OffsetVector for PerIndexOffsets<'_> {
    #[inline(always)]
    fn at(&self, index: usize) -> i32 {
        self.0[index]
    }

    fn len(&self) -> Option<usize> {
        Some(self.0.len())
    }
}

/// Panics unless `offsets` covers `extent` indices.
pub(crate) fn assert_covers<O: OffsetVector>(offsets: &O, extent: usize, what: &str) {
    if let Some(len) = offsets.len() {
        assert!(
            len >= extent,
            "{what} offsets have {len} entries, need {extent}"
        );
    }
}
