//! Non-owning strided matrix views.
//!
//! A view never owns its buffer; transposing one swaps `rows`/`cols` and
//! flips the storage order over the same memory, so no data moves.

use crate::error::{KernelError, KernelResult};

/// Storage order of a matrix view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    RowMajor,
    ColMajor,
}

impl Order {
    pub fn transposed(self) -> Self {
        match self {
            Order::RowMajor => Order::ColMajor,
            Order::ColMajor => Order::RowMajor,
        }
    }
}

/// Shape and addressing shared by both view flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    rows: usize,
    cols: usize,
    stride: usize,
    order: Order,
}

impl Layout {
    fn new(len: usize, rows: usize, cols: usize, stride: usize, order: Order) -> KernelResult<Self> {
        let (outer, inner) = match order {
            Order::RowMajor => (rows, cols),
            Order::ColMajor => (cols, rows),
        };
        if stride < inner {
            return Err(KernelError::InvalidView(format!(
                "stride {stride} shorter than {order:?} extent {inner}"
            )));
        }
        let required = if outer == 0 || inner == 0 {
            0
        } else {
            (outer - 1)
                .checked_mul(stride)
                .and_then(|v| v.checked_add(inner))
                .ok_or_else(|| KernelError::InvalidView("view extent overflows usize".into()))?
        };
        if len < required {
            return Err(KernelError::InvalidView(format!(
                "{rows}x{cols} {order:?} view with stride {stride} needs {required} elements, buffer has {len}"
            )));
        }
        Ok(Self { rows, cols, stride, order })
    }

    #[inline(always)]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols, "({row}, {col}) outside {}x{}", self.rows, self.cols);
        match self.order {
            Order::RowMajor => row * self.stride + col,
            Order::ColMajor => col * self.stride + row,
        }
    }

    fn transposed(self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
            stride: self.stride,
            order: self.order.transposed(),
        }
    }
}

/// Shared view over a caller buffer.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a, T> {
    data: &'a [T],
    layout: Layout,
}

impl<'a, T: Copy> MatrixView<'a, T> {
    /// Densely packed view (stride equals the contiguous extent).
    pub fn new(data: &'a [T], rows: usize, cols: usize, order: Order) -> KernelResult<Self> {
        let stride = match order {
            Order::RowMajor => cols,
            Order::ColMajor => rows,
        };
        Self::with_stride(data, rows, cols, stride, order)
    }

    pub fn with_stride(
        data: &'a [T],
        rows: usize,
        cols: usize,
        stride: usize,
        order: Order,
    ) -> KernelResult<Self> {
        let layout = Layout::new(data.len(), rows, cols, stride, order)?;
        Ok(Self { data, layout })
    }

    pub fn row_major(data: &'a [T], rows: usize, cols: usize) -> KernelResult<Self> {
        Self::new(data, rows, cols, Order::RowMajor)
    }

    pub fn col_major(data: &'a [T], rows: usize, cols: usize) -> KernelResult<Self> {
        Self::new(data, rows, cols, Order::ColMajor)
    }

    pub fn rows(&self) -> usize {
        self.layout.rows
    }

    pub fn cols(&self) -> usize {
        self.layout.cols
    }

    pub fn stride(&self) -> usize {
        self.layout.stride
    }

    pub fn order(&self) -> Order {
        self.layout.order
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.layout.offset(row, col)]
    }

    /// Same memory, rows and columns swapped.
    pub fn transposed(self) -> MatrixView<'a, T> {
        MatrixView {
            data: self.data,
            layout: self.layout.transposed(),
        }
    }

    /// Copy out in row-major order.
    pub fn to_row_major_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.rows() * self.cols());
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                out.push(self.get(r, c));
            }
        }
        out
    }
}

/// Exclusive view over a caller buffer.
#[derive(Debug)]
pub struct MatrixViewMut<'a, T> {
    data: &'a mut [T],
    layout: Layout,
}

impl<'a, T: Copy> MatrixViewMut<'a, T> {
    pub fn new(data: &'a mut [T], rows: usize, cols: usize, order: Order) -> KernelResult<Self> {
        let stride = match order {
            Order::RowMajor => cols,
            Order::ColMajor => rows,
        };
        Self::with_stride(data, rows, cols, stride, order)
    }

    pub fn with_stride(
        data: &'a mut [T],
        rows: usize,
        cols: usize,
        stride: usize,
        order: Order,
    ) -> KernelResult<Self> {
        let layout = Layout::new(data.len(), rows, cols, stride, order)?;
        Ok(Self { data, layout })
    }

    pub fn row_major(data: &'a mut [T], rows: usize, cols: usize) -> KernelResult<Self> {
        Self::new(data, rows, cols, Order::RowMajor)
    }

    pub fn col_major(data: &'a mut [T], rows: usize, cols: usize) -> KernelResult<Self> {
        Self::new(data, rows, cols, Order::ColMajor)
    }

    pub fn rows(&self) -> usize {
        self.layout.rows
    }

    pub fn cols(&self) -> usize {
        self.layout.cols
    }

    pub fn stride(&self) -> usize {
        self.layout.stride
    }

    pub fn order(&self) -> Order {
        self.layout.order
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.layout.offset(row, col)]
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let idx = self.layout.offset(row, col);
        self.data[idx] = value;
    }

    pub fn as_view(&self) -> MatrixView<'_, T> {
        MatrixView {
            data: &*self.data,
            layout: self.layout,
        }
    }

    /// Shorter-lived exclusive view over the same memory.
    pub fn reborrow(&mut self) -> MatrixViewMut<'_, T> {
        MatrixViewMut {
            data: &mut *self.data,
            layout: self.layout,
        }
    }

    pub fn transposed(self) -> MatrixViewMut<'a, T> {
        MatrixViewMut {
            data: self.data,
            layout: self.layout.transposed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_and_col_major_addressing() {
        let data = [1, 2, 3, 4, 5, 6];
        let rm = MatrixView::row_major(&data, 2, 3).unwrap();
        assert_eq!(rm.get(1, 0), 4);
        assert_eq!(rm.get(0, 2), 3);

        let cm = MatrixView::col_major(&data, 2, 3).unwrap();
        assert_eq!(cm.get(1, 0), 2);
        assert_eq!(cm.get(0, 2), 5);
    }

    #[test]
    fn transpose_is_zero_copy_and_involutive() {
        let data = [1, 2, 3, 4, 5, 6];
        let v = MatrixView::row_major(&data, 2, 3).unwrap();
        let t = v.transposed();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.order(), Order::ColMajor);
        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(v.get(r, c), t.get(c, r));
            }
        }
        let tt = t.transposed();
        assert_eq!(tt.to_row_major_vec(), v.to_row_major_vec());
        assert_eq!(tt.order(), Order::RowMajor);
    }

    #[test]
    fn padded_stride() {
        // 2x2 row-major with one padding column.
        let data = [1, 2, 99, 3, 4];
        let v = MatrixView::with_stride(&data, 2, 2, 3, Order::RowMajor).unwrap();
        assert_eq!(v.to_row_major_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn undersized_buffers_are_rejected() {
        let data = [0_u8; 5];
        assert!(matches!(
            MatrixView::row_major(&data, 2, 3),
            Err(KernelError::InvalidView(_))
        ));
        assert!(MatrixView::with_stride(&data, 2, 3, 2, Order::RowMajor).is_err());
        // Empty views fit any buffer.
        assert!(MatrixView::row_major(&data, 0, 3).is_ok());
        assert!(MatrixView::<u8>::col_major(&[], 4, 0).is_ok());
    }

    #[test]
    fn mutable_view_writes_through_transpose() {
        let mut data = [0_i32; 6];
        {
            let v = MatrixViewMut::row_major(&mut data, 2, 3).unwrap();
            let mut t = v.transposed();
            t.set(2, 1, 7);
            t.set(0, 0, 1);
        }
        assert_eq!(data, [1, 0, 0, 0, 0, 7]);
    }
}
