/// GEMM: `C[i][j] = sum_p A[i][p] * B[p][j]` (row-major, f64 accumulation).
///
/// A is [M,K], B is [K,N], C is [M,N]. C is overwritten.
#[no_mangle]
#[inline(never)]
pub extern "C" fn scalar_gemm(
    a: *const f32,
    b: *const f32,
    c: *mut f32,
    m: usize,
    n: usize,
    k: usize,
) {
    unsafe {
        for i in 0..m {
            for j in 0..n {
                let mut acc = 0.0_f64;
                for p in 0..k {
                    acc += *a.add(i * k + p) as f64 * *b.add(p * n + j) as f64;
                }
                *c.add(i * n + j) = acc as f32;
            }
        }
    }
}

/// Quantized GEMM with zero points:
/// `C[i][j] = sum_p (A[i][p] - a_zero) * (B[p][j] - b_zero)` (row-major).
///
/// A is [M,K] u8, B is [K,N] u8, C is [M,N] i32. Accumulation wraps.
#[no_mangle]
#[inline(never)]
pub extern "C" fn scalar_gemm_u8(
    a: *const u8,
    b: *const u8,
    c: *mut i32,
    m: usize,
    n: usize,
    k: usize,
    a_zero: i32,
    b_zero: i32,
) {
    unsafe {
        for i in 0..m {
            for j in 0..n {
                let mut acc = 0_i32;
                for p in 0..k {
                    let x = *a.add(i * k + p) as i32 - a_zero;
                    let y = *b.add(p * n + j) as i32 - b_zero;
                    acc = acc.wrapping_add(x.wrapping_mul(y));
                }
                *c.add(i * n + j) = acc;
            }
        }
    }
}

/// Transpose 2D: `out[j][i] = input[i][j]`
///
/// input is [rows, cols], out is [cols, rows].
#[no_mangle]
#[inline(never)]
pub extern "C" fn scalar_transpose_2d(
    input: *const f32,
    out: *mut f32,
    rows: usize,
    cols: usize,
) {
    unsafe {
        for i in 0..rows {
            for j in 0..cols {
                *out.add(j * rows + i) = *input.add(i * cols + j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_ops_gemm_identity() {
        let a = vec![1.0_f32, 0.0, 0.0, 1.0]; // I
        let b = vec![1.0_f32, 2.0, 3.0, 4.0];
        let mut c = vec![f32::NAN; 4];
        scalar_gemm(a.as_ptr(), b.as_ptr(), c.as_mut_ptr(), 2, 2, 2);
        assert_eq!(c, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_scalar_ops_gemm_small() {
        let a = vec![1.0_f32, 2.0, 3.0, 4.0];
        let b = vec![5.0_f32, 6.0, 7.0, 8.0];
        let mut c = vec![0.0_f32; 4];
        scalar_gemm(a.as_ptr(), b.as_ptr(), c.as_mut_ptr(), 2, 2, 2);
        assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_scalar_ops_gemm_rectangular() {
        let a = vec![1.0_f32, 2.0, 3.0];
        let b = vec![4.0_f32, 5.0, 6.0];
        let mut c = vec![0.0_f32; 1];
        scalar_gemm(a.as_ptr(), b.as_ptr(), c.as_mut_ptr(), 1, 1, 3);
        assert_eq!(c, vec![32.0]);
    }

    #[test]
    fn test_scalar_ops_gemm_u8_zero_points() {
        // A - 128 = [2, 0; -1, 1], B - 1 = [1; 3]
        let a = vec![130_u8, 128, 127, 129];
        let b = vec![2_u8, 4];
        let mut c = vec![0_i32; 2];
        scalar_gemm_u8(a.as_ptr(), b.as_ptr(), c.as_mut_ptr(), 2, 1, 2, 128, 1);
        assert_eq!(c, vec![2, 2]);
    }

    #[test]
    fn test_scalar_ops_gemm_u8_extremes() {
        let a = vec![255_u8; 4];
        let b = vec![0_u8; 4];
        let mut c = vec![0_i32; 4];
        scalar_gemm_u8(a.as_ptr(), b.as_ptr(), c.as_mut_ptr(), 2, 2, 2, 0, 255);
        // 2 * 255 * -255
        assert_eq!(c, vec![-130050; 4]);
    }

    #[test]
    fn test_scalar_ops_transpose_2d() {
        let input = vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0]; // [2,3]
        let mut out = vec![0.0_f32; 6]; // [3,2]
        scalar_transpose_2d(input.as_ptr(), out.as_mut_ptr(), 2, 3);
        assert_eq!(out, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }
}
