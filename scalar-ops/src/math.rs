//! Elementwise transcendental references, evaluated in f64 and rounded once.

/// Natural log: `out[i] = ln(x[i])`
#[no_mangle]
#[inline(never)]
pub extern "C" fn scalar_ln(x: *const f32, out: *mut f32, n: usize) {
    for i in 0..n {
        unsafe {
            *out.add(i) = (*x.add(i) as f64).ln() as f32;
        }
    }
}

/// Exp: `out[i] = exp(x[i])`
#[no_mangle]
#[inline(never)]
pub extern "C" fn scalar_exp(x: *const f32, out: *mut f32, n: usize) {
    for i in 0..n {
        unsafe {
            *out.add(i) = (*x.add(i) as f64).exp() as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_ops_ln() {
        let x = vec![1.0_f32, std::f32::consts::E, 0.5, 0.0, -1.0];
        let mut out = vec![0.0_f32; 5];
        scalar_ln(x.as_ptr(), out.as_mut_ptr(), 5);
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 1.0).abs() < 1e-7);
        assert_eq!(out[2], -std::f32::consts::LN_2);
        assert_eq!(out[3], f32::NEG_INFINITY);
        assert!(out[4].is_nan());
    }

    #[test]
    fn test_scalar_ops_exp() {
        let x = vec![0.0_f32, 1.0, -1.0];
        let mut out = vec![0.0_f32; 3];
        scalar_exp(x.as_ptr(), out.as_mut_ptr(), 3);
        assert_eq!(out[0], 1.0);
        assert_eq!(out[1], std::f32::consts::E);
        assert!((out[2] - (-1.0_f32).exp()).abs() < 1e-7);
    }
}
