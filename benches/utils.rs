#![allow(dead_code)]

use rand::Rng;

/// GEMM multiply-accumulate count (one MAC = 2 ops).
pub fn gemm_ops(m: usize, n: usize, k: usize) -> u64 {
    2 * m as u64 * n as u64 * k as u64
}

/// Elementwise bytes read + written for an f32 map.
pub fn elementwise_rw_bytes(n: usize) -> u64 {
    2 * n as u64 * 4
}

/// Random f32 vector in `[lo, hi)`.
pub fn random_f32_vec(n: usize, lo: f32, hi: f32) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(lo..hi)).collect()
}

pub fn random_u8_vec(n: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(0..=255u8)).collect()
}

pub fn random_i8_vec(n: usize) -> Vec<i8> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(-128..=127i8)).collect()
}
