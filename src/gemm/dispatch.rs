//! Shape-aware GEMM dispatch.
//!
//! The dispatcher checks the shape contract, drops degenerate problems
//! without touching the output, and transposes wide problems once so the
//! row loop always runs over the larger output dimension. Large problems
//! are split into row blocks on the rayon pool.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use rayon::prelude::*;

use super::kernel::{FloatGemm, GemmKernel};
use super::view::{MatrixView, MatrixViewMut};
use crate::config::DispatchConfig;
use crate::error::KernelResult;

/// Event counters, updated with relaxed atomics.
#[derive(Debug, Default)]
pub struct DispatchStats {
    calls: AtomicU64,
    degenerate: AtomicU64,
    transpositions: AtomicU64,
    parallel_runs: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub calls: u64,
    pub degenerate: u64,
    pub transpositions: u64,
    pub parallel_runs: u64,
}

impl DispatchStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            calls: self.calls.load(Ordering::Relaxed),
            degenerate: self.degenerate.load(Ordering::Relaxed),
            transpositions: self.transpositions.load(Ordering::Relaxed),
            parallel_runs: self.parallel_runs.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.calls.store(0, Ordering::Relaxed);
        self.degenerate.store(0, Ordering::Relaxed);
        self.transpositions.store(0, Ordering::Relaxed);
        self.parallel_runs.store(0, Ordering::Relaxed);
    }

    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Debug)]
pub struct GemmDispatcher {
    config: DispatchConfig,
    stats: DispatchStats,
}

impl Default for GemmDispatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl GemmDispatcher {
    pub fn new(config: DispatchConfig) -> KernelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stats: DispatchStats::default(),
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: DispatchConfig::default(),
            stats: DispatchStats::default(),
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// `out = kernel(lhs * rhs)`.
    ///
    /// # Panics
    ///
    /// If `lhs.cols() != rhs.rows()`, if `out` is not `lhs.rows() x
    /// rhs.cols()`, or if the kernel's per-index parameters are too short
    /// for the output.
    pub fn gemm<K: GemmKernel>(
        &self,
        kernel: &K,
        lhs: MatrixView<'_, K::Lhs>,
        rhs: MatrixView<'_, K::Rhs>,
        out: MatrixViewMut<'_, K::Out>,
    ) {
        DispatchStats::bump(&self.stats.calls);

        assert_eq!(
            lhs.cols(),
            rhs.rows(),
            "inner dimension mismatch: lhs is {}x{}, rhs is {}x{}",
            lhs.rows(),
            lhs.cols(),
            rhs.rows(),
            rhs.cols()
        );
        assert_eq!(
            (out.rows(), out.cols()),
            (lhs.rows(), rhs.cols()),
            "output shape does not match lhs rows x rhs cols"
        );

        let (m, n, k) = (lhs.rows(), rhs.cols(), lhs.cols());
        if m == 0 || n == 0 || k == 0 {
            DispatchStats::bump(&self.stats.degenerate);
            log::trace!("gemm {m}x{n}x{k}: degenerate, nothing to write");
            return;
        }
        kernel.check_operands(m, n);

        if self.config.transpose_bounce && m < n {
            DispatchStats::bump(&self.stats.transpositions);
            log::debug!("gemm {m}x{n}x{k}: transposing to {n}x{m}");
            // After the swap rows >= cols, so this is the only bounce.
            let transposed = kernel.transposed();
            self.run(&transposed, rhs.transposed(), lhs.transposed(), out.transposed());
            return;
        }
        self.run(kernel, lhs, rhs, out);
    }

    fn run<K: GemmKernel>(
        &self,
        kernel: &K,
        lhs: MatrixView<'_, K::Lhs>,
        rhs: MatrixView<'_, K::Rhs>,
        mut out: MatrixViewMut<'_, K::Out>,
    ) {
        let (m, n, k) = (out.rows(), out.cols(), lhs.cols());
        let rows_per_task = self.config.rows_per_task;
        let work = m.saturating_mul(n).saturating_mul(k);

        if work < self.config.parallel_threshold || m <= rows_per_task {
            for r in 0..m {
                for c in 0..n {
                    let value = kernel.compute_cell(&lhs, &rhs, r, c, out.get(r, c));
                    out.set(r, c, value);
                }
            }
            return;
        }

        DispatchStats::bump(&self.stats.parallel_runs);
        let blocks = m.div_ceil(rows_per_task);
        log::debug!("gemm {m}x{n}x{k}: {blocks} row blocks of {rows_per_task}");

        let results: Vec<Vec<K::Out>> = {
            let current = out.as_view();
            (0..blocks)
                .into_par_iter()
                .map(|block| {
                    let start = block * rows_per_task;
                    let end = (start + rows_per_task).min(m);
                    let mut cells = Vec::with_capacity((end - start) * n);
                    for r in start..end {
                        for c in 0..n {
                            cells.push(kernel.compute_cell(&lhs, &rhs, r, c, current.get(r, c)));
                        }
                    }
                    cells
                })
                .collect()
        };

        for (block, cells) in results.into_iter().enumerate() {
            let start = block * rows_per_task;
            for (i, value) in cells.into_iter().enumerate() {
                out.set(start + i / n, i % n, value);
            }
        }
    }
}

static DEFAULT_DISPATCHER: OnceLock<GemmDispatcher> = OnceLock::new();

/// Process-wide dispatcher, configured from the environment on first use.
pub fn default_dispatcher() -> &'static GemmDispatcher {
    DEFAULT_DISPATCHER.get_or_init(|| {
        let config = DispatchConfig::from_env().unwrap_or_else(|err| {
            log::warn!("GEMM dispatch: ignoring environment overrides: {err}");
            DispatchConfig::default()
        });
        GemmDispatcher {
            config,
            stats: DispatchStats::default(),
        }
    })
}

/// [`GemmDispatcher::gemm`] on the default dispatcher.
pub fn gemm<K: GemmKernel>(
    kernel: &K,
    lhs: MatrixView<'_, K::Lhs>,
    rhs: MatrixView<'_, K::Rhs>,
    out: MatrixViewMut<'_, K::Out>,
) {
    default_dispatcher().gemm(kernel, lhs, rhs, out);
}

/// Plain `out = lhs * rhs` in f32.
pub fn gemm_f32(lhs: MatrixView<'_, f32>, rhs: MatrixView<'_, f32>, out: MatrixViewMut<'_, f32>) {
    gemm(&FloatGemm::default(), lhs, rhs, out);
}
