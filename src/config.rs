//! GEMM dispatch configuration.
//!
//! Values come from code (`Default` plus `with_*` setters) or from the
//! environment through [`DispatchConfig::from_env`]:
//!
//! | variable                       | field                |
//! |--------------------------------|----------------------|
//! | `DSPK_GEMM_TRANSPOSE`          | `transpose_bounce`   |
//! | `DSPK_GEMM_PARALLEL_THRESHOLD` | `parallel_threshold` |
//! | `DSPK_GEMM_ROWS_PER_TASK`      | `rows_per_task`      |

use std::str::FromStr;

use crate::error::{KernelError, KernelResult};

pub const ENV_TRANSPOSE: &str = "DSPK_GEMM_TRANSPOSE";
pub const ENV_PARALLEL_THRESHOLD: &str = "DSPK_GEMM_PARALLEL_THRESHOLD";
pub const ENV_ROWS_PER_TASK: &str = "DSPK_GEMM_ROWS_PER_TASK";

/// Tuning knobs for [`GemmDispatcher`](crate::gemm::GemmDispatcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Transpose problems with fewer rows than columns so the outer loop
    /// runs over the larger dimension.
    pub transpose_bounce: bool,
    /// Multiply-accumulate count (`m * n * k`) from which the row loop is
    /// split across the rayon pool. `usize::MAX` keeps everything sequential.
    pub parallel_threshold: usize,
    /// Output rows per parallel task.
    pub rows_per_task: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            transpose_bounce: true,
            parallel_threshold: 1 << 18,
            rows_per_task: 16,
        }
    }
}

impl DispatchConfig {
    /// Never touch the thread pool.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..Self::default()
        }
    }

    pub fn with_transpose_bounce(mut self, enabled: bool) -> Self {
        self.transpose_bounce = enabled;
        self
    }

    pub fn with_parallel_threshold(mut self, macs: usize) -> Self {
        self.parallel_threshold = macs;
        self
    }

    pub fn with_rows_per_task(mut self, rows: usize) -> Self {
        self.rows_per_task = rows;
        self
    }

    pub fn validate(&self) -> KernelResult<()> {
        if self.rows_per_task == 0 {
            return Err(KernelError::InvalidConfig("rows_per_task must be > 0".into()));
        }
        Ok(())
    }

    /// Defaults overridden by any `DSPK_GEMM_*` variables that are set.
    pub fn from_env() -> KernelResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> KernelResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_TRANSPOSE) {
            config.transpose_bounce = parse_bool(ENV_TRANSPOSE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PARALLEL_THRESHOLD) {
            config.parallel_threshold = parse_number(ENV_PARALLEL_THRESHOLD, &raw)?;
        }
        if let Some(raw) = lookup(ENV_ROWS_PER_TASK) {
            config.rows_per_task = parse_number(ENV_ROWS_PER_TASK, &raw)?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_bool(name: &str, raw: &str) -> KernelResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(KernelError::InvalidConfig(format!(
            "{name}: expected a boolean, got {other:?}"
        ))),
    }
}

fn parse_number<T: FromStr>(name: &str, raw: &str) -> KernelResult<T> {
    raw.trim().parse().map_err(|_| {
        KernelError::InvalidConfig(format!("{name}: expected an unsigned integer, got {raw:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = DispatchConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DispatchConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = DispatchConfig::from_lookup(lookup(&[
            (ENV_TRANSPOSE, "off"),
            (ENV_PARALLEL_THRESHOLD, " 4096 "),
            (ENV_ROWS_PER_TASK, "8"),
        ]))
        .unwrap();
        assert!(!config.transpose_bounce);
        assert_eq!(config.parallel_threshold, 4096);
        assert_eq!(config.rows_per_task, 8);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = DispatchConfig::from_lookup(lookup(&[(ENV_TRANSPOSE, "maybe")])).unwrap_err();
        assert!(matches!(err, KernelError::InvalidConfig(_)));
        assert!(DispatchConfig::from_lookup(lookup(&[(ENV_PARALLEL_THRESHOLD, "-3")])).is_err());
        assert!(DispatchConfig::from_lookup(lookup(&[(ENV_ROWS_PER_TASK, "0")])).is_err());
    }

    #[test]
    fn builder_setters() {
        let config = DispatchConfig::sequential()
            .with_transpose_bounce(false)
            .with_rows_per_task(4);
        assert_eq!(config.parallel_threshold, usize::MAX);
        assert!(!config.transpose_bounce);
        assert_eq!(config.rows_per_task, 4);
        assert!(config.validate().is_ok());
    }
}
