use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum KernelError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid matrix view: {0}")]
    InvalidView(String),
    #[error("invalid real multiplier {0}: must be finite and positive")]
    InvalidMultiplier(f64),
    #[error("real multiplier {real} out of representable range (shift {shift})")]
    MultiplierOutOfRange { real: f64, shift: i32 },
}

pub type KernelResult<T> = Result<T, KernelError>;
