use thiserror::Error;

pub type FvResult<T> = Result<T, FvError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FvError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}
