use thiserror::Error;

/// The external value binding rejected a value.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BindingError {
    #[error("value {value} is outside the declared range")]
    OutOfRange {
        value: f64,
        low: Option<f64>,
        high: Option<f64>,
    },
    #[error("value {value} is not an integer")]
    NotIntegral { value: f64 },
}

/// An inline-edit buffer could not be read as a number.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{input:?} is not a number")]
pub struct ParseError {
    pub input: String,
}
