use thiserror::Error;

pub type NdResult<T> = Result<T, NdError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NdError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Non-positive value for {what}: {value}")]
    NonPositive { what: &'static str, value: f64 },
}
