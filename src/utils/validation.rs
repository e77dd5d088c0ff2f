use validator::Validate;

use crate::errors::AppError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|err| AppError::Validation(err.to_string()))
}

/// Path ids arrive as raw strings; reject anything non-numeric before it
/// reaches a query bind.
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .map_err(|_| AppError::Validation(format!("Id inválido: {}", raw)))
}
