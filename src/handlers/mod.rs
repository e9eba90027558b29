pub mod auth;
pub mod availability;
pub mod bookings;
pub mod health;
pub mod inquiries;

use validator::Validate;

use crate::errors::AppError;

/// Runs a payload's field validations and folds any failures into one
/// ValidationError message naming each offending field.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let mut parts: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let detail = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field}: {detail}")
            })
            .collect();
        parts.sort();
        AppError::Validation(parts.join("; "))
    })
}
