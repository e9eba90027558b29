use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A tattoo booking request as submitted from the public booking form.
/// Everything except `status` is immutable after creation; `status` moves
/// through the lifecycle below via the admin status update only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body_part: String,
    pub size: String,
    pub description: String,
    pub requested_date: NaiveDate,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

/// Fields accepted from the public form. Status and creation time are always
/// assigned server-side and are not part of this type.
#[derive(Debug, Clone)]
pub struct NewBookingRequest {
    pub name: String,
    pub email: String,
    pub body_part: String,
    pub size: String,
    pub description: String,
    pub requested_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "approved" => Ok(BookingStatus::Approved),
            "rejected" => Ok(BookingStatus::Rejected),
            _ => Err(AppError::Validation(format!("Invalid status: {s}"))),
        }
    }

    /// The booking lifecycle: a pending request may be approved or rejected,
    /// and both of those states are terminal. Every other combination is
    /// refused without touching the record.
    pub fn transition(current: Self, requested: Self) -> Result<Self, AppError> {
        match (current, requested) {
            (BookingStatus::Pending, BookingStatus::Approved)
            | (BookingStatus::Pending, BookingStatus::Rejected) => Ok(requested),
            _ => Err(AppError::Validation(format!(
                "Cannot change status from {} to {}",
                current.as_str(),
                requested.as_str()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_statuses() {
        assert_eq!(
            BookingStatus::parse("pending").unwrap(),
            BookingStatus::Pending
        );
        assert_eq!(
            BookingStatus::parse("approved").unwrap(),
            BookingStatus::Approved
        );
        assert_eq!(
            BookingStatus::parse("rejected").unwrap(),
            BookingStatus::Rejected
        );
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        assert!(BookingStatus::parse("confirmed").is_err());
        assert!(BookingStatus::parse("PENDING").is_err());
        assert!(BookingStatus::parse("").is_err());
    }

    #[test]
    fn test_transitions_from_pending() {
        assert_eq!(
            BookingStatus::transition(BookingStatus::Pending, BookingStatus::Approved).unwrap(),
            BookingStatus::Approved
        );
        assert_eq!(
            BookingStatus::transition(BookingStatus::Pending, BookingStatus::Rejected).unwrap(),
            BookingStatus::Rejected
        );
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [BookingStatus::Approved, BookingStatus::Rejected] {
            for requested in [
                BookingStatus::Pending,
                BookingStatus::Approved,
                BookingStatus::Rejected,
            ] {
                assert!(BookingStatus::transition(terminal, requested).is_err());
            }
        }
    }

    #[test]
    fn test_pending_to_pending_is_refused() {
        assert!(
            BookingStatus::transition(BookingStatus::Pending, BookingStatus::Pending).is_err()
        );
    }
}
