use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The three bookable slots of a studio day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "morning" => Ok(TimeSlot::Morning),
            "afternoon" => Ok(TimeSlot::Afternoon),
            "evening" => Ok(TimeSlot::Evening),
            _ => Err(AppError::Validation("Invalid time slot".to_string())),
        }
    }
}

/// One (date, slot) availability flag. The store holds at most one row per
/// (date, time_slot) pair; setting an existing pair updates it in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub id: i64,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub is_available: bool,
}

/// Parses a studio-local calendar day. Accepts a plain `YYYY-MM-DD` or a full
/// datetime string, in which case the leading date portion is taken verbatim
/// with no timezone arithmetic.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, AppError> {
    let candidate = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(candidate, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".to_string()))
}
