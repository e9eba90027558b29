use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A contact-form inquiry. Created publicly, listed by the admin, never
/// updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}
