use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::auth::check_admin;
use crate::models::{parse_calendar_date, Availability, TimeSlot};
use crate::services::schedule;
use crate::state::AppState;

// GET /api/availability
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Availability>>, AppError> {
    let db = state.db.lock().unwrap();
    let records = queries::get_availability(&db)?;
    Ok(Json(records))
}

// POST /api/availability
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAvailabilityRequest {
    pub date: String,
    pub time_slot: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

pub async fn set_availability(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<SetAvailabilityRequest>,
) -> Result<(StatusCode, Json<Availability>), AppError> {
    check_admin(&headers, &state.config.admin_token)?;

    let date = parse_calendar_date(&body.date)?;
    let slot = TimeSlot::parse(&body.time_slot)?;

    let record = {
        let db = state.db.lock().unwrap();
        queries::set_availability(&db, date, slot, body.is_available)?
    };

    tracing::info!(
        date = %date,
        slot = slot.as_str(),
        available = body.is_available,
        "availability updated"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

// PUT /api/availability/:date
#[derive(Deserialize)]
pub struct ReplaceDayRequest {
    pub slots: Vec<String>,
}

/// Replaces the whole slot selection for one date atomically. This backs the
/// admin calendar's "select slots, click date" gesture.
pub async fn replace_day(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(date): Path<String>,
    Json(body): Json<ReplaceDayRequest>,
) -> Result<Json<Vec<Availability>>, AppError> {
    check_admin(&headers, &state.config.admin_token)?;

    let date = parse_calendar_date(&date)?;
    let mut selected = Vec::with_capacity(body.slots.len());
    for slot in &body.slots {
        selected.push(TimeSlot::parse(slot)?);
    }

    let final_state = {
        let mut db = state.db.lock().unwrap();
        schedule::replace_day(&mut db, date, &selected)?
    };

    tracing::info!(date = %date, slots = ?body.slots, "day availability replaced");
    Ok(Json(final_state))
}
