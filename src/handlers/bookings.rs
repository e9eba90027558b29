use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::auth::check_admin;
use crate::handlers::validate_payload;
use crate::models::{parse_calendar_date, BookingRequest, BookingStatus, NewBookingRequest};
use crate::state::AppState;

// GET /api/booking-requests
pub async fn get_booking_requests(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingRequest>>, AppError> {
    check_admin(&headers, &state.config.admin_token)?;

    let db = state.db.lock().unwrap();
    let requests = queries::get_booking_requests(&db)?;
    Ok(Json(requests))
}

// POST /api/booking-requests
//
// Note the absence of status/createdAt: those are server-assigned and never
// accepted from the form.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Body part is required"))]
    pub body_part: String,
    #[validate(length(min = 1, message = "Size is required"))]
    pub size: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub requested_date: String,
}

pub async fn create_booking_request(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBookingPayload>,
) -> Result<(StatusCode, Json<BookingRequest>), AppError> {
    validate_payload(&body)?;
    let requested_date = parse_calendar_date(&body.requested_date)?;

    let new = NewBookingRequest {
        name: body.name,
        email: body.email,
        body_part: body.body_part,
        size: body.size,
        description: body.description,
        requested_date,
    };

    let created = {
        let db = state.db.lock().unwrap();
        queries::create_booking_request(&db, &new)?
    };

    tracing::info!(id = created.id, date = %created.requested_date, "booking request received");
    Ok((StatusCode::CREATED, Json(created)))
}

// PATCH /api/booking-requests/:id/status
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<BookingRequest>, AppError> {
    check_admin(&headers, &state.config.admin_token)?;

    let requested = BookingStatus::parse(&body.status)?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_booking_status(&db, id, requested)?
    };

    tracing::info!(id, status = updated.status.as_str(), "booking status updated");
    Ok(Json(updated))
}
