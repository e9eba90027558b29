use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::auth::check_admin;
use crate::handlers::validate_payload;
use crate::models::Inquiry;
use crate::state::AppState;

// GET /api/inquiries
pub async fn get_inquiries(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Inquiry>>, AppError> {
    check_admin(&headers, &state.config.admin_token)?;

    let db = state.db.lock().unwrap();
    let inquiries = queries::get_inquiries(&db)?;
    Ok(Json(inquiries))
}

// POST /api/inquiries
#[derive(Deserialize, Validate)]
pub struct CreateInquiryPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

pub async fn create_inquiry(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateInquiryPayload>,
) -> Result<(StatusCode, Json<Inquiry>), AppError> {
    validate_payload(&body)?;

    let created = {
        let db = state.db.lock().unwrap();
        queries::create_inquiry(&db, &body.name, &body.email, &body.message)?
    };

    tracing::info!(id = created.id, "inquiry received");
    Ok((StatusCode::CREATED, Json(created)))
}
