//! HTTP handlers for the enquiry lifecycle

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use shared::models::UpdateEnquiryStatusInput;
use shared::validation::EnquirySubmission;
use uuid::Uuid;

use crate::{error::AppResult, services::enquiry::EnquiryList, AppState};

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub revalidate: Vec<String>,
}

/// Submit a customer enquiry to a provider
pub async fn submit_enquiry(
    State(state): State<AppState>,
    Json(input): Json<EnquirySubmission>,
) -> AppResult<(StatusCode, Json<SuccessResponse>)> {
    state.enquiries.submit(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse { success: true })))
}

/// List a provider's enquiries, newest first
pub async fn list_provider_enquiries(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> Json<EnquiryList> {
    Json(state.enquiries.list(provider_id).await)
}

/// Move an enquiry to another status
pub async fn update_enquiry_status(
    State(state): State<AppState>,
    Path(enquiry_id): Path<Uuid>,
    Json(input): Json<UpdateEnquiryStatusInput>,
) -> AppResult<Json<StatusUpdateResponse>> {
    let update = state
        .enquiries
        .update_status(enquiry_id, input.status)
        .await?;
    Ok(Json(StatusUpdateResponse {
        success: true,
        revalidate: update.revalidate,
    }))
}
