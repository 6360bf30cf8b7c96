//! HTTP handlers for the admin business directory

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppResult,
    services::listing::{DirectoryPage, DirectorySession, ToggleOutcome},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<u32>,
}

impl DirectoryQuery {
    /// Each request carries its own search and page; nothing is kept between calls
    fn session(&self) -> DirectorySession {
        DirectorySession::new(self.q.clone(), self.page.unwrap_or(1))
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Directory page for the requested search and page
pub async fn list_businesses(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> Json<DirectoryPage> {
    Json(state.directory.view(&query.session()))
}

/// Refetch every listing from the store
pub async fn refresh_businesses(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> AppResult<Json<DirectoryPage>> {
    state.directory.refresh().await?;
    Ok(Json(state.directory.view(&query.session())))
}

/// Flip a listing's verification flag
pub async fn toggle_verification(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<ToggleOutcome>> {
    let outcome = state.directory.toggle_verification(business_id).await?;
    Ok(Json(outcome))
}

/// Delete a listing
pub async fn delete_business(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    state.directory.delete(business_id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "Business deleted successfully!".to_string(),
    }))
}
