//! HTTP handlers for the read-only admin catalog

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::models::{Category, User};

use crate::{error::AppResult, services::catalog::CatalogListing, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<CatalogListing<User>>> {
    Ok(Json(state.catalog.users(&query.q).await?))
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<CatalogListing<Category>>> {
    Ok(Json(state.catalog.categories(&query.q).await?))
}
