//! Read-only admin catalog of users and categories

use std::sync::Arc;

use serde::Serialize;
use shared::directory::filter_records;
use shared::models::{Category, User};

use crate::error::{AppError, AppResult};
use crate::gateway::{CategoryField, Filter, Order, Repository, UserField};

/// Search results with the count behind the "N total" footer
#[derive(Debug, Clone, Serialize)]
pub struct CatalogListing<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> CatalogListing<T> {
    fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

#[derive(Clone)]
pub struct CatalogService {
    users: Arc<dyn Repository<User>>,
    categories: Arc<dyn Repository<Category>>,
}

impl CatalogService {
    pub fn new(users: Arc<dyn Repository<User>>, categories: Arc<dyn Repository<Category>>) -> Self {
        Self { users, categories }
    }

    /// Newest accounts first, matched on email or name
    pub async fn users(&self, query: &str) -> AppResult<CatalogListing<User>> {
        let users = self
            .users
            .select(Filter::all(), Some(Order::desc(UserField::CreatedAt)), None)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "failed to load users");
                AppError::Persistence(format!("Failed to load users: {err}"))
            })?;

        Ok(CatalogListing::new(filter_records(&users, query)))
    }

    /// Alphabetical, matched on name
    pub async fn categories(&self, query: &str) -> AppResult<CatalogListing<Category>> {
        let categories = self
            .categories
            .select(Filter::all(), Some(Order::asc(CategoryField::Name)), None)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "failed to load categories");
                AppError::Persistence(format!("Failed to load categories: {err}"))
            })?;

        Ok(CatalogListing::new(filter_records(&categories, query)))
    }
}
