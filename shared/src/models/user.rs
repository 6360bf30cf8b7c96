//! Platform user models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::directory::Searchable;

/// A user account on the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    /// `admin`, `provider`, or a customer role
    pub role: String,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        self.email.iter().chain(self.name.iter()).map(String::as_str).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: String,
    pub city: Option<String>,
}
