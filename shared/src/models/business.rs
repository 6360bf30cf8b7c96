//! Business listing models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::directory::Searchable;

/// A listed business as seen by the admin directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Business {
    pub id: Uuid,
    pub business_name: String,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    /// Stable identifier used in public links
    pub slug: String,
}

impl Searchable for Business {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.business_name.as_str()];
        fields.extend(self.city.as_deref());
        fields
    }
}

/// Patch flipping the verification flag of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationChange {
    pub is_verified: bool,
}

/// Payload for registering a listing
///
/// Registration flows live outside the back office; this is used for seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBusiness {
    pub business_name: String,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub is_verified: bool,
    pub slug: String,
}
