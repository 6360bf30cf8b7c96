//! Listing category models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::directory::Searchable;

/// Icon shown when a category names an icon the UI does not know
pub const FALLBACK_CATEGORY_ICON: &str = "Wrench";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}

impl Category {
    pub fn icon_or_fallback(&self) -> &str {
        self.icon
            .as_deref()
            .filter(|icon| !icon.is_empty())
            .unwrap_or(FALLBACK_CATEGORY_ICON)
    }
}

impl Searchable for Category {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}
