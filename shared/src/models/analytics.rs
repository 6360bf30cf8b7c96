//! Analytics event models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event tag recorded when a customer submits an enquiry
pub const ENQUIRY_CLICK: &str = "enquiry_click";

/// A recorded business-relevant event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub event_type: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Payload for recording an analytics event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnalyticsEvent {
    pub provider_id: Uuid,
    pub event_type: String,
    pub metadata: serde_json::Value,
}

impl NewAnalyticsEvent {
    pub fn enquiry_click(provider_id: Uuid, customer_name: &str) -> Self {
        Self {
            provider_id,
            event_type: ENQUIRY_CLICK.to_string(),
            metadata: serde_json::json!({ "customer_name": customer_name }),
        }
    }
}
