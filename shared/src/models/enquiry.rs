//! Customer enquiry models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Follow-up state of an enquiry
///
/// Any status may be set from any other; ordering is left to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "VARCHAR", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum EnquiryStatus {
    #[default]
    New,
    Contacted,
    Closed,
}

impl EnquiryStatus {
    pub const ALL: [EnquiryStatus; 3] = [
        EnquiryStatus::New,
        EnquiryStatus::Contacted,
        EnquiryStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::New => "new",
            EnquiryStatus::Contacted => "contacted",
            EnquiryStatus::Closed => "closed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "new" => Some(EnquiryStatus::New),
            "contacted" => Some(EnquiryStatus::Contacted),
            "closed" => Some(EnquiryStatus::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer's contact request directed at a listed business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Enquiry {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub message: String,
    pub status: EnquiryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalized payload for inserting an enquiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEnquiry {
    pub provider_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    /// `None` when the customer left the field empty
    pub customer_email: Option<String>,
    pub message: String,
    pub status: EnquiryStatus,
}

/// The only mutation an enquiry accepts after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryStatusChange {
    pub status: EnquiryStatus,
    pub updated_at: DateTime<Utc>,
}

impl EnquiryStatusChange {
    pub fn now(status: EnquiryStatus) -> Self {
        Self {
            status,
            updated_at: Utc::now(),
        }
    }
}

/// Input for the status update boundary
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEnquiryStatusInput {
    pub status: EnquiryStatus,
}
