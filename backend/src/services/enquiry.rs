//! Enquiry lifecycle: submit, list per provider, update status

use std::sync::Arc;

use serde::Serialize;
use shared::models::{Enquiry, EnquiryStatus, EnquiryStatusChange, NewAnalyticsEvent};
use shared::validation::{validate_enquiry, EnquirySubmission};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::gateway::{EnquiryField, Filter, Order, Repository};
use crate::services::AnalyticsRecorder;

/// Views to re-render after an enquiry changes status
pub const STATUS_REVALIDATE_PATHS: [&str; 1] = ["/profile"];

/// Enquiries for one provider; a store failure degrades to an empty list
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnquiryList {
    pub enquiries: Vec<Enquiry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a status change
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub enquiry_id: Uuid,
    pub status: EnquiryStatus,
    pub revalidate: Vec<String>,
}

#[derive(Clone)]
pub struct EnquiryService {
    enquiries: Arc<dyn Repository<Enquiry>>,
    analytics: AnalyticsRecorder,
}

impl EnquiryService {
    pub fn new(enquiries: Arc<dyn Repository<Enquiry>>, analytics: AnalyticsRecorder) -> Self {
        Self {
            enquiries,
            analytics,
        }
    }

    /// Validate, persist, then record an `enquiry_click` event
    ///
    /// Invalid input never reaches the store. The result depends only on the
    /// enquiry insert; the analytics outcome is logged and otherwise ignored.
    pub async fn submit(&self, submission: EnquirySubmission) -> AppResult<Enquiry> {
        let new_enquiry = validate_enquiry(&submission)?;
        let provider_id = new_enquiry.provider_id;
        let customer_name = new_enquiry.customer_name.clone();

        let enquiry = self.enquiries.insert(new_enquiry).await.map_err(|err| {
            tracing::error!(%provider_id, error = %err, "failed to persist enquiry");
            AppError::Persistence(err.to_string())
        })?;

        tracing::info!(enquiry_id = %enquiry.id, %provider_id, "enquiry submitted");

        self.analytics
            .record(NewAnalyticsEvent::enquiry_click(provider_id, &customer_name))
            .await;

        Ok(enquiry)
    }

    /// Most recent first
    pub async fn list(&self, provider_id: Uuid) -> EnquiryList {
        let result = self
            .enquiries
            .select(
                Filter::eq(EnquiryField::ProviderId, provider_id),
                Some(Order::desc(EnquiryField::CreatedAt)),
                None,
            )
            .await;

        match result {
            Ok(enquiries) => EnquiryList {
                enquiries,
                error: None,
            },
            Err(err) => {
                tracing::error!(%provider_id, error = %err, "failed to load enquiries");
                EnquiryList {
                    enquiries: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        }
    }

    /// Any status may follow any other
    pub async fn update_status(
        &self,
        enquiry_id: Uuid,
        status: EnquiryStatus,
    ) -> AppResult<StatusUpdate> {
        let affected = self
            .enquiries
            .update(
                EnquiryStatusChange::now(status),
                Filter::eq(EnquiryField::Id, enquiry_id),
            )
            .await
            .map_err(|err| {
                tracing::error!(%enquiry_id, error = %err, "failed to update enquiry status");
                AppError::Persistence(err.to_string())
            })?;

        if affected == 0 {
            return Err(AppError::NotFound("Enquiry".to_string()));
        }

        let revalidate: Vec<String> = STATUS_REVALIDATE_PATHS
            .iter()
            .map(|path| path.to_string())
            .collect();
        tracing::info!(%enquiry_id, %status, ?revalidate, "enquiry status changed");

        Ok(StatusUpdate {
            enquiry_id,
            status,
            revalidate,
        })
    }
}
