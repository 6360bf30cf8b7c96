//! Analytics side-channel
//!
//! Best-effort event recording. Each event gets its own spawned task and
//! error boundary so a failing or panicking insert never reaches the caller.

use std::sync::Arc;

use shared::models::{AnalyticsEvent, NewAnalyticsEvent};

use crate::gateway::Repository;

/// Records analytics events without affecting the caller's outcome
#[derive(Clone)]
pub struct AnalyticsRecorder {
    events: Arc<dyn Repository<AnalyticsEvent>>,
    enabled: bool,
}

impl AnalyticsRecorder {
    pub fn new(events: Arc<dyn Repository<AnalyticsEvent>>, enabled: bool) -> Self {
        Self { events, enabled }
    }

    /// Attempt a single insert of `event`; failures are logged and dropped
    pub async fn record(&self, event: NewAnalyticsEvent) {
        if !self.enabled {
            tracing::debug!(
                provider_id = %event.provider_id,
                event_type = %event.event_type,
                "analytics disabled, event skipped"
            );
            return;
        }

        let events = self.events.clone();
        let event_type = event.event_type.clone();
        let provider_id = event.provider_id;

        let task = tokio::spawn(async move { events.insert(event).await });

        match task.await {
            Ok(Ok(recorded)) => {
                tracing::debug!(event_id = %recorded.id, %event_type, "analytics event recorded");
            }
            Ok(Err(err)) => {
                tracing::warn!(%provider_id, %event_type, error = %err, "analytics event not recorded");
            }
            Err(err) => {
                tracing::warn!(%provider_id, %event_type, error = %err, "analytics task aborted");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{MemoryGateway, Operation};
    use shared::models::ENQUIRY_CLICK;
    use uuid::Uuid;

    fn click() -> NewAnalyticsEvent {
        NewAnalyticsEvent::enquiry_click(Uuid::new_v4(), "Amit Shah")
    }

    #[tokio::test]
    async fn test_record_inserts_once() {
        let events = Arc::new(MemoryGateway::<AnalyticsEvent>::new());
        let recorder = AnalyticsRecorder::new(events.clone(), true);

        recorder
            .record(NewAnalyticsEvent {
                provider_id: Uuid::new_v4(),
                event_type: "profile_view".to_string(),
                metadata: serde_json::json!({ "source": "search" }),
            })
            .await;
        recorder.record(click()).await;

        let rows = events.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].event_type, "profile_view");
        assert_eq!(rows[1].event_type, ENQUIRY_CLICK);
        assert_eq!(rows[1].metadata["customer_name"], "Amit Shah");
    }

    #[tokio::test]
    async fn test_record_swallows_store_failure() {
        let events = Arc::new(MemoryGateway::<AnalyticsEvent>::new());
        events.fail_next(Operation::Insert, "analytics store offline");
        let recorder = AnalyticsRecorder::new(events.clone(), true);

        recorder.record(click()).await;

        assert_eq!(events.calls(Operation::Insert), 1);
        assert!(events.rows().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_recorder_skips_store() {
        let events = Arc::new(MemoryGateway::<AnalyticsEvent>::new());
        let recorder = AnalyticsRecorder::new(events.clone(), false);

        recorder.record(click()).await;

        assert_eq!(events.calls(Operation::Insert), 0);
    }
}
