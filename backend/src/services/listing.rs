//! Admin business directory
//!
//! Holds the fetched provider listings shared by every admin. Search and
//! pagination are local projections over that set, driven by each caller's
//! own [`DirectorySession`]; verification toggles are applied optimistically
//! and then reconciled against the store.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use shared::directory::{filter_records, matches_query};
use shared::models::{Business, VerificationChange};
use shared::types::{clamp_page, page_count, paginate, PaginatedResponse, Pagination, PaginationMeta};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::gateway::{BusinessField, Filter, Order, Repository};

/// One admin's search box and page cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySession {
    pub query: String,
    pub page: u32,
}

impl Default for DirectorySession {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
        }
    }
}

impl DirectorySession {
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
        }
    }
}

/// The page an admin is looking at
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryPage {
    pub items: Vec<Business>,
    pub query: String,
    pub pagination: PaginationMeta,
    /// Ids whose verification control is disabled
    pub in_flight: Vec<Uuid>,
    pub loaded: bool,
}

/// Result of a verification toggle the store accepted
#[derive(Debug, Clone, Serialize)]
pub struct ToggleOutcome {
    pub id: Uuid,
    pub is_verified: bool,
    /// Local row after reconciliation, absent if it left the loaded set meanwhile
    pub business: Option<Business>,
    pub message: String,
}

/// How a pending local change settles once the store has answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Keep the optimistic value
    Confirm { is_verified: bool },
    /// Restore the value from before the toggle
    Revert { previous: bool },
    /// The store deleted the row
    Removed,
}

#[derive(Debug, Default)]
struct DirectoryState {
    records: Vec<Business>,
    in_flight: HashSet<Uuid>,
    loaded: bool,
}

impl DirectoryState {
    fn record_mut(&mut self, id: Uuid) -> Option<&mut Business> {
        self.records.iter_mut().find(|record| record.id == id)
    }
}

pub struct ListingDirectory {
    providers: Arc<dyn Repository<Business>>,
    page_size: u32,
    state: Mutex<DirectoryState>,
}

impl ListingDirectory {
    pub fn new(providers: Arc<dyn Repository<Business>>, page_size: u32) -> Self {
        Self {
            providers,
            page_size: page_size.max(1),
            state: Mutex::new(DirectoryState::default()),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, DirectoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the loaded set with every listing, newest first
    ///
    /// On failure the loaded set is cleared rather than left stale.
    pub async fn refresh(&self) -> AppResult<usize> {
        let result = self
            .providers
            .select(Filter::all(), Some(Order::desc(BusinessField::CreatedAt)), None)
            .await;

        let mut state = self.lock_state();
        match result {
            Ok(records) => {
                let count = records.len();
                state.records = records;
                state.loaded = true;
                tracing::debug!(count, "business directory loaded");
                Ok(count)
            }
            Err(err) => {
                state.records.clear();
                state.loaded = false;
                tracing::error!(error = %err, "failed to load businesses");
                Err(AppError::Persistence(format!("Failed to load businesses: {err}")))
            }
        }
    }

    /// Loaded listings whose name or city contains `query`
    pub fn filter(&self, query: &str) -> Vec<Business> {
        filter_records(&self.lock_state().records, query)
    }

    /// Number of pages the listings matching `query` fill
    pub fn total_pages(&self, query: &str) -> u32 {
        let state = self.lock_state();
        let matching = state
            .records
            .iter()
            .filter(|record| matches_query(*record, query))
            .count();
        page_count(matching, self.page_size)
    }

    /// One page of the listings matching `query`, clamped into range
    pub fn page(&self, query: &str, page: u32) -> PaginatedResponse<Business> {
        let filtered = filter_records(&self.lock_state().records, query);
        let page = clamp_page(page, page_count(filtered.len(), self.page_size));
        paginate(&filtered, Pagination::new(page, self.page_size))
    }

    /// Render a session; a page beyond the loaded set shows the last page
    pub fn view(&self, session: &DirectorySession) -> DirectoryPage {
        let listing = self.page(&session.query, session.page);
        let state = self.lock_state();
        let mut in_flight: Vec<Uuid> = state.in_flight.iter().copied().collect();
        in_flight.sort();

        DirectoryPage {
            items: listing.data,
            query: session.query.clone(),
            pagination: listing.pagination,
            in_flight,
            loaded: state.loaded,
        }
    }

    /// A new query always starts from the first page
    pub fn set_query(&self, session: &mut DirectorySession, query: &str) -> DirectoryPage {
        session.query = query.to_string();
        session.page = 1;
        self.view(session)
    }

    pub fn go_to_page(&self, session: &mut DirectorySession, page: u32) -> DirectoryPage {
        session.page = clamp_page(page, self.total_pages(&session.query));
        self.view(session)
    }

    pub fn next_page(&self, session: &mut DirectorySession) -> DirectoryPage {
        let page = session.page.saturating_add(1);
        self.go_to_page(session, page)
    }

    pub fn previous_page(&self, session: &mut DirectorySession) -> DirectoryPage {
        let page = session.page.saturating_sub(1);
        self.go_to_page(session, page)
    }

    pub fn is_in_flight(&self, id: Uuid) -> bool {
        self.lock_state().in_flight.contains(&id)
    }

    /// Flip `is_verified` locally, then confirm or revert against the store
    ///
    /// A second toggle for the same id is refused while the first is pending.
    pub async fn toggle_verification(&self, id: Uuid) -> AppResult<ToggleOutcome> {
        let previous = {
            let mut state = self.lock_state();
            if state.in_flight.contains(&id) {
                return Err(AppError::ToggleInFlight(id));
            }
            let record = state
                .record_mut(id)
                .ok_or_else(|| AppError::NotFound("Business".to_string()))?;
            let previous = record.is_verified;
            record.is_verified = !previous;
            state.in_flight.insert(id);
            previous
        };
        let pending = PendingToggle::new(self, id, previous);
        let target = !previous;

        let result = self
            .providers
            .update(
                VerificationChange {
                    is_verified: target,
                },
                Filter::eq(BusinessField::Id, id),
            )
            .await;

        match result {
            Ok(affected) if affected > 0 => {
                let business = pending.settle(Reconciliation::Confirm {
                    is_verified: target,
                });
                if business.is_none() {
                    tracing::debug!(business_id = %id, "toggled listing no longer loaded locally");
                }
                tracing::info!(business_id = %id, is_verified = target, "verification toggled");
                Ok(ToggleOutcome {
                    id,
                    is_verified: target,
                    business,
                    message: format!(
                        "Business {} successfully!",
                        if target { "verified" } else { "unverified" }
                    ),
                })
            }
            Ok(_) => {
                pending.settle(Reconciliation::Revert { previous });
                tracing::warn!(business_id = %id, "verification toggle matched no rows, reverted");
                Err(AppError::NotFound("Business".to_string()))
            }
            Err(err) => {
                pending.settle(Reconciliation::Revert { previous });
                tracing::error!(business_id = %id, error = %err, "verification toggle failed, reverted");
                Err(AppError::Persistence(format!("Failed to update: {err}")))
            }
        }
    }

    /// Delete remotely, then drop the local row once the store confirms
    pub async fn delete(&self, id: Uuid) -> AppResult<u64> {
        let removed = self
            .providers
            .delete(Filter::eq(BusinessField::Id, id))
            .await
            .map_err(|err| {
                tracing::error!(business_id = %id, error = %err, "failed to delete business");
                AppError::Persistence(format!("Failed to delete: {err}"))
            })?;

        self.reconcile(id, Reconciliation::Removed);
        tracing::info!(business_id = %id, removed, "business deleted");
        Ok(removed)
    }

    /// Settle local state against an authoritative store result
    pub fn reconcile(&self, id: Uuid, outcome: Reconciliation) -> Option<Business> {
        let mut state = self.lock_state();
        match outcome {
            Reconciliation::Confirm { is_verified } | Reconciliation::Revert { previous: is_verified } => {
                state.in_flight.remove(&id);
                let record = state.record_mut(id)?;
                record.is_verified = is_verified;
                Some(record.clone())
            }
            Reconciliation::Removed => {
                let position = state.records.iter().position(|record| record.id == id);
                position.map(|index| state.records.remove(index))
            }
        }
    }
}

/// Optimistic toggle awaiting the store
///
/// Dropping it unsettled (the request was cancelled) reverts the local flip.
struct PendingToggle<'a> {
    directory: &'a ListingDirectory,
    id: Uuid,
    previous: bool,
    settled: bool,
}

impl<'a> PendingToggle<'a> {
    fn new(directory: &'a ListingDirectory, id: Uuid, previous: bool) -> Self {
        Self {
            directory,
            id,
            previous,
            settled: false,
        }
    }

    fn settle(mut self, outcome: Reconciliation) -> Option<Business> {
        self.settled = true;
        self.directory.reconcile(self.id, outcome)
    }
}

impl Drop for PendingToggle<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.directory.reconcile(
                self.id,
                Reconciliation::Revert {
                    previous: self.previous,
                },
            );
        }
    }
}
