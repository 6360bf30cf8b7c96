//! In-process gateway
//!
//! Backs the `memory` storage mode and the test suites. Failures and latency
//! can be injected per operation, and every call is counted whether or not it
//! succeeds.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{Direction, Filter, GatewayError, Order, Record, Repository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

impl Operation {
    fn index(self) -> usize {
        match self {
            Operation::Select => 0,
            Operation::Insert => 1,
            Operation::Update => 2,
            Operation::Delete => 3,
        }
    }
}

#[derive(Debug, Clone)]
enum Failure {
    Once(GatewayError),
    Always(GatewayError),
}

/// Table held in memory
pub struct MemoryGateway<T: Record> {
    rows: Mutex<Vec<T>>,
    failures: Mutex<HashMap<Operation, Failure>>,
    calls: [AtomicUsize; 4],
    latency: Option<Duration>,
}

impl<T: Record> Default for MemoryGateway<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryGateway<T> {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            rows: Mutex::new(rows),
            failures: Mutex::new(HashMap::new()),
            calls: Default::default(),
            latency: None,
        }
    }

    /// Delay every call, so concurrent callers can overlap
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail the next call of `operation` with `message`
    pub fn fail_next(&self, operation: Operation, message: &str) {
        self.lock_failures().insert(
            operation,
            Failure::Once(GatewayError::Unavailable(message.to_string())),
        );
    }

    /// Fail every call of `operation` until [`MemoryGateway::recover`]
    pub fn fail_always(&self, operation: Operation, message: &str) {
        self.lock_failures().insert(
            operation,
            Failure::Always(GatewayError::Unavailable(message.to_string())),
        );
    }

    pub fn recover(&self, operation: Operation) {
        self.lock_failures().remove(&operation);
    }

    /// Calls attempted for `operation`, including failed ones
    pub fn calls(&self, operation: Operation) -> usize {
        self.calls[operation.index()].load(Ordering::SeqCst)
    }

    /// Snapshot of the stored rows
    pub fn rows(&self) -> Vec<T> {
        self.lock_rows().clone()
    }

    fn lock_rows(&self) -> MutexGuard<'_, Vec<T>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_failures(&self) -> MutexGuard<'_, HashMap<Operation, Failure>> {
        self.failures.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn begin(&self, operation: Operation) -> Result<(), GatewayError> {
        self.calls[operation.index()].fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let mut failures = self.lock_failures();
        match failures.get(&operation).cloned() {
            Some(Failure::Always(err)) => Err(err),
            Some(Failure::Once(err)) => {
                failures.remove(&operation);
                Err(err)
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryGateway<T> {
    async fn select(
        &self,
        filter: Filter<T::Field>,
        order: Option<Order<T::Field>>,
        limit: Option<usize>,
    ) -> Result<Vec<T>, GatewayError> {
        self.begin(Operation::Select).await?;

        // Insertion sequence breaks ties, so descending puts later rows first
        let mut rows: Vec<(usize, T)> = self
            .lock_rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| filter.matches(*row))
            .map(|(seq, row)| (seq, row.clone()))
            .collect();

        if let Some(order) = order {
            rows.sort_by(|(seq_a, a), (seq_b, b)| {
                let ordering = a
                    .value(order.field)
                    .compare(&b.value(order.field))
                    .then(seq_a.cmp(seq_b));
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }
        if let Some(limit) = limit {
            rows.truncate(limit);
        }

        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    async fn insert(&self, record: T::Insert) -> Result<T, GatewayError> {
        self.begin(Operation::Insert).await?;

        let row = T::materialize(Uuid::new_v4(), Utc::now(), record);
        self.lock_rows().push(row.clone());
        Ok(row)
    }

    async fn update(&self, patch: T::Patch, filter: Filter<T::Field>) -> Result<u64, GatewayError> {
        self.begin(Operation::Update).await?;
        filter.require_predicate("update")?;

        let mut affected = 0;
        for row in self.lock_rows().iter_mut().filter(|row| filter.matches(&**row)) {
            row.apply(&patch);
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, filter: Filter<T::Field>) -> Result<u64, GatewayError> {
        self.begin(Operation::Delete).await?;
        filter.require_predicate("delete")?;

        let mut rows = self.lock_rows();
        let before = rows.len();
        rows.retain(|row| !filter.matches(row));
        Ok((before - rows.len()) as u64)
    }
}
