//! Persistence gateway
//!
//! A typed repository over the structured store. Each entity declares its table,
//! its column set, and the payloads it accepts for insert and update, so callers
//! never build table or column names by hand.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use shared::models::{AnalyticsEvent, Business, Category, Enquiry, User};

pub mod memory;
pub mod postgres;
pub mod records;

pub use memory::{MemoryGateway, Operation};
pub use postgres::PgGateway;
pub use records::{AnalyticsField, BusinessField, CategoryField, EnquiryField, UserField};

/// Failure reported by the store, carrying its own message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The store could not be reached
    #[error("{0}")]
    Unavailable(String),

    /// The store refused the statement
    #[error("{0}")]
    Rejected(String),

    /// A returned row did not match the entity shape
    #[error("{0}")]
    Decode(String),
}

/// A value bound to a column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Uuid(Uuid),
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
}

impl FieldValue {
    /// Ordering used by in-process stores; nulls sort first
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Null, _) => Ordering::Less,
            (_, FieldValue::Null) => Ordering::Greater,
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::Json(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// A column of an entity's table
pub trait Column: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    fn name(&self) -> &'static str;
}

/// An entity stored in its own table
pub trait Record: Clone + Send + Sync + 'static {
    const TABLE: &'static str;

    /// Every column, in select order
    const COLUMNS: &'static [Self::Field];

    type Field: Column;
    type Insert: Clone + Send + Sync + 'static;
    type Patch: Clone + Send + Sync + 'static;

    fn value(&self, field: Self::Field) -> FieldValue;

    fn insert_values(insert: &Self::Insert) -> Vec<(Self::Field, FieldValue)>;

    fn patch_values(patch: &Self::Patch) -> Vec<(Self::Field, FieldValue)>;

    /// Build the row the store would return for `insert`
    fn materialize(id: Uuid, now: DateTime<Utc>, insert: Self::Insert) -> Self;

    fn apply(&mut self, patch: &Self::Patch);
}

/// Conjunction of equality predicates
#[derive(Debug, Clone, PartialEq)]
pub struct Filter<F> {
    conditions: Vec<(F, FieldValue)>,
}

impl<F: Column> Filter<F> {
    /// Matches every row
    pub fn all() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    pub fn eq(field: F, value: impl Into<FieldValue>) -> Self {
        Self::all().and(field, value)
    }

    pub fn and(mut self, field: F, value: impl Into<FieldValue>) -> Self {
        self.conditions.push((field, value.into()));
        self
    }

    pub fn conditions(&self) -> &[(F, FieldValue)] {
        &self.conditions
    }

    pub fn is_unrestricted(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches<R: Record<Field = F>>(&self, record: &R) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| record.value(*field) == *expected)
    }

    /// Writes must name the rows they touch
    pub(crate) fn require_predicate(&self, operation: &str) -> Result<(), GatewayError> {
        if self.is_unrestricted() {
            return Err(GatewayError::Rejected(format!(
                "{operation} requires a filter"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Sort order for a select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order<F> {
    pub field: F,
    pub direction: Direction,
}

impl<F: Column> Order<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: Direction::Descending,
        }
    }
}

/// Generic structured store for one entity type
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    async fn select(
        &self,
        filter: Filter<T::Field>,
        order: Option<Order<T::Field>>,
        limit: Option<usize>,
    ) -> Result<Vec<T>, GatewayError>;

    async fn insert(&self, record: T::Insert) -> Result<T, GatewayError>;

    /// Returns the number of rows changed
    async fn update(&self, patch: T::Patch, filter: Filter<T::Field>) -> Result<u64, GatewayError>;

    /// Returns the number of rows removed
    async fn delete(&self, filter: Filter<T::Field>) -> Result<u64, GatewayError>;
}

/// One repository per entity the back office touches
#[derive(Clone)]
pub struct Gateways {
    pub enquiries: Arc<dyn Repository<Enquiry>>,
    pub analytics: Arc<dyn Repository<AnalyticsEvent>>,
    pub providers: Arc<dyn Repository<Business>>,
    pub users: Arc<dyn Repository<User>>,
    pub categories: Arc<dyn Repository<Category>>,
}

impl Gateways {
    /// All entities backed by one PostgreSQL pool
    pub fn postgres(db: sqlx::PgPool) -> Self {
        let gateway = Arc::new(PgGateway::new(db));
        Self {
            enquiries: gateway.clone(),
            analytics: gateway.clone(),
            providers: gateway.clone(),
            users: gateway.clone(),
            categories: gateway,
        }
    }

    /// Empty in-process tables
    pub fn memory() -> Self {
        Self {
            enquiries: Arc::new(MemoryGateway::<Enquiry>::new()),
            analytics: Arc::new(MemoryGateway::<AnalyticsEvent>::new()),
            providers: Arc::new(MemoryGateway::<Business>::new()),
            users: Arc::new(MemoryGateway::<User>::new()),
            categories: Arc::new(MemoryGateway::<Category>::new()),
        }
    }
}
