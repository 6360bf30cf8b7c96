//! PostgreSQL-backed gateway
//!
//! Statements are assembled from each entity's column set with every value
//! bound as a parameter.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::{Column, Direction, FieldValue, Filter, GatewayError, Order, Record, Repository};

/// Gateway over a PostgreSQL pool, shared by every entity
#[derive(Clone)]
pub struct PgGateway {
    db: PgPool,
}

impl PgGateway {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => GatewayError::Rejected(db_err.message().to_string()),
            err @ (sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. }) => {
                GatewayError::Decode(err.to_string())
            }
            other => GatewayError::Unavailable(other.to_string()),
        }
    }
}

fn column_list<T: Record>() -> String {
    T::COLUMNS
        .iter()
        .map(|column| column.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: FieldValue) {
    match value {
        FieldValue::Null => {
            builder.push("NULL");
        }
        FieldValue::Uuid(v) => {
            builder.push_bind(v);
        }
        FieldValue::Text(v) => {
            builder.push_bind(v);
        }
        FieldValue::Bool(v) => {
            builder.push_bind(v);
        }
        FieldValue::Timestamp(v) => {
            builder.push_bind(v);
        }
        FieldValue::Json(v) => {
            builder.push_bind(v);
        }
    }
}

fn push_where<F: Column>(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter<F>) {
    for (i, (field, value)) in filter.conditions().iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push(field.name());
        if *value == FieldValue::Null {
            builder.push(" IS NULL");
        } else {
            builder.push(" = ");
            push_value(builder, value.clone());
        }
    }
}

#[async_trait]
impl<T> Repository<T> for PgGateway
where
    T: Record + for<'r> FromRow<'r, PgRow> + Unpin,
{
    async fn select(
        &self,
        filter: Filter<T::Field>,
        order: Option<Order<T::Field>>,
        limit: Option<usize>,
    ) -> Result<Vec<T>, GatewayError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder.push(column_list::<T>());
        builder.push(" FROM ");
        builder.push(T::TABLE);
        push_where(&mut builder, &filter);

        if let Some(order) = order {
            builder.push(" ORDER BY ");
            builder.push(order.field.name());
            builder.push(match order.direction {
                Direction::Ascending => " ASC",
                Direction::Descending => " DESC",
            });
        }
        if let Some(limit) = limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit as i64);
        }

        let rows = builder.build_query_as::<T>().fetch_all(&self.db).await?;
        Ok(rows)
    }

    async fn insert(&self, record: T::Insert) -> Result<T, GatewayError> {
        let values = T::insert_values(&record);

        let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO ");
        builder.push(T::TABLE);
        builder.push(" (");
        for (i, (field, _)) in values.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(field.name());
        }
        builder.push(") VALUES (");
        for (i, (_, value)) in values.into_iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            push_value(&mut builder, value);
        }
        builder.push(") RETURNING ");
        builder.push(column_list::<T>());

        let row = builder.build_query_as::<T>().fetch_one(&self.db).await?;
        Ok(row)
    }

    async fn update(&self, patch: T::Patch, filter: Filter<T::Field>) -> Result<u64, GatewayError> {
        filter.require_predicate("update")?;

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE ");
        builder.push(T::TABLE);
        builder.push(" SET ");
        for (i, (field, value)) in T::patch_values(&patch).into_iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(field.name());
            builder.push(" = ");
            push_value(&mut builder, value);
        }
        push_where(&mut builder, &filter);

        let result = builder.build().execute(&self.db).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, filter: Filter<T::Field>) -> Result<u64, GatewayError> {
        filter.require_predicate("delete")?;

        let mut builder = QueryBuilder::<Postgres>::new("DELETE FROM ");
        builder.push(T::TABLE);
        push_where(&mut builder, &filter);

        let result = builder.build().execute(&self.db).await?;
        Ok(result.rows_affected())
    }
}
