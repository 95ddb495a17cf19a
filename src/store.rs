//! Data access: an owned PostgreSQL pool and a single "run statement, get rows" operation.

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::sql::{statements, BindValue};
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::PgPool;
use std::str::FromStr;

/// One result row: column name to value, in select-list order.
pub type Row = serde_json::Map<String, Value>;

#[derive(Clone, Debug)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Open the pool and establish the first connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = pool_options(config)
            .connect_with(connect_options(config)?)
            .await?;
        Ok(Store { pool })
    }

    /// Build the pool without connecting; connections are opened on first use.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = pool_options(config).connect_lazy_with(connect_options(config)?);
        Ok(Store { pool })
    }

    /// Execute `sql` with positional `params` and return every result row.
    pub async fn query(&self, sql: &str, params: &[BindValue]) -> Result<Vec<Row>, StoreError> {
        tracing::debug!(sql = %sql.trim(), params = ?params, "query");
        let mut query = sqlx::query(sql);
        for p in params {
            query = p.bind_to(query);
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_map).collect())
    }

    /// Create the restaurants and reviews tables if they do not exist.
    /// Runs under an advisory lock so concurrent starters do not race on the DDL.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(statements::SCHEMA_LOCK)
            .execute(&mut *tx)
            .await?;
        for ddl in statements::CREATE_TABLES {
            sqlx::query(ddl).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        tracing::info!("database schema ready");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query(statements::PING).fetch_optional(&self.pool).await?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}

fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, StoreError> {
    let options = match config.url.as_deref() {
        Some(url) => PgConnectOptions::from_str(url)?,
        None => PgConnectOptions::new(),
    };
    Ok(match config.schema.as_deref() {
        Some(schema) => options.options([("search_path", schema)]),
        None => options,
    })
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
}

fn row_to_map(row: &PgRow) -> Row {
    use sqlx::Column;
    use sqlx::Row as _;
    let mut map = Row::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    map
}

/// Decodes the column types the restaurant statements produce: INT, BIGINT, FLOAT8, VARCHAR/TEXT, JSON.
fn cell_to_value(row: &PgRow, name: &str) -> Value {
    use sqlx::Row as _;
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn database_url() -> String {
        std::env::var("DATABASE_URL").expect("DATABASE_URL required")
    }

    #[test]
    fn rejects_malformed_url() {
        let config = DatabaseConfig {
            url: Some("not a url".into()),
            ..DatabaseConfig::default()
        };
        let err = Store::connect_lazy(&config).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn ping_fails_when_database_is_unreachable() {
        let config = DatabaseConfig {
            url: Some("postgres://postgres@127.0.0.1:1/none".into()),
            acquire_timeout: Duration::from_millis(300),
            ..DatabaseConfig::default()
        };
        let store = Store::connect_lazy(&config).unwrap();
        let err = store.ping().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn query_decodes_columns_by_name() {
        let config = DatabaseConfig {
            url: Some(database_url()),
            ..DatabaseConfig::default()
        };
        let store = Store::connect(&config).await.expect("connect failed");
        let rows = store
            .query(
                "SELECT $1::int8 AS id, $2::text AS name, 2::int4 AS price_range, NULL::float8 AS average_rating, \
                 3.3::float8 AS avg, '[{\"rating\": 5}]'::json AS reviews",
                &[BindValue::from(7i64), BindValue::from("Taco Bell")],
            )
            .await
            .expect("query failed");
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(
            row.keys().collect::<Vec<_>>(),
            vec!["id", "name", "price_range", "average_rating", "avg", "reviews"]
        );
        assert_eq!(row["id"], 7);
        assert_eq!(row["name"], "Taco Bell");
        assert_eq!(row["price_range"], 2);
        assert_eq!(row["reviews"], serde_json::json!([{"rating": 5}]));
        assert_eq!(row["average_rating"], Value::Null);
        assert_eq!(row["avg"], 3.3);
        store.close().await;
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn malformed_statement_is_a_statement_error() {
        let config = DatabaseConfig {
            url: Some(database_url()),
            ..DatabaseConfig::default()
        };
        let store = Store::connect(&config).await.expect("connect failed");
        let err = store.query("SELEC 1", &[]).await.unwrap_err();
        assert!(matches!(err, StoreError::Statement(_)));
    }
}
