//! Typed positional parameters for PostgreSQL statements.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value bound to `$n`. Each variant carries its own SQL type so `NULL` is typed too.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Int(Option<i64>),
    Text(Option<String>),
}

impl BindValue {
    /// Attach this value as the next positional argument of `query`.
    pub fn bind_to<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            BindValue::Int(v) => query.bind(*v),
            BindValue::Text(v) => query.bind(v.as_deref()),
        }
    }
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::Int(Some(v))
    }
}

impl From<i32> for BindValue {
    fn from(v: i32) -> Self {
        BindValue::Int(Some(v.into()))
    }
}

impl From<Option<i32>> for BindValue {
    fn from(v: Option<i32>) -> Self {
        BindValue::Int(v.map(i64::from))
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(Some(v.to_string()))
    }
}

impl From<Option<String>> for BindValue {
    fn from(v: Option<String>) -> Self {
        BindValue::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_widen_to_i64() {
        assert_eq!(BindValue::from(3i32), BindValue::Int(Some(3)));
        assert_eq!(BindValue::from(Some(5i32)), BindValue::Int(Some(5)));
        assert_eq!(BindValue::from(i64::MAX), BindValue::Int(Some(i64::MAX)));
    }

    #[test]
    fn missing_values_stay_typed_nulls() {
        assert_eq!(BindValue::from(None::<String>), BindValue::Text(None));
        assert_eq!(BindValue::from(None::<i32>), BindValue::Int(None));
        assert_eq!(BindValue::from("Wendys"), BindValue::Text(Some("Wendys".into())));
    }
}
