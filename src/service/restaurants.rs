//! Restaurant and review operations. Each maps to a single statement.

use crate::error::{AppError, StoreError};
use crate::models::{RestaurantInput, ReviewInput};
use crate::sql::statements;
use crate::store::{Row, Store};
use serde_json::Value;

pub struct RestaurantService;

impl RestaurantService {
    /// Every restaurant with `review_count` and `average_rating`, ordered by id.
    pub async fn list(store: &Store) -> Result<Vec<Row>, AppError> {
        Ok(store.query(statements::LIST_RESTAURANTS, &[]).await?)
    }

    /// Restaurant with its aggregate, plus its reviews. `None` when the id does not exist.
    pub async fn get(store: &Store, id: i64) -> Result<Option<(Row, Vec<Value>)>, AppError> {
        let rows = store
            .query(statements::GET_RESTAURANT_WITH_REVIEWS, &[id.into()])
            .await?;
        let Some(mut restaurant) = rows.into_iter().next() else {
            return Ok(None);
        };
        let reviews = match restaurant.remove("reviews") {
            Some(Value::Array(reviews)) => reviews,
            _ => Vec::new(),
        };
        Ok(Some((restaurant, reviews)))
    }

    /// Insert a restaurant and return the stored row including its generated id.
    pub async fn create(store: &Store, input: &RestaurantInput) -> Result<Row, AppError> {
        let rows = store
            .query(statements::INSERT_RESTAURANT, &input.params())
            .await?;
        first_row(rows)
    }

    /// Replace name, location and price_range. `None` when the id does not exist.
    pub async fn update(
        store: &Store,
        id: i64,
        input: &RestaurantInput,
    ) -> Result<Option<Row>, AppError> {
        let mut params = input.params();
        params.push(id.into());
        let rows = store.query(statements::UPDATE_RESTAURANT, &params).await?;
        Ok(rows.into_iter().next())
    }

    /// Delete by id; returns whether a row was removed. Absence is not an error.
    pub async fn delete(store: &Store, id: i64) -> Result<bool, AppError> {
        let rows = store
            .query(statements::DELETE_RESTAURANT, &[id.into()])
            .await?;
        if rows.is_empty() {
            tracing::debug!(restaurant_id = id, "delete matched no restaurant");
        }
        Ok(!rows.is_empty())
    }

    /// Attach a review. A restaurant id the store does not know is reported as not found.
    pub async fn add_review(
        store: &Store,
        restaurant_id: i64,
        input: &ReviewInput,
    ) -> Result<Row, AppError> {
        let rows = store
            .query(statements::INSERT_REVIEW, &input.params(restaurant_id))
            .await
            .map_err(|e| {
                if e.is_foreign_key_violation() {
                    AppError::NotFound(format!("restaurant {}", restaurant_id))
                } else {
                    AppError::Store(e)
                }
            })?;
        first_row(rows)
    }
}

/// INSERT ... RETURNING always yields a row; anything else is a store fault.
fn first_row(rows: Vec<Row>) -> Result<Row, AppError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| AppError::Store(StoreError::Statement(sqlx::Error::RowNotFound)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn empty_returning_is_a_server_error() {
        let err = first_row(Vec::new()).unwrap_err();
        assert_eq!(err.classify().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn first_row_takes_the_returned_row() {
        let mut row = Row::new();
        row.insert("id".into(), Value::from(1));
        let got = first_row(vec![row.clone()]).unwrap();
        assert_eq!(got, row);
    }
}
