//! Request bodies and response payloads.
//!
//! Body fields are optional here: a missing field is bound as NULL and rejected by the
//! table's NOT NULL constraint.

use crate::sql::BindValue;
use crate::store::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of create and update restaurant.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RestaurantInput {
    pub name: Option<String>,
    pub location: Option<String>,
    pub price_range: Option<i32>,
}

impl RestaurantInput {
    pub fn params(&self) -> Vec<BindValue> {
        vec![
            self.name.clone().into(),
            self.location.clone().into(),
            self.price_range.into(),
        ]
    }
}

/// Body of add review.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReviewInput {
    pub name: Option<String>,
    pub review: Option<String>,
    pub rating: Option<i32>,
}

impl ReviewInput {
    pub fn params(&self, restaurant_id: i64) -> Vec<BindValue> {
        vec![
            restaurant_id.into(),
            self.name.clone().into(),
            self.review.clone().into(),
            self.rating.into(),
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct RestaurantList {
    pub restaurants: Vec<Row>,
}

#[derive(Debug, Serialize)]
pub struct RestaurantDetail {
    pub restaurant: Row,
    pub reviews: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct RestaurantData {
    pub restaurant: Row,
}

#[derive(Debug, Serialize)]
pub struct ReviewData {
    pub review: Row,
}
