//! Restaurant routes, mounted under `/api/v1`.
//! Both id routes use the `:id` capture; sibling segments must share a parameter name.

use crate::handlers::{
    add_review, create_restaurant, delete_restaurant, get_restaurant, list_restaurants,
    update_restaurant,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn restaurant_routes(state: AppState) -> Router {
    Router::new()
        .route("/restaurants", get(list_restaurants).post(create_restaurant))
        .route(
            "/restaurants/:id",
            get(get_restaurant).put(update_restaurant).delete(delete_restaurant),
        )
        .route("/restaurants/:id/addReview", post(add_review))
        .with_state(state)
}
