//! Restaurant handlers: list, read, create, update, delete, add review.
//! Path and body rejections are taken as `Result` so they surface through `AppError` like store failures.

use crate::error::AppError;
use crate::models::{RestaurantData, RestaurantDetail, RestaurantInput, RestaurantList, ReviewData, ReviewInput};
use crate::response::{success_counted, success_created, success_ok};
use crate::service::RestaurantService;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list_restaurants(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let restaurants = RestaurantService::list(&state.store).await?;
    Ok(success_counted(restaurants.len(), RestaurantList { restaurants }))
}

pub async fn get_restaurant(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    let (restaurant, reviews) = RestaurantService::get(&state.store, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("restaurant {}", id)))?;
    Ok(success_ok(RestaurantDetail { restaurant, reviews }))
}

pub async fn create_restaurant(
    State(state): State<AppState>,
    body: Result<Json<RestaurantInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = body?;
    let restaurant = RestaurantService::create(&state.store, &input).await?;
    tracing::info!(restaurant_id = ?restaurant.get("id"), "restaurant created");
    Ok(success_created(RestaurantData { restaurant }))
}

pub async fn update_restaurant(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<RestaurantInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;
    let Json(input) = body?;
    let restaurant = RestaurantService::update(&state.store, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("restaurant {}", id)))?;
    Ok(success_ok(RestaurantData { restaurant }))
}

pub async fn delete_restaurant(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    RestaurantService::delete(&state.store, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_review(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ReviewInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(restaurant_id) = id?;
    let Json(input) = body?;
    let review = RestaurantService::add_review(&state.store, restaurant_id, &input).await?;
    Ok(success_created(ReviewData { review }))
}
