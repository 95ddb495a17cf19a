//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub const STATUS_SUCCESS: &str = "success";

/// `{"status": "success", "count"?: n, "data": ...}`
#[derive(Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: T,
}

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    envelope(StatusCode::OK, None, data)
}

pub fn success_created<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    envelope(StatusCode::CREATED, None, data)
}

/// 200 with `count` alongside the data.
pub fn success_counted<T: Serialize>(count: usize, data: T) -> (StatusCode, Json<Envelope<T>>) {
    envelope(StatusCode::OK, Some(count), data)
}

fn envelope<T: Serialize>(status: StatusCode, count: Option<usize>, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        status,
        Json(Envelope {
            status: STATUS_SUCCESS,
            count,
            data,
        }),
    )
}
