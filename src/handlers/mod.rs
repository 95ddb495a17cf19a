//! HTTP handlers for restaurants and reviews.

pub mod restaurants;
pub use restaurants::*;
