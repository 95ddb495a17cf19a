//! REST API over PostgreSQL for restaurants and their reviews.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Config, DatabaseConfig, ServerConfig};
pub use error::{AppError, ConfigError, StoreError};
pub use routes::{app, common_routes, restaurant_routes};
pub use service::RestaurantService;
pub use state::AppState;
pub use store::{Row, Store};
