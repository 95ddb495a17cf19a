//! RestaurantService: one operation per route on top of the store.

mod restaurants;
pub use restaurants::RestaurantService;
