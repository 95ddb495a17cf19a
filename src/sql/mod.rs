//! SQL text and bind parameters. Statements are fixed; values always travel as parameters.

pub mod params;
pub mod statements;
pub use params::*;
