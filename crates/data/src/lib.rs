//! Catalog loading and validation for the supply engine.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
