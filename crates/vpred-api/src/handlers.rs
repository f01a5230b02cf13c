//! Request handlers.

pub mod health;
pub mod predict;
pub mod schema;

pub use health::*;
pub use predict::*;
pub use schema::*;
