//! Data models
//!
//! Shared between canteen-server and the single-page client (via API).
//! Record ids cross the wire as `table:key` strings, timestamps as
//! Unix milliseconds (UTC).

pub mod feedback;
pub mod food_item;
pub mod role;

// Re-exports
pub use feedback::*;
pub use food_item::*;
pub use role::*;
