//! Shared types for the canteen tracker
//!
//! Wire models used by both canteen-server and the single-page client:
//! auth request/response shapes, record models, and the fixed role set.

pub mod client;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::Role;
