//! Feedback Model

use serde::{Deserialize, Serialize};

/// Feedback row as served to admin clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    /// Display name of the submitting student, taken from the session
    pub student_name: String,
    /// Record id of the rated item, absent for general feedback
    pub food_item_id: Option<String>,
    /// Resolved name of the rated item, absent for general feedback
    pub food_item_name: Option<String>,
    pub rating: u8,
    pub message: String,
    /// Unix milliseconds, set once at creation
    pub created_at: i64,
}

/// Response wrapper for the feedback history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackListResponse {
    pub feedbacks: Vec<Feedback>,
}
