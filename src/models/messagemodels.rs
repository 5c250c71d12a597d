// models/messagemodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i32,
    pub sender_id: i32,
    pub recipient_id: i32,
    /// `None` for general enquiries not tied to a listing.
    pub property_id: Option<i32>,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn involves(&self, user_id: i32) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }

    pub fn is_between(&self, user_one_id: i32, user_two_id: i32) -> bool {
        (self.sender_id == user_one_id && self.recipient_id == user_two_id)
            || (self.sender_id == user_two_id && self.recipient_id == user_one_id)
    }
}
