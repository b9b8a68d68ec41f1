use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Sent to the assigned engineer once a ticket exists.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EngineerNotice {
    pub engineer: String,
    pub ticket_id: u64,
    pub message: String,
}
