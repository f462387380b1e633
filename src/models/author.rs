//! Author model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Server-assigned identifier
    pub id: String,
    /// Unique handle
    pub username: String,
    /// Contact email
    pub email: String,
    /// Display name (for UI)
    pub display_name: String,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Author {
    /// Get the handle with the leading `@`
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }

    /// Get the join date formatted for display (e.g., "Mar 02, 2024")
    pub fn joined(&self) -> String {
        self.created_at.format("%b %d, %Y").to_string()
    }
}
