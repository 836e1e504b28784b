//! Data models for the library.
//!
//! Field names serialize in camelCase so stored documents keep the same shape
//! regardless of which build wrote them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Users
// ============================================================================

/// A logged-in identity. The entered name doubles as the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn named(name: &str) -> Self {
        Self {
            id: name.to_string(),
            name: name.to_string(),
        }
    }
}

/// Name to password. Passwords are stored as entered.
pub type Registry = BTreeMap<String, String>;

// ============================================================================
// Documents
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub text: String,
    /// Unix milliseconds.
    pub timestamp: i64,
}

impl Comment {
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfFile {
    pub id: String,
    pub name: String,
    /// The document bytes, standard base64.
    pub base64: String,
    pub owner_id: String,
    pub owner_name: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl PdfFile {
    pub fn is_owned_by(&self, user: &User) -> bool {
        self.owner_id == user.id
    }
}

/// A file that has been read and encoded but not yet named and saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub base64: String,
    pub default_name: String,
}

// ============================================================================
// UI Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppStatus {
    #[default]
    Idle,
    AuthRequired,
    Uploading,
    Error,
}

impl std::fmt::Display for AppStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppStatus::Idle => write!(f, "idle"),
            AppStatus::AuthRequired => write!(f, "auth_required"),
            AppStatus::Uploading => write!(f, "uploading"),
            AppStatus::Error => write!(f, "error"),
        }
    }
}
