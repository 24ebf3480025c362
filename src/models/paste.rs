//! The persisted paste record and its invariants.

use crate::constants::VALID_APPLICATIONS;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A stored paste: one or more named text files submitted together.
///
/// The serialized form matches the on-disk `<id>.json` layout: `files`
/// (name → content), `file_names` (display order), `timestamp`,
/// `application_id`. The id itself is the file name, not a field, so it is
/// skipped by serde and filled in by the reader.
///
/// Invariant: the keys of `files` are exactly the entries of `file_names`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasteRecord {
    #[serde(skip)]
    pub id: String,
    pub files: HashMap<String, String>,
    pub file_names: Vec<String>,
    #[serde(default, alias = "created")]
    pub timestamp: Timestamp,
    #[serde(default)]
    pub application_id: String,
}

/// Creation time as stored: a millisecond epoch number for records written
/// by this service, but older records may carry a preformatted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Text(String::new())
    }
}

impl Timestamp {
    /// Display-string pass-through of the stored value.
    pub fn display(&self) -> String {
        match self {
            Timestamp::Millis(ms) => ms.to_string(),
            Timestamp::Text(text) => text.clone(),
        }
    }
}

impl PasteRecord {
    /// Build a record for a freshly validated upload with a new random id
    /// and the current time.
    pub fn new(
        application_id: String,
        files: HashMap<String, String>,
        file_names: Vec<String>,
    ) -> Self {
        Self {
            id: generate_paste_id(),
            files,
            file_names,
            timestamp: Timestamp::Millis(Utc::now().timestamp_millis()),
            application_id,
        }
    }
}

/// Generate a 128-bit random paste id as 32 lowercase hex characters.
///
/// No collision check is performed against the store; exclusive creation
/// catches the (negligible) collision case loudly.
pub fn generate_paste_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Whether `application` is on the fixed allow-list (case-insensitive).
pub fn is_valid_application(application: &str) -> bool {
    VALID_APPLICATIONS
        .iter()
        .any(|app| app.eq_ignore_ascii_case(application))
}
