//! The library: every document known on this device, in upload order.
//!
//! Storage is not partitioned per user. Anyone logged in can list, search,
//! read and comment on any record; only the owner may delete one.

use crate::error::Result;
use crate::models::{Comment, PdfFile};
use crate::storage::{load_json, save_json, KeyValueStore, LIBRARY_KEY};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    files: Vec<PdfFile>,
}

impl Library {
    pub fn new(files: Vec<PdfFile>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[PdfFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&PdfFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn push(&mut self, pdf: PdfFile) {
        self.files.push(pdf);
    }

    /// Remove the record with `id`. Every other record is left untouched.
    pub fn remove(&mut self, id: &str) -> Option<PdfFile> {
        let index = self.files.iter().position(|f| f.id == id)?;
        Some(self.files.remove(index))
    }

    /// Append `comment` to the thread of record `pdf_id`.
    /// Returns false when no such record exists.
    pub fn add_comment(&mut self, pdf_id: &str, comment: Comment) -> bool {
        match self.files.iter_mut().find(|f| f.id == pdf_id) {
            Some(pdf) => {
                pdf.comments.push(comment);
                true
            }
            None => false,
        }
    }

    /// Case-insensitive substring match on the display name.
    pub fn filter(&self, term: &str) -> Vec<&PdfFile> {
        let term = term.to_lowercase();
        self.files
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&term))
            .collect()
    }
}

// ============================================================================
// Persistence
// ============================================================================

/// Load the stored library. Nothing stored yet means an empty library.
pub fn load(store: &dyn KeyValueStore) -> Result<Library> {
    Ok(load_json(store, LIBRARY_KEY)?.unwrap_or_default())
}

/// Overwrite the stored library with `library`.
pub fn save(store: &dyn KeyValueStore, library: &Library) -> Result<()> {
    save_json(store, LIBRARY_KEY, library)
}
