//! The in-app reader.
//!
//! Opening a record decodes its payload into a blob held in the
//! [`BlobRegistry`] and hands out a short-lived `/blob/{id}` reference for the
//! embedded viewer. The reference is owned by a [`ViewHandle`]; dropping the
//! handle revokes it. [`Viewer`] keeps at most one handle, keyed by the
//! record being read, so switching records, closing, or tearing down the
//! controller each release it exactly once.

use crate::error::Result;
use crate::models::PdfFile;
use crate::upload::{decode_payload, PDF_CONTENT_TYPE};
use axum::body::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Display hints appended to the reference for the embedded frame.
pub const DISPLAY_HINTS: &str = "toolbar=1&navpanes=0&scrollbar=1&view=FitH";

#[derive(Debug, Clone)]
pub struct Blob {
    pub bytes: Bytes,
    pub content_type: &'static str,
}

// ============================================================================
// Blob Registry
// ============================================================================

/// Table of live in-memory blobs. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct BlobRegistry {
    blobs: Arc<Mutex<HashMap<Uuid, Blob>>>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Blob>> {
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `bytes` and return the handle that owns the entry.
    pub fn create(&self, bytes: Vec<u8>, content_type: &'static str) -> ViewHandle {
        let id = Uuid::new_v4();
        self.lock().insert(
            id,
            Blob {
                bytes: Bytes::from(bytes),
                content_type,
            },
        );
        ViewHandle {
            id,
            registry: self.clone(),
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<Blob> {
        self.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn revoke(&self, id: &Uuid) {
        self.lock().remove(id);
    }
}

// ============================================================================
// View Handle
// ============================================================================

#[derive(Debug)]
pub struct ViewHandle {
    id: Uuid,
    registry: BlobRegistry,
}

impl ViewHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Bare reference, used for the "open externally" link.
    pub fn url(&self) -> String {
        format!("/blob/{}", self.id)
    }

    /// Reference with display hints, used as the frame source.
    pub fn display_url(&self) -> String {
        format!("{}#{}", self.url(), DISPLAY_HINTS)
    }
}

impl Drop for ViewHandle {
    fn drop(&mut self) {
        self.registry.revoke(&self.id);
        tracing::debug!(blob = %self.id, "released viewer reference");
    }
}

// ============================================================================
// Viewer
// ============================================================================

#[derive(Debug)]
struct ActiveView {
    record_id: String,
    record_name: String,
    owner_name: String,
    handle: ViewHandle,
}

#[derive(Debug)]
pub struct Viewer {
    registry: BlobRegistry,
    active: Option<ActiveView>,
}

impl Viewer {
    pub fn new(registry: BlobRegistry) -> Self {
        Self {
            registry,
            active: None,
        }
    }

    /// Show `pdf`, releasing whatever was shown before.
    ///
    /// On a malformed payload nothing is registered and the viewer ends up
    /// closed.
    pub fn open(&mut self, pdf: &PdfFile) -> Result<&ViewHandle> {
        self.active = None;

        let bytes = decode_payload(&pdf.base64)?;
        let handle = self.registry.create(bytes, PDF_CONTENT_TYPE);
        tracing::debug!(record = %pdf.id, blob = %handle.id(), "opened viewer");

        let active = self.active.insert(ActiveView {
            record_id: pdf.id.clone(),
            record_name: pdf.name.clone(),
            owner_name: pdf.owner_name.clone(),
            handle,
        });
        Ok(&active.handle)
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_record(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.record_id.as_str())
    }

    pub fn title(&self) -> Option<(&str, &str)> {
        self.active
            .as_ref()
            .map(|a| (a.record_name.as_str(), a.owner_name.as_str()))
    }

    pub fn handle(&self) -> Option<&ViewHandle> {
        self.active.as_ref().map(|a| &a.handle)
    }
}
