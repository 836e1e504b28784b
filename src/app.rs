//! Application controller.
//!
//! `App` owns everything the UI shows: the session, the in-memory library,
//! the pending upload, the viewer and the pending delete confirmation. Each
//! user action has one method here. Library mutations are applied to a copy,
//! persisted, and only then swapped in, so memory and storage never diverge.

use crate::error::{Result, ShelfError};
use crate::ids::IdGenerator;
use crate::library::{self, Library};
use crate::models::{AppStatus, Comment, PdfFile, PendingUpload, User};
use crate::session;
use crate::share::{build_share_link, parse_share_fragment};
use crate::storage::KeyValueStore;
use crate::upload;
use crate::viewer::{BlobRegistry, ViewHandle, Viewer};
use chrono::Utc;
use std::sync::Arc;

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

pub struct App {
    store: Arc<dyn KeyValueStore>,
    ids: Arc<dyn IdGenerator>,
    user: Option<User>,
    library: Library,
    status: AppStatus,
    pending: Option<PendingUpload>,
    viewer: Viewer,
    delete_confirm: Option<String>,
    open_thread: Option<String>,
}

impl App {
    /// Restore the session and library from `store`.
    pub fn load(
        store: Arc<dyn KeyValueStore>,
        ids: Arc<dyn IdGenerator>,
        blobs: BlobRegistry,
    ) -> Result<Self> {
        let user = session::current_user(store.as_ref())?;
        let library = library::load(store.as_ref())?;
        tracing::info!(
            documents = library.len(),
            user = user.as_ref().map(|u| u.name.as_str()).unwrap_or("-"),
            "library loaded"
        );

        let status = if user.is_some() {
            AppStatus::Idle
        } else {
            AppStatus::AuthRequired
        };

        Ok(Self {
            store,
            ids,
            user,
            library,
            status,
            pending: None,
            viewer: Viewer::new(blobs),
            delete_confirm: None,
            open_thread: None,
        })
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn status(&self) -> AppStatus {
        self.status
    }

    pub fn pending_upload(&self) -> Option<&PendingUpload> {
        self.pending.as_ref()
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// The record awaiting delete confirmation, if any.
    pub fn delete_confirmation(&self) -> Option<&PdfFile> {
        self.delete_confirm
            .as_deref()
            .and_then(|id| self.library.find(id))
    }

    pub fn open_thread(&self) -> Option<&str> {
        self.open_thread.as_deref()
    }

    pub fn filter(&self, term: &str) -> Vec<&PdfFile> {
        self.library.filter(term)
    }

    pub fn can_delete(&self, pdf: &PdfFile) -> bool {
        self.user.as_ref().is_some_and(|u| pdf.is_owned_by(u))
    }

    fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(ShelfError::Unauthenticated)
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Log in as `name`. Switching from another user drops their UI state.
    pub fn login(&mut self, name: &str, password: &str) -> Result<&User> {
        let user = session::login_or_register(self.store.as_ref(), name, password)?;
        if self.user.as_ref().is_some_and(|u| u.id != user.id) {
            self.reset_user_state();
        }
        self.status = AppStatus::Idle;
        Ok(self.user.insert(user))
    }

    /// Log out and drop every piece of per-user UI state.
    pub fn logout(&mut self) -> Result<()> {
        session::logout(self.store.as_ref())?;
        if let Some(user) = self.user.take() {
            tracing::info!(user = %user.name, "logged out");
        }
        self.reset_user_state();
        self.status = AppStatus::AuthRequired;
        Ok(())
    }

    fn reset_user_state(&mut self) {
        self.viewer.close();
        self.pending = None;
        self.delete_confirm = None;
        self.open_thread = None;
    }

    // ========================================================================
    // Upload
    // ========================================================================

    pub fn mark_uploading(&mut self) -> Result<()> {
        self.require_user()?;
        self.status = AppStatus::Uploading;
        Ok(())
    }

    /// Finish reading an uploaded file and move on to the naming step.
    ///
    /// Returns `Ok(false)` when the file is not a PDF and was ignored. A read
    /// failure drops the upload and sets the error status.
    pub fn receive_upload(
        &mut self,
        file_name: &str,
        content_type: Option<&str>,
        read: Result<Vec<u8>>,
    ) -> Result<bool> {
        self.require_user()?;

        let bytes = match read {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(file = file_name, "upload failed: {}", e);
                self.pending = None;
                self.status = AppStatus::Error;
                return Err(e);
            }
        };

        self.status = AppStatus::Idle;
        match upload::begin(file_name, content_type, &bytes) {
            Some(pending) => {
                tracing::info!(file = file_name, bytes = bytes.len(), "upload ready for naming");
                self.pending = Some(pending);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Start a naming step for a document received through a share link.
    pub fn import_shared(&mut self, fragment: &str) -> Result<()> {
        self.require_user()?;
        let doc = parse_share_fragment(fragment)?;
        tracing::info!(name = %doc.name, "importing shared document");
        self.pending = Some(doc.into());
        Ok(())
    }

    /// Save the pending upload under `name` (or its default name).
    pub fn save_upload(&mut self, name: &str) -> Result<&PdfFile> {
        let owner = self.require_user()?.clone();
        let pending = self
            .pending
            .take()
            .ok_or_else(|| ShelfError::NotFound("pending upload".to_string()))?;

        let pdf = upload::commit(pending, name, &owner, self.ids.as_ref());
        tracing::info!(id = %pdf.id, name = %pdf.name, owner = %owner.name, "saved document");
        self.update_library(|lib| lib.push(pdf))?;
        self.status = AppStatus::Idle;

        self.library
            .files()
            .last()
            .ok_or_else(|| ShelfError::NotFound("saved document".to_string()))
    }

    pub fn cancel_upload(&mut self) {
        self.pending = None;
        self.settle_upload();
    }

    /// Leave the `Uploading` state if the upload never reached an outcome.
    pub fn settle_upload(&mut self) {
        if self.status == AppStatus::Uploading {
            self.status = AppStatus::Idle;
        }
    }

    // ========================================================================
    // Viewer
    // ========================================================================

    pub fn open(&mut self, id: &str) -> Result<&ViewHandle> {
        self.require_user()?;
        let pdf = self
            .library
            .find(id)
            .ok_or_else(|| ShelfError::NotFound(id.to_string()))?;

        match self.viewer.open(pdf) {
            Ok(handle) => Ok(handle),
            Err(e) => {
                tracing::error!(id, "could not open document: {}", e);
                self.status = AppStatus::Error;
                Err(e)
            }
        }
    }

    pub fn close_viewer(&mut self) {
        self.viewer.close();
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.status, AppStatus::Error | AppStatus::Uploading) {
            self.status = AppStatus::Idle;
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Append a comment by the current user. Blank text is a no-op and
    /// yields `Ok(None)`, as does an unknown record.
    pub fn add_comment(&mut self, pdf_id: &str, text: &str) -> Result<Option<&Comment>> {
        let author = self.require_user()?.clone();
        if text.trim().is_empty() || self.library.find(pdf_id).is_none() {
            return Ok(None);
        }

        let comment = Comment {
            id: self.ids.next_id(),
            user_id: author.id,
            user_name: author.name,
            text: text.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        };
        self.update_library(|lib| {
            lib.add_comment(pdf_id, comment);
        })?;

        Ok(self
            .library
            .find(pdf_id)
            .and_then(|pdf| pdf.comments.last()))
    }

    /// Show the thread of `pdf_id`, or hide it if it is already shown.
    pub fn toggle_thread(&mut self, pdf_id: &str) {
        if self.open_thread.as_deref() == Some(pdf_id) {
            self.open_thread = None;
        } else {
            self.open_thread = Some(pdf_id.to_string());
        }
    }

    // ========================================================================
    // Delete
    // ========================================================================

    /// First phase: ask for confirmation. Only the owner may get this far.
    pub fn request_delete(&mut self, id: &str) -> Result<()> {
        let user = self.require_user()?;
        let pdf = self
            .library
            .find(id)
            .ok_or_else(|| ShelfError::NotFound(id.to_string()))?;
        if !pdf.is_owned_by(user) {
            return Err(ShelfError::Forbidden);
        }
        self.delete_confirm = Some(id.to_string());
        Ok(())
    }

    /// Second phase: remove the record awaiting confirmation.
    pub fn confirm_delete(&mut self) -> Result<Option<PdfFile>> {
        let Some(id) = self.delete_confirm.take() else {
            return Ok(None);
        };
        let user = self.require_user()?;
        match self.library.find(&id) {
            Some(pdf) if !pdf.is_owned_by(user) => return Err(ShelfError::Forbidden),
            Some(_) => {}
            None => return Ok(None),
        }

        if self.viewer.active_record() == Some(id.as_str()) {
            self.viewer.close();
        }
        if self.open_thread.as_deref() == Some(id.as_str()) {
            self.open_thread = None;
        }

        let mut removed = None;
        self.update_library(|lib| removed = lib.remove(&id))?;
        if let Some(ref pdf) = removed {
            tracing::info!(id = %pdf.id, name = %pdf.name, "deleted document");
        }
        Ok(removed)
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirm = None;
    }

    // ========================================================================
    // Share
    // ========================================================================

    pub fn share_link(&self, id: &str, origin: &str) -> Result<String> {
        self.require_user()?;
        let pdf = self
            .library
            .find(id)
            .ok_or_else(|| ShelfError::NotFound(id.to_string()))?;
        Ok(build_share_link(origin, "/", pdf))
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    fn update_library<F>(&mut self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Library),
    {
        let mut next = self.library.clone();
        mutate(&mut next);
        library::save(self.store.as_ref(), &next)?;
        self.library = next;
        Ok(())
    }
}
