//! Upload pipeline: accept a PDF, encode it, then name and save it.

use crate::ids::IdGenerator;
use crate::models::{PdfFile, PendingUpload, User};
use base64::{engine::general_purpose::STANDARD, Engine};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Whether a declared content type is a PDF. Parameters such as
/// `; charset=...` are ignored.
pub fn is_pdf(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
        .unwrap_or(false)
}

pub fn encode_payload(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_payload(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(payload)
}

/// The uploaded file name without a trailing `.pdf`.
pub fn default_display_name(file_name: &str) -> String {
    let len = file_name.len();
    if len >= 4 && file_name.is_char_boundary(len - 4) && file_name[len - 4..].eq_ignore_ascii_case(".pdf") {
        file_name[..len - 4].to_string()
    } else {
        file_name.to_string()
    }
}

/// Encode a received file. Anything that is not declared as a PDF is
/// dropped without complaint.
pub fn begin(file_name: &str, content_type: Option<&str>, bytes: &[u8]) -> Option<PendingUpload> {
    if !is_pdf(content_type) {
        tracing::debug!(file = file_name, ?content_type, "ignoring non-PDF upload");
        return None;
    }

    Some(PendingUpload {
        base64: encode_payload(bytes),
        default_name: default_display_name(file_name),
    })
}

/// Turn a named pending upload into a library record owned by `owner`.
/// A blank name falls back to the default derived from the file name.
pub fn commit(pending: PendingUpload, name: &str, owner: &User, ids: &dyn IdGenerator) -> PdfFile {
    let name = name.trim();
    let name = if name.is_empty() {
        pending.default_name
    } else {
        name.to_string()
    };

    PdfFile {
        id: ids.next_id(),
        name,
        base64: pending.base64,
        owner_id: owner.id.clone(),
        owner_name: owner.name.clone(),
        comments: Vec::new(),
    }
}
