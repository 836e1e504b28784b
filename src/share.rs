//! Share links.
//!
//! A share link carries the whole document in its fragment:
//! `<origin><path>#share=<base64>&name=<url-encoded name>`. Fragments never
//! reach the server, so the page script forwards `location.hash` to the
//! import action, which parses it here.

use crate::error::{Result, ShelfError};
use crate::models::{PdfFile, PendingUpload};
use crate::upload::decode_payload;

const SHARE_PREFIX: &str = "share=";
const NAME_SEPARATOR: &str = "&name=";

/// Name given to an imported document whose link carries no name.
pub const UNNAMED_SHARE: &str = "Shared document";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedDocument {
    pub name: String,
    pub base64: String,
}

impl From<SharedDocument> for PendingUpload {
    fn from(doc: SharedDocument) -> Self {
        PendingUpload {
            base64: doc.base64,
            default_name: doc.name,
        }
    }
}

pub fn build_share_link(origin: &str, path: &str, pdf: &PdfFile) -> String {
    format!(
        "{}{}#{}{}{}{}",
        origin.trim_end_matches('/'),
        path,
        SHARE_PREFIX,
        pdf.base64,
        NAME_SEPARATOR,
        urlencoding::encode(&pdf.name)
    )
}

/// Parse a share fragment, with or without the leading `#`.
/// The payload must be valid base64.
pub fn parse_share_fragment(fragment: &str) -> Result<SharedDocument> {
    let fragment = fragment.trim();
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

    let rest = fragment
        .strip_prefix(SHARE_PREFIX)
        .ok_or_else(|| ShelfError::InvalidShareLink("missing share payload".to_string()))?;

    let (payload, name) = match rest.split_once(NAME_SEPARATOR) {
        Some((payload, name)) => (payload, Some(name)),
        None => (rest, None),
    };

    if payload.is_empty() {
        return Err(ShelfError::InvalidShareLink("empty payload".to_string()));
    }
    decode_payload(payload).map_err(|e| ShelfError::InvalidShareLink(e.to_string()))?;

    let name = match name {
        Some(encoded) => urlencoding::decode(encoded)
            .map_err(|e| ShelfError::InvalidShareLink(e.to_string()))?
            .trim()
            .to_string(),
        None => String::new(),
    };

    Ok(SharedDocument {
        name: if name.is_empty() {
            UNNAMED_SHARE.to_string()
        } else {
            name
        },
        base64: payload.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> PdfFile {
        PdfFile {
            id: "p1".to_string(),
            name: name.to_string(),
            base64: "JVBERi0xLjQ+/w==".to_string(),
            owner_id: "A".to_string(),
            owner_name: "A".to_string(),
            comments: vec![],
        }
    }

    #[test]
    fn test_build_share_link_format() {
        let link = build_share_link("http://127.0.0.1:3000", "/", &pdf("My Book"));
        assert_eq!(
            link,
            "http://127.0.0.1:3000/#share=JVBERi0xLjQ+/w==&name=My%20Book"
        );
    }

    #[test]
    fn test_parse_built_link() {
        let source = pdf("Mawsim & Hijra");
        let link = build_share_link("http://localhost", "/", &source);
        let fragment = link.split_once('#').unwrap().1;

        let doc = parse_share_fragment(fragment).unwrap();
        assert_eq!(doc.name, "Mawsim & Hijra");
        assert_eq!(doc.base64, source.base64);
    }

    #[test]
    fn test_parse_with_hash_and_no_name() {
        let doc = parse_share_fragment("#share=JVBERi0=").unwrap();
        assert_eq!(doc.name, UNNAMED_SHARE);
    }

    #[test]
    fn test_parse_rejects_other_fragments() {
        assert!(matches!(
            parse_share_fragment("#section-2"),
            Err(ShelfError::InvalidShareLink(_))
        ));
        assert!(parse_share_fragment("share=&name=x").is_err());
        assert!(parse_share_fragment("share=%%%&name=x").is_err());
    }

    #[test]
    fn test_shared_document_into_pending() {
        let pending: PendingUpload = parse_share_fragment("share=JVBERi0=&name=Book").unwrap().into();
        assert_eq!(pending.default_name, "Book");
        assert_eq!(pending.base64, "JVBERi0=");
    }
}
