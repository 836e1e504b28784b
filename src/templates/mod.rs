//! HTML templates and styling for the library.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants
//! - `components` - Shared HTML components (nav bar, base template, login form)
//! - `library` - Library page with comment threads and dialogs
//! - `viewer` - Reader overlay for an open document

mod components;
mod library;
mod styles;
mod viewer;

pub use components::{base_html, login_form, nav_bar};
pub use library::render_library;
pub use styles::STYLE;
pub use viewer::render_viewer;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
