//! The library page: document list, comment threads, and the dialogs for
//! naming an upload and confirming a delete.

use crate::app::App;
use crate::models::{AppStatus, Comment, PdfFile, PendingUpload};

use super::html_escape;
use super::viewer::render_viewer;

pub fn render_library(app: &App, search: &str) -> String {
    let mut html = String::new();

    html.push_str(&status_banner(app.status()));

    let files = app.filter(search);
    if app.library().is_empty() {
        html.push_str(
            r#"<div class="empty-state">
                <h1>Nothing here yet</h1>
                <p>Upload your first PDF to start the shelf.</p>
            </div>"#,
        );
    } else if files.is_empty() {
        html.push_str(&format!(
            r#"<p class="empty-state">No documents match "{}".</p>"#,
            html_escape(search)
        ));
    } else {
        html.push_str("<ul class=\"pdf-list\">");
        for pdf in files {
            let thread_open = app.open_thread() == Some(pdf.id.as_str());
            html.push_str(&pdf_item(pdf, app.can_delete(pdf), thread_open));
        }
        html.push_str("</ul>");
    }

    html.push_str(UPLOAD_FORM);

    if let Some(pending) = app.pending_upload() {
        html.push_str(&naming_dialog(pending));
    }
    if let Some(pdf) = app.delete_confirmation() {
        html.push_str(&delete_dialog(pdf));
    }

    html.push_str(&render_viewer(app.viewer()));
    html.push_str(PAGE_SCRIPT);
    html
}

fn status_banner(status: AppStatus) -> String {
    match status {
        AppStatus::Error => r#"<div class="message error">
                <span>Something went wrong. Try again.</span>
                <form method="POST" action="/dismiss"><button class="btn secondary" type="submit">Dismiss</button></form>
            </div>"#
            .to_string(),
        AppStatus::Uploading => r#"<div class="message info">
                <span>Uploading...</span>
                <form method="POST" action="/dismiss"><button class="btn secondary" type="submit">Dismiss</button></form>
            </div>"#
            .to_string(),
        AppStatus::Idle | AppStatus::AuthRequired => String::new(),
    }
}

fn pdf_item(pdf: &PdfFile, deletable: bool, thread_open: bool) -> String {
    let id = urlencoding::encode(&pdf.id);

    let delete_button = if deletable {
        format!(
            r#"<form method="POST" action="/delete/{id}">
                <button class="btn secondary" type="submit" title="Delete">Delete</button>
            </form>"#,
            id = id
        )
    } else {
        String::new()
    };

    let toggle_label = if thread_open {
        "Hide comments".to_string()
    } else {
        format!("Show comments ({})", pdf.comments.len())
    };

    let thread = if thread_open {
        comment_thread(&id, &pdf.comments)
    } else {
        String::new()
    };

    format!(
        r#"<li class="pdf-item">
            <div class="pdf-row">
                <div>
                    <a href="/read/{id}" class="title">{name}</a>
                    <div class="owner">Uploaded by {owner}</div>
                </div>
                <div class="pdf-actions">
                    <a class="btn" href="/read/{id}">Read</a>
                    <button class="btn secondary" onclick="copyShareLink('{id}')">Share</button>
                    <span class="copy-hint" id="copied-{id}"></span>
                    {delete_button}
                </div>
            </div>
            <a class="thread-toggle" href="/comments/{id}">{toggle_label}</a>
            {thread}
        </li>"#,
        id = id,
        name = html_escape(&pdf.name),
        owner = html_escape(&pdf.owner_name),
        delete_button = delete_button,
        toggle_label = toggle_label,
        thread = thread,
    )
}

fn comment_thread(id: &str, comments: &[Comment]) -> String {
    let mut html = String::from("<div class=\"thread\">");

    if comments.is_empty() {
        html.push_str("<p class=\"comment-meta\">No comments yet.</p>");
    }
    for comment in comments {
        let date = comment
            .posted_at()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        html.push_str(&format!(
            r#"<div class="comment">
                <div class="comment-meta"><span>{}</span><span>{}</span></div>
                <p>{}</p>
            </div>"#,
            html_escape(&comment.user_name),
            date,
            html_escape(&comment.text)
        ));
    }

    html.push_str(&format!(
        r#"<form class="comment-form" method="POST" action="/comment/{}">
            <input type="text" name="text" placeholder="Write a comment..." autocomplete="off">
            <button class="btn" type="submit">Send</button>
        </form></div>"#,
        id
    ));
    html
}

fn naming_dialog(pending: &PendingUpload) -> String {
    format!(
        r#"<div class="modal-overlay">
            <div class="modal">
                <h2>Name this document</h2>
                <form method="POST" action="/upload/name">
                    <input type="text" name="name" value="{}" placeholder="Document name" autofocus>
                    <div class="modal-actions">
                        <button class="btn" type="submit">Save</button>
                    </div>
                </form>
                <form method="POST" action="/upload/cancel" class="modal-actions">
                    <button class="btn secondary" type="submit">Cancel</button>
                </form>
            </div>
        </div>"#,
        html_escape(&pending.default_name)
    )
}

fn delete_dialog(pdf: &PdfFile) -> String {
    format!(
        r#"<div class="modal-overlay">
            <div class="modal">
                <h2>Delete "{}"?</h2>
                <p>This removes the document and its comments for good. It cannot be undone.</p>
                <div class="modal-actions">
                    <form method="POST" action="/delete/cancel">
                        <button class="btn secondary" type="submit">Keep it</button>
                    </form>
                    <form method="POST" action="/delete/confirm">
                        <button class="btn danger" type="submit">Delete</button>
                    </form>
                </div>
            </div>
        </div>"#,
        html_escape(&pdf.name)
    )
}

const UPLOAD_FORM: &str = r#"
    <form method="POST" action="/upload" enctype="multipart/form-data" id="upload-form">
        <input type="file" name="file" accept=".pdf,application/pdf" id="upload-input" hidden>
    </form>
    <button class="fab" title="Upload PDF" onclick="document.getElementById('upload-input').click()">+</button>
    <div class="busy-overlay" id="busy-overlay">Uploading...</div>
"#;

const PAGE_SCRIPT: &str = r#"
    <script>
    document.getElementById('upload-input').addEventListener('change', function() {
        if (!this.files.length) return;
        document.getElementById('busy-overlay').classList.add('active');
        document.getElementById('upload-form').submit();
    });

    // A share link carries the document in its fragment, which never reaches
    // the server. Forward it to the import action.
    (function() {
        if (!location.hash.startsWith('#share=')) return;
        const form = document.createElement('form');
        form.method = 'POST';
        form.action = '/import';
        const field = document.createElement('input');
        field.type = 'hidden';
        field.name = 'fragment';
        field.value = location.hash;
        form.appendChild(field);
        document.body.appendChild(form);
        history.replaceState(null, '', location.pathname + location.search);
        form.submit();
    })();

    async function copyShareLink(id) {
        const hint = document.getElementById('copied-' + id);
        try {
            const response = await fetch('/share/' + id);
            if (!response.ok) throw new Error('status ' + response.status);
            await navigator.clipboard.writeText(await response.text());
            hint.textContent = 'Link copied!';
        } catch (err) {
            console.error('Failed to copy share link:', err);
            hint.textContent = 'Copy failed';
        }
        setTimeout(() => { hint.textContent = ''; }, 2000);
    }
    </script>
"#;
