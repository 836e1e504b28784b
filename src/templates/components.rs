//! Shared HTML components: navigation bar, base template and login form.

use crate::models::User;

use super::html_escape;
use super::styles::STYLE;

// ============================================================================
// Navigation Bar
// ============================================================================

pub fn nav_bar(search_query: Option<&str>, user: Option<&User>) -> String {
    let Some(user) = user else {
        return r#"<nav class="nav-bar"><a href="/">Shelf</a></nav>"#.to_string();
    };

    format!(
        r#"<nav class="nav-bar">
            <a href="/">Shelf</a>
            <form class="search-box" action="/" method="get" id="search-form">
                <input type="text" name="q" placeholder="Search by name..." value="{}" id="search-input">
            </form>
            <span class="spacer"></span>
            <span class="user">{}</span>
            <a href="/logout">Logout</a>
        </nav>"#,
        html_escape(search_query.unwrap_or("")),
        html_escape(&user.name)
    )
}

// ============================================================================
// Base Template
// ============================================================================

pub fn base_html(title: &str, content: &str, search_query: Option<&str>, user: Option<&User>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {nav}
    <div class="container">
        {content}
    </div>
    <script>
    // Filter as you type
    (function() {{
        const input = document.getElementById('search-input');
        if (!input) return;
        let timer = null;
        input.addEventListener('input', function() {{
            clearTimeout(timer);
            timer = setTimeout(() => document.getElementById('search-form').submit(), 250);
        }});
    }})();
    </script>
</body>
</html>"#,
        title = html_escape(title),
        nav = nav_bar(search_query, user),
        content = content,
    )
}

// ============================================================================
// Login
// ============================================================================

/// Login form. `fragment` carries a pending share link through the login so
/// the shared document is not lost.
pub fn login_form(error: Option<&str>, name: &str, fragment: &str) -> String {
    let message = error
        .map(|e| format!(r#"<div class="message error">{}</div>"#, html_escape(e)))
        .unwrap_or_default();

    format!(
        r#"<div class="login-form">
            {message}
            <h1>Shelf</h1>
            <form method="POST" action="/login">
                <input type="text" name="name" placeholder="Name" value="{name}" autofocus required>
                <input type="password" name="password" placeholder="Password" required>
                <input type="hidden" name="fragment" id="share-fragment" value="{fragment}">
                <button type="submit">Log in / Register</button>
            </form>
        </div>
        <script>
        if (location.hash.startsWith('#share=')) {{
            document.getElementById('share-fragment').value = location.hash;
        }}
        </script>"#,
        message = message,
        name = html_escape(name),
        fragment = html_escape(fragment),
    )
}
