//! CSS styles for the library.
//!
//! Contains the main STYLE constant with all CSS for the web interface.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base03: #002b36;
    --base02: #073642;
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --red: #dc322f;
    --blue: #268bd2;
    --cyan: #2aa198;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --accent: var(--base2);
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 900px;
    margin: 0 auto;
    padding: 1rem;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

h1, h2, h3 { font-weight: 600; margin-top: 1.5em; margin-bottom: 0.5em; }
h1 { font-size: 1.5rem; }

.nav-bar {
    position: sticky;
    top: 0;
    background: var(--bg);
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    display: flex;
    gap: 1rem;
    align-items: center;
    flex-wrap: wrap;
    z-index: 100;
}

.nav-bar a { font-size: 0.9rem; }
.nav-bar .spacer { flex: 1; }
.nav-bar .user { font-size: 0.8rem; color: var(--muted); text-transform: uppercase; }

.search-box { display: flex; gap: 0.5rem; }

.search-box input {
    padding: 0.4rem 0.75rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg);
    color: var(--fg);
    font-size: 0.9rem;
    width: 220px;
}

/* Library list */
.pdf-list { list-style: none; }

.pdf-item {
    padding: 1rem 0;
    border-bottom: 1px solid var(--border);
}
.pdf-item:last-child { border-bottom: none; }

.pdf-row {
    display: flex;
    justify-content: space-between;
    align-items: baseline;
    gap: 1rem;
}
.pdf-row .title { font-size: 1.2rem; font-weight: 600; }
.pdf-row .owner { font-size: 0.75rem; color: var(--muted); text-transform: uppercase; }
.pdf-actions { display: flex; gap: 0.5rem; align-items: center; }
.pdf-actions form { display: inline; }
.copy-hint { font-size: 0.75rem; color: var(--cyan); }

.empty-state {
    text-align: center;
    padding: 6rem 0;
    color: var(--muted);
}

/* Comments */
.thread-toggle { font-size: 0.8rem; margin-top: 0.5rem; display: inline-block; }
.thread { margin-top: 0.75rem; padding-left: 1rem; border-left: 3px solid var(--border); }
.comment { padding: 0.5rem 0; border-bottom: 1px solid var(--border); }
.comment:last-child { border-bottom: none; }
.comment-meta { display: flex; justify-content: space-between; font-size: 0.7rem; color: var(--muted); }
.comment-form { display: flex; gap: 0.5rem; margin-top: 0.75rem; }
.comment-form input {
    flex: 1;
    padding: 0.5rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg);
    color: var(--fg);
}

.btn {
    padding: 0.4rem 0.9rem;
    border: 1px solid var(--base1);
    border-radius: 4px;
    background: var(--blue);
    color: var(--base3);
    cursor: pointer;
    font-size: 0.85rem;
    font-family: inherit;
    text-decoration: none;
    display: inline-block;
}
.btn:hover { background: var(--cyan); border-color: var(--cyan); text-decoration: none; }
.btn.secondary { background: var(--base2); color: var(--base00); border-color: var(--base1); }
.btn.secondary:hover { background: var(--base3); }
.btn.danger { background: var(--red); border-color: var(--red); }

/* Floating upload button */
.fab {
    position: fixed;
    bottom: 2rem;
    right: 2rem;
    width: 56px;
    height: 56px;
    border-radius: 50%;
    background: var(--link);
    color: white;
    border: none;
    box-shadow: 0 4px 12px rgba(0,0,0,0.3);
    z-index: 1000;
    cursor: pointer;
    font-size: 1.5rem;
    display: flex;
    align-items: center;
    justify-content: center;
    transition: transform 0.2s, background 0.2s;
}
.fab:hover { background: var(--link-hover); transform: scale(1.1); }

/* Modals */
.modal-overlay {
    position: fixed;
    inset: 0;
    background: rgba(0,0,0,0.5);
    z-index: 1001;
    display: flex;
    align-items: center;
    justify-content: center;
}
.modal {
    background: var(--bg);
    border-radius: 8px;
    width: 90%;
    max-width: 520px;
    padding: 1.5rem;
    box-shadow: 0 8px 32px rgba(0,0,0,0.3);
}
.modal h2 { margin-top: 0; }
.modal input[type=text] {
    width: 100%;
    padding: 0.75rem;
    margin: 1rem 0;
    border: 1px solid var(--border);
    border-radius: 4px;
    font-size: 1.1rem;
}
.modal-actions { display: flex; gap: 0.5rem; justify-content: flex-end; margin-top: 1rem; }
.modal-actions form { display: inline; }

.busy-overlay {
    position: fixed;
    inset: 0;
    background: rgba(253,246,227,0.9);
    z-index: 1200;
    display: none;
    align-items: center;
    justify-content: center;
    font-weight: 600;
    letter-spacing: 0.2em;
    text-transform: uppercase;
}
.busy-overlay.active { display: flex; }

/* Reader */
.reader {
    position: fixed;
    inset: 0;
    z-index: 1100;
    background: var(--base03);
    display: flex;
    flex-direction: column;
}
.reader-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 0.75rem 1.5rem;
    color: var(--base3);
    border-bottom: 1px solid var(--base01);
}
.reader-header h2 { margin: 0; font-size: 1.25rem; }
.reader-header .owner { font-size: 0.7rem; color: var(--base1); text-transform: uppercase; }
.reader-actions { display: flex; gap: 0.75rem; align-items: center; }
.reader-actions a, .reader-actions button { color: var(--base3); }
.reader-body { flex: 1; display: flex; justify-content: center; background: var(--base02); }
.reader-body iframe { width: 100%; max-width: 1100px; height: 100%; border: none; background: white; }

/* Login */
.login-form {
    max-width: 320px;
    margin: 4rem auto;
    padding: 2rem;
    background: var(--accent);
    border-radius: 8px;
}
.login-form h1 { margin-top: 0; margin-bottom: 1.5rem; text-align: center; }
.login-form input {
    width: 100%;
    padding: 0.75rem;
    margin-bottom: 1rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg);
    color: var(--fg);
    font-size: 1rem;
}
.login-form button {
    width: 100%;
    padding: 0.75rem;
    background: var(--link);
    color: white;
    border: none;
    border-radius: 4px;
    font-size: 1rem;
    cursor: pointer;
}
.login-form button:hover { background: var(--link-hover); }

.message {
    padding: 0.75rem 1rem;
    border-radius: 4px;
    margin-bottom: 1rem;
    display: flex;
    justify-content: space-between;
    align-items: center;
}
.message.error { background: #fbe3e3; color: var(--red); }
.message.info { background: var(--accent); }
"#;
