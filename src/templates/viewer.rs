//! Reader overlay shown on top of the library while a document is open.

use crate::viewer::Viewer;

use super::html_escape;

/// Full-screen reader for the open record, or nothing when the viewer is
/// closed.
pub fn render_viewer(viewer: &Viewer) -> String {
    let (Some(handle), Some((name, owner))) = (viewer.handle(), viewer.title()) else {
        return String::new();
    };

    format!(
        r##"<div class="reader" id="reader">
            <div class="reader-header">
                <div>
                    <h2>{name}</h2>
                    <span class="owner">Uploaded by {owner}</span>
                </div>
                <div class="reader-actions">
                    <a href="{url}" target="_blank" rel="noopener noreferrer">Open externally</a>
                    <button class="btn secondary" onclick="toggleFullScreen()">Full screen</button>
                    <a class="btn danger" href="/close">Close</a>
                </div>
            </div>
            <div class="reader-body">
                <iframe src="{display_url}" title="{name}"></iframe>
            </div>
        </div>
        <script>
        function toggleFullScreen() {{
            const reader = document.getElementById('reader');
            if (!document.fullscreenElement) {{
                reader.requestFullscreen().catch(err => {{
                    console.error('Could not enter full screen: ' + err.message);
                }});
            }} else {{
                document.exitFullscreen();
            }}
        }}
        </script>"##,
        name = html_escape(name),
        owner = html_escape(owner),
        url = handle.url(),
        display_url = handle.display_url(),
    )
}
