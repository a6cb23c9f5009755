// src/readme/mod.rs
// =============================================================================
// README handling: decoding the API payload and rendering the markdown.
//
// - decode.rs: base64 -> text
// - render.rs: markdown -> HTML, markdown -> terminal text
// =============================================================================

mod decode;
mod render;

pub use decode::{decode_content, DECODE_ERROR_PLACEHOLDER};
pub use render::{render_html, render_terminal, RenderOptions};

use clap::ValueEnum;

use crate::github::Repository;

// How the repo command shows a README
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReadmeMode {
    // Markdown rendered as styled terminal text
    #[default]
    Rendered,
    // The decoded markdown source, untouched
    Raw,
    // The HTML document a browser would display
    Html,
    // Skip fetching the README
    None,
}

// Size shown next to the README name: decoded length / 1024, rounded.
// Length counts UTF-16 units, the way a browser measures a string.
pub fn size_kb(content: &str) -> u64 {
    (content.encode_utf16().count() as u64 + 512) / 1024
}

// Link to the README file itself on github.com
pub fn blob_url(repository: &Repository) -> String {
    format!("{}/blob/HEAD/README.md", repository.html_url.trim_end_matches('/'))
}

// Where to send the user when the README could not be shown
pub fn fallback_url(repository: &Repository) -> String {
    format!("{}#readme", repository.html_url.trim_end_matches('/'))
}
