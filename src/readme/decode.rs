// src/readme/decode.rs
// =============================================================================
// Decoding README contents returned by the GitHub API.
//
// The API sends the file base64-encoded, wrapped at 60 columns with '\n'.
// Decoding never fails loudly: bad base64 yields DECODE_ERROR_PLACEHOLDER,
// which the views show in place of the README.
// =============================================================================

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::warn;

use crate::github::Readme;

pub const DECODE_ERROR_PLACEHOLDER: &str = "Error decoding README content";

// Returns the README text, decoding it when the API says it is base64
pub fn decode_content(readme: &Readme) -> String {
    if readme.encoding == "base64" {
        decode_base64(&readme.content)
    } else {
        readme.content.clone()
    }
}

// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected
pub fn decode_base64(encoded: &str) -> String {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!(error = %e, "README content is not valid base64");
            DECODE_ERROR_PLACEHOLDER.to_string()
        }
    }
}
