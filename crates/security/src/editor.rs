//! Clean-up for markup saved by rich-text editors.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::BLOCK_ELEMENTS;

lazy_static! {
    /// One pattern per block element, matching an instance with only whitespace inside
    static ref EMPTY_BLOCKS: Vec<Regex> = BLOCK_ELEMENTS
        .iter()
        .map(|name| Regex::new(&format!(r"<{0}(?:\s[^>]*)?>\s*</{0}>", name)).unwrap())
        .collect();

    static ref JAVASCRIPT_SCHEME: Regex = Regex::new(r"(?i)javascript:").unwrap();
}

/// Fix up the HTML saved by a rich-text editor.
///
/// Block elements with no content are removed, then every `javascript:`
/// is removed regardless of case.
pub fn fix_editor_output(text: &str) -> String {
    let mut text = text.to_string();

    for pattern in EMPTY_BLOCKS.iter() {
        if pattern.is_match(&text) {
            text = pattern.replace_all(&text, "").into_owned();
        }
    }

    // Removing one occurrence can join the halves of another
    while JAVASCRIPT_SCHEME.is_match(&text) {
        debug!("Removing javascript: from editor output");
        text = JAVASCRIPT_SCHEME.replace_all(&text, "").into_owned();
    }

    text
}
