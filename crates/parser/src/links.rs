//! Helpers for text containing links.

use lazy_static::lazy_static;
use regex::Regex;
use tidyfrag_security::{decode_entities, TagSanitiser};
use url::Url;

use crate::error::{ParserError, ParserResult};

lazy_static! {
    static ref LINK_ELEMENT: Regex = Regex::new(r"(?is)<a\s[^>]*>.*?</a>").unwrap();
}

const ELLIPSIS: char = '…';

/// Get the plain text of `text` which is not inside a link.
///
/// Link elements are removed together with their text, remaining tags are
/// stripped and entities decoded.
pub fn text_outside_links(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let without_links = LINK_ELEMENT.replace_all(text, "");
    let stripped = TagSanitiser::default().strip_tags(&without_links);
    decode_entities(&stripped).trim().to_string()
}

/// Shorten a URL for display, keeping it no longer than `max_len` characters.
///
/// The scheme, credentials and fragment are never shown. A long path of two
/// or more segments is replaced by its last segment; failing that the text is
/// cut short with an ellipsis.
pub fn abbreviate_url(url: &str, max_len: usize) -> ParserResult<String> {
    if max_len == 0 {
        return Err(ParserError::InvalidArgument(
            "maximum length must be at least 1".to_string(),
        ));
    }

    let parsed = Url::parse(url)?;

    let mut host = parsed
        .host_str()
        .map(|h| h.strip_prefix("www.").unwrap_or(h).to_string())
        .unwrap_or_default();
    if let Some(port) = parsed.port() {
        host.push_str(&format!(":{}", port));
    }

    let mut display = host.clone();
    if parsed.path() != "/" {
        display.push_str(parsed.path());
    }
    if let Some(query) = parsed.query() {
        display.push('?');
        display.push_str(query);
    }

    if display.chars().count() <= max_len {
        return Ok(display);
    }

    // Only a path with something to skip gets the `host/…/segment` form
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();
    if let [_, .., segment] = segments.as_slice() {
        let short = format!("{}/{}/{}", host, ELLIPSIS, segment);
        if short.chars().count() <= max_len {
            return Ok(short);
        }
    }

    let mut cut: String = display.chars().take(max_len - 1).collect();
    cut.push(ELLIPSIS);
    Ok(cut)
}
