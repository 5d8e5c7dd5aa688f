//! Remove or escape HTML tags in a string while keeping an allow-list of tag names.
//!
//! Stripping works in three passes over the text. Allowed tags are first
//! swapped for a pair of sentinel characters that do not occur anywhere in the
//! input, every remaining tag is then deleted, and finally the sentinels are
//! turned back into tags. Escaping is a single pass that entity-encodes every
//! tag-shaped span whose name is not allowed.

use std::collections::HashSet;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Captures, Regex};

use crate::config::{LineEnding, SanitiserConfig};
use crate::encoding::html_encode;
use crate::error::{SecurityError, SecurityResult};

lazy_static! {
    /// Any tag-like span, from `<` to the next `>`
    static ref ANY_TAG: Regex = Regex::new(r"(?i)<[^>]*>").unwrap();

    /// Opening or closing marker, tag name, and the rest of the tag up to the first `>`
    static ref TAG_SHAPE: Regex = Regex::new(r"(?i)(</?)([a-z][a-z0-9]*)([^>]*>)").unwrap();
}

/// Removes or escapes HTML tags, sparing the configured tag names
#[derive(Debug, Clone, Default)]
pub struct TagSanitiser {
    config: SanitiserConfig,
    /// Matches an allowed opening or closing tag, capturing everything between `<` and `>`
    protect: Option<Regex>,
}

impl TagSanitiser {
    /// Create a sanitiser from a configuration
    pub fn new(config: SanitiserConfig) -> SecurityResult<Self> {
        config.validate()?;

        let protect = match config.allowed_tags.as_deref() {
            Some(names) if !names.is_empty() => {
                let alternation = names
                    .iter()
                    .map(|name| regex::escape(name))
                    .collect::<Vec<_>>()
                    .join("|");
                let pattern = format!(r"<(/?(?:{})\b[^>]*)>", alternation);
                let regex = Regex::new(&pattern)
                    .map_err(|e| SecurityError::InvalidConfiguration(e.to_string()))?;
                Some(regex)
            }
            _ => None,
        };

        Ok(Self { config, protect })
    }

    /// Create a sanitiser that allows the given tag names
    pub fn allowing<I, S>(tags: I) -> SecurityResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(SanitiserConfig::allowing(tags))
    }

    /// The configuration this sanitiser was built from
    pub fn config(&self) -> &SanitiserConfig {
        &self.config
    }

    /// The allowed tag names, empty when no tags are allowed
    pub fn allowed_tags(&self) -> &[String] {
        self.config.allowed_tags.as_deref().unwrap_or(&[])
    }

    fn line_ending(&self) -> LineEnding {
        self.config.line_ending
    }

    /// Removes XML/HTML tags from a string, leaving only the text content and
    /// any allowed tags.
    ///
    /// `<br />` becomes a line break and `</p>` a blank line before the
    /// remaining tags are removed, so the structure survives as whitespace.
    /// The result is trimmed.
    pub fn strip_tags(&self, text: &str) -> String {
        let sentinels = match &self.protect {
            Some(_) => {
                let found = find_sentinels(text);
                if found.is_none() {
                    warn!("No unused sentinel characters in input; stripping allowed tags as well");
                }
                found
            }
            None => None,
        };

        let mut work = match (&self.protect, sentinels) {
            (Some(protect), Some((open, close))) => protect
                .replace_all(text, |caps: &Captures| format!("{}{}{}", open, &caps[1], close))
                .into_owned(),
            _ => text.to_string(),
        };

        let line_ending = self.line_ending();
        work = work
            .replace("<br />", line_ending.as_str())
            .replace("</p>", &line_ending.repeat(2));
        work = ANY_TAG.replace_all(&work, "").into_owned();

        if let Some((open, close)) = sentinels {
            work = restore_protected(&work, open, close);
        }

        work.trim().to_string()
    }

    /// Escapes XML/HTML tags in a string so that they appear as literal text
    /// within HTML or XML. Tags whose name is allowed are left untouched.
    pub fn escape_tags(&self, text: &str) -> String {
        let allowed = self.allowed_tags();
        TAG_SHAPE
            .replace_all(text, |caps: &Captures| escape_tag(caps, allowed))
            .into_owned()
    }
}

/// Leave a matched tag alone if its name is allowed, otherwise encode it.
fn escape_tag(caps: &Captures, allowed: &[String]) -> String {
    let tag = &caps[0];
    let name = &caps[2];
    if allowed.iter().any(|a| a == name) {
        tag.to_string()
    } else {
        debug!("Escaping <{}> tag", name);
        html_encode(tag)
    }
}

/// Code points that may serve as sentinels
fn private_use_chars() -> impl Iterator<Item = char> {
    (0xE000u32..=0xF8FF)
        .chain(0xF0000..=0xFFFFD)
        .chain(0x100000..=0x10FFFD)
        .filter_map(char::from_u32)
}

/// Pick two private use characters which do not appear in `text`.
fn find_sentinels(text: &str) -> Option<(char, char)> {
    let used: HashSet<char> = text.chars().filter(|c| is_private_use(*c)).collect();
    let mut unused = private_use_chars().filter(|c| !used.contains(c));
    Some((unused.next()?, unused.next()?))
}

fn is_private_use(c: char) -> bool {
    matches!(u32::from(c), 0xE000..=0xF8FF | 0xF0000..=0xFFFFD | 0x100000..=0x10FFFD)
}

/// Turn `open inner close` back into `<inner>`.
///
/// A sentinel loses its partner when the generic pass deletes a tag that
/// overlaps a protected one. Unpaired sentinels are dropped and the text
/// they enclosed is kept as plain text.
fn restore_protected(text: &str, open: char, close: char) -> String {
    let mut restored = String::with_capacity(text.len());
    let mut pending: Option<String> = None;

    for c in text.chars() {
        if c == open {
            if let Some(unpaired) = pending.take() {
                restored.push_str(&unpaired);
            }
            pending = Some(String::new());
        } else if c == close {
            if let Some(inner) = pending.take() {
                restored.push('<');
                restored.push_str(&inner);
                restored.push('>');
            }
        } else if let Some(inner) = pending.as_mut() {
            inner.push(c);
        } else {
            restored.push(c);
        }
    }

    if let Some(unpaired) = pending {
        restored.push_str(&unpaired);
    }
    restored
}

/// Remove tags from `text`, keeping the tags named in `allowed`.
///
/// Builds a new sanitiser on every call. Keep a [`TagSanitiser`] when the same
/// allow-list is used repeatedly.
pub fn strip_tags(text: &str, allowed: Option<&[&str]>) -> SecurityResult<String> {
    Ok(sanitiser_for(allowed)?.strip_tags(text))
}

/// Entity-encode tags in `text`, keeping the tags named in `allowed`.
///
/// Like [`strip_tags`], prefer a reused [`TagSanitiser`] for repeated calls.
pub fn escape_tags(text: &str, allowed: Option<&[&str]>) -> SecurityResult<String> {
    Ok(sanitiser_for(allowed)?.escape_tags(text))
}

fn sanitiser_for(allowed: Option<&[&str]>) -> SecurityResult<TagSanitiser> {
    match allowed {
        Some(names) => TagSanitiser::allowing(names.iter().copied()),
        None => Ok(TagSanitiser::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_all_tags() {
        let sanitiser = TagSanitiser::default();
        assert_eq!(
            sanitiser.strip_tags("<div class=\"x\">Hello <b>world</b></div>"),
            "Hello world"
        );
        assert_eq!(sanitiser.strip_tags("  no tags here  "), "no tags here");
        assert_eq!(sanitiser.strip_tags(""), "");
    }

    #[test]
    fn test_strip_keeps_structure_as_whitespace() {
        let sanitiser = TagSanitiser::default();
        assert_eq!(
            sanitiser.strip_tags("<p>One<br />two</p><p>Three</p>"),
            "One\ntwo\n\nThree"
        );

        let crlf = TagSanitiser::new(SanitiserConfig {
            line_ending: LineEnding::CrLf,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(crlf.strip_tags("<p>One</p><p>Two</p>"), "One\r\n\r\nTwo");
    }

    #[test]
    fn test_strip_keeps_allowed_tags() {
        let sanitiser = TagSanitiser::allowing(["b", "i"]).unwrap();
        assert_eq!(
            sanitiser.strip_tags("<p>Some <b class=\"x\">bold</b> and <I>caps</I> and <i>it</i></p>"),
            "Some <b class=\"x\">bold</b> and caps and <i>it</i>"
        );
    }

    #[test]
    fn test_allowed_name_is_whole_tag_name() {
        let sanitiser = TagSanitiser::allowing(["b"]).unwrap();
        assert_eq!(sanitiser.strip_tags("<b>x</b><br>y<big>z</big>"), "<b>x</b>yz");
    }

    #[test]
    fn test_allowed_break_and_paragraph_are_not_converted() {
        let sanitiser = TagSanitiser::allowing(["br", "p"]).unwrap();
        assert_eq!(
            sanitiser.strip_tags("<p>One<br />two</p><div>x</div>"),
            "<p>One<br />two</p>x"
        );
    }

    #[test]
    fn test_strip_does_not_confuse_sentinel_lookalikes() {
        let sanitiser = TagSanitiser::allowing(["b"]).unwrap();
        let text = "{{{b}}} \u{E000}<b>x</b>\u{E001}";
        assert_eq!(sanitiser.strip_tags(text), text);
    }

    #[test]
    fn test_strip_drops_broken_protected_tags() {
        let sanitiser = TagSanitiser::allowing(["b"]).unwrap();
        // The generic pass removes "<x ... y>" which swallows the end of the protected "<b <x>"
        assert_eq!(sanitiser.strip_tags("<b <x>y>"), "b");
    }

    #[test]
    fn test_restore_protected() {
        assert_eq!(restore_protected("a\u{E000}b\u{E001}c", '\u{E000}', '\u{E001}'), "a<b>c");
        assert_eq!(restore_protected("\u{E000}b", '\u{E000}', '\u{E001}'), "b");
        assert_eq!(restore_protected("b\u{E001}", '\u{E000}', '\u{E001}'), "b");
        assert_eq!(
            restore_protected("\u{E000}x\u{E000}i\u{E001}", '\u{E000}', '\u{E001}'),
            "x<i>"
        );
    }

    #[test]
    fn test_find_sentinels_skips_used_characters() {
        assert_eq!(find_sentinels("plain"), Some(('\u{E000}', '\u{E001}')));
        assert_eq!(find_sentinels("\u{E000}\u{E002}"), Some(('\u{E001}', '\u{E003}')));
    }

    #[test]
    fn test_escape_disallowed_tags() {
        let sanitiser = TagSanitiser::default();
        assert_eq!(
            sanitiser.escape_tags("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
        assert_eq!(sanitiser.escape_tags("<SCRIPT>x</SCRIPT>"), "&lt;SCRIPT&gt;x&lt;/SCRIPT&gt;");
        assert_eq!(sanitiser.escape_tags("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
    }

    #[test]
    fn test_escape_keeps_allowed_tags() {
        let sanitiser = TagSanitiser::allowing(["em", "h2"]).unwrap();
        assert_eq!(
            sanitiser.escape_tags("<h2 class=\"t\">Title</h2><em>x</em><img src=x onerror=y>"),
            "<h2 class=\"t\">Title</h2><em>x</em>&lt;img src=x onerror=y&gt;"
        );
    }

    #[test]
    fn test_escape_matches_one_tag_at_a_time() {
        let sanitiser = TagSanitiser::allowing(["b"]).unwrap();
        assert_eq!(
            sanitiser.escape_tags("<b>bold</b><u>under</u>"),
            "<b>bold</b>&lt;u&gt;under&lt;/u&gt;"
        );
    }

    #[test]
    fn test_free_functions() {
        assert_eq!(strip_tags("<b>x</b><i>y</i>", Some(&["i"][..])).unwrap(), "x<i>y</i>");
        assert_eq!(strip_tags("<b>x</b>", None).unwrap(), "x");
        assert_eq!(escape_tags("<b>x</b>", None).unwrap(), "&lt;b&gt;x&lt;/b&gt;");
        assert!(matches!(
            strip_tags("x", Some(&["b>"][..])),
            Err(SecurityError::InvalidConfiguration(_))
        ));
    }
}
