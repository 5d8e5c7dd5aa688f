//! tidyfrag's tolerant HTML fragment parser
//!
//! Reads attributes out of loosely written tags, rebuilds clean tags from
//! them and formats plain text as paragraphs and other block elements.
//! Malformed markup never fails: the parser takes what it can and moves on.
//!
//! Tag stripping and escaping live in `tidyfrag-security` and are
//! re-exported here.

pub mod attributes;
pub mod block;
pub mod config;
pub mod error;
pub mod links;
pub mod rebuild;

/// Re-export common types
pub use attributes::{
    AttributeTokenizer, HtmlParser, MultiValuedAttributes, ParsedTag, RawAttribute,
    SingleValuedAttributes,
};
pub use block::{format_as_html_paragraphs, BlockElementFormatter};
pub use config::{AttributeOptions, FormatterConfig, ParserConfig};
pub use error::{ParserError, ParserResult};
pub use links::{abbreviate_url, text_outside_links};
pub use rebuild::{rebuild_element, rebuild_tag};

pub use tidyfrag_security::{
    decode_entities, encode_every_character, escape_tags, fix_editor_output, html_encode,
    strip_tags, LineEnding, SanitiserConfig, TagSanitiser, BLOCK_ELEMENTS,
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_and_rebuild() {
        let parser = HtmlParser::default();
        let tag = parser
            .parse_tag(r#"<A HREF="/x" class="b  a" onclick=go()>"#)
            .unwrap();
        assert_eq!(
            tag.to_tag(Some(&["href", "class"][..])),
            r#"<a href="/x" class="b a">"#
        );
    }

    #[test]
    fn test_sanitise_then_format() {
        let stripped = strip_tags("Hello <script>x</script><b>world</b>\n\nBye", Some(&["b"][..]))
            .unwrap();
        assert_eq!(
            format_as_html_paragraphs(&stripped),
            "<p>Hello x<b>world</b></p>\n<p>Bye</p>\n"
        );
    }
}
