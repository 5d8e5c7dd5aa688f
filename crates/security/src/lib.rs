//! tidyfrag Security Crate
//!
//! This crate removes or escapes tags in untrusted HTML fragments, keeping an
//! allow-list of tag names, and provides the entity encoding it relies on.
//! None of this is a security boundary on its own: it narrows what markup can
//! get through, nothing more.

pub mod config;
pub mod editor;
pub mod encoding;
pub mod error;
pub mod sanitiser;

pub use config::{is_valid_tag_name, validate_tag_name, LineEnding, SanitiserConfig};
pub use editor::fix_editor_output;
pub use encoding::{decode_entities, encode_every_character, html_encode};
pub use error::{SecurityError, SecurityResult};
pub use sanitiser::{escape_tags, strip_tags, TagSanitiser};

/// Block-level elements: structural units such as paragraphs, lists and
/// table rows, as opposed to inline formatting.
pub const BLOCK_ELEMENTS: [&str; 22] = [
    "address", "blockquote", "dl", "p", "h1", "h2", "h3", "h4", "h5", "h6", "ol", "table", "ul",
    "dd", "dt", "li", "tbody", "td", "tfoot", "th", "thead", "tr",
];
