//! Format and fix HTML block elements such as paragraphs and headings.
//!
//! One line separator in the input is read as a line break and two as a
//! paragraph break. Text which is not already inside a block element is
//! wrapped in `<p>`.

use lazy_static::lazy_static;
use regex::Regex;
use tidyfrag_security::{validate_tag_name, LineEnding, BLOCK_ELEMENTS};

use crate::config::FormatterConfig;
use crate::error::{ParserError, ParserResult};

const LINE_BREAK: &str = "<br />";

lazy_static! {
    /// Opening tag of any of the standard block elements
    static ref DEFAULT_BLOCK_OPEN: Regex = Regex::new(&block_open_pattern(&BLOCK_ELEMENTS[..])).unwrap();

    static ref DEFAULT_FORMATTER: BlockElementFormatter = BlockElementFormatter::default();
}

/// Pattern matching the opening tag of any of `names`, by whole name
fn block_open_pattern<S: AsRef<str>>(names: &[S]) -> String {
    let alternation: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
    format!(r"<(?:{})\b[^>]*>", alternation.join("|"))
}

/// Formats text as HTML paragraphs and other block elements
#[derive(Debug, Clone)]
pub struct BlockElementFormatter {
    config: FormatterConfig,
    /// Opening tag of any configured block element
    block_open: Option<Regex>,
}

impl BlockElementFormatter {
    /// Create a formatter recognising the configured block elements
    pub fn new(config: FormatterConfig) -> ParserResult<Self> {
        for name in &config.block_elements {
            validate_tag_name(name)
                .map_err(|e| ParserError::InvalidArgument(format!("block element: {}", e)))?;
        }

        let block_open = if config.block_elements.is_empty() {
            None
        } else {
            let pattern = block_open_pattern(&config.block_elements);
            Some(Regex::new(&pattern).map_err(|e| ParserError::InvalidArgument(e.to_string()))?)
        };

        Ok(Self { config, block_open })
    }

    /// Formatter configuration
    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    fn line_ending(&self) -> LineEnding {
        self.config.line_ending
    }

    /// Formats a text string, which may already contain some HTML tags, as HTML paragraphs.
    pub fn format_as_html_paragraphs(&self, text: &str) -> String {
        let newline = self.line_ending().as_str();
        let two_newlines = self.line_ending().repeat(2);

        // Every block element starts a new chunk. None of them should end up inside a paragraph.
        let mut text = match &self.block_open {
            Some(block_open) => block_open
                .replace_all(text, format!("{}$0", two_newlines).as_str())
                .into_owned(),
            None => text.to_string(),
        };
        tracing::trace!(stage = "split blocks", %text);

        text = self.collapse_newlines(&text);
        tracing::trace!(stage = "collapse newlines", %text);

        let chunks: Vec<String> = text
            .split(two_newlines.as_str())
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| {
                if self.starts_with_block_element(chunk) {
                    chunk.to_string()
                } else {
                    format!("<p>{}</p>", chunk)
                }
            })
            .collect();

        text = chunks.concat().replace(newline, LINE_BREAK);
        tracing::trace!(stage = "join chunks", %text);

        for name in &self.config.block_elements {
            let closing_tag = format!("</{}>", name);
            // A line break just before the end of a block only ever adds unwanted space
            text = text.replace(&format!("{}{}", LINE_BREAK, closing_tag), &closing_tag);
            // Newline after each closing block element keeps the source readable
            text = text.replace(&closing_tag, &format!("{}{}", closing_tag, newline));
        }

        text
    }

    /// Like [`Self::format_as_html_paragraphs`], passing `None` through.
    pub fn format_optional(&self, text: Option<&str>) -> Option<String> {
        text.map(|t| self.format_as_html_paragraphs(t))
    }

    /// Reduce every run of three or more line separators to two.
    fn collapse_newlines(&self, text: &str) -> String {
        let two_newlines = self.line_ending().repeat(2);
        let three_newlines = self.line_ending().repeat(3);

        let mut text = text.to_string();
        loop {
            let before = text.len();
            text = text.replace(&three_newlines, &two_newlines);
            if text.len() == before {
                return text;
            }
        }
    }

    /// Check if `chunk` opens with one of the configured block elements
    fn starts_with_block_element(&self, chunk: &str) -> bool {
        let Some(rest) = chunk.strip_prefix('<') else {
            return false;
        };
        let name_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        self.config.block_elements.iter().any(|e| e == name)
    }
}

impl Default for BlockElementFormatter {
    fn default() -> Self {
        Self {
            config: FormatterConfig::default(),
            block_open: Some(DEFAULT_BLOCK_OPEN.clone()),
        }
    }
}

/// Format `text` as HTML paragraphs using the default block elements.
pub fn format_as_html_paragraphs(text: &str) -> String {
    DEFAULT_FORMATTER.format_as_html_paragraphs(text)
}
