//! Tolerant parsing of the attributes inside an HTML opening tag.
//!
//! Attribute text from editors and legacy markup is often badly quoted, so
//! values may be double quoted, single quoted or not quoted at all. Anything
//! after the last `=` which cannot be read as an attribute is dropped.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{AttributeOptions, ParserConfig};
use crate::error::{ParserError, ParserResult};
use crate::rebuild::rebuild_tag;

/// Attributes which can only have one value, in the order they were found
pub type SingleValuedAttributes = IndexMap<String, String>;

/// Attributes which can have several values, in the order they were found
pub type MultiValuedAttributes = IndexMap<String, Vec<String>>;

lazy_static! {
    /// A complete opening tag: name, then everything up to the closing `>`
    static ref OPENING_TAG: Regex =
        Regex::new(r"(?s)^<([A-Za-z][A-Za-z0-9]*)([\s/][^>]*)?>$").unwrap();
}

/// A single `name=value` pair as found in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAttribute<'a> {
    /// Name exactly as written
    pub name: &'a str,
    /// Value without its quotes
    pub value: &'a str,
    /// Quote character around the value, if any
    pub quote: Option<char>,
}

/// Splits attribute text into name/value pairs
pub struct AttributeTokenizer<'a> {
    /// Input text
    input: &'a str,
    /// Current position
    position: usize,
}

impl<'a> AttributeTokenizer<'a> {
    /// Create a new tokenizer over the attribute text of a tag
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.trim_end(),
            position: 0,
        }
    }

    /// Get the next attribute, or `None` once the text is used up
    pub fn next_attribute(&mut self) -> Option<RawAttribute<'a>> {
        self.skip_whitespace();

        let rest = self.remaining();
        if rest.is_empty() {
            return None;
        }

        let Some(equals) = rest.find('=') else {
            tracing::debug!("Discarding attribute text with no '=': {:?}", rest);
            self.position = self.input.len();
            return None;
        };

        let name = &rest[..equals];
        let after = &rest[equals + 1..];

        let (value, quote, consumed) = match after.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &after[1..];
                match body.find(q) {
                    Some(end) => (&body[..end], Some(q), 1 + end + 1),
                    None => {
                        tracing::debug!("Unterminated {} quote in attribute {:?}", q, name);
                        (body, Some(q), after.len())
                    }
                }
            }
            Some(_) => {
                let end = after.find(char::is_whitespace).unwrap_or(after.len());
                (&after[..end], None, end)
            }
            None => (after, None, 0),
        };

        self.position += equals + 1 + consumed;
        Some(RawAttribute { name, value, quote })
    }

    /// Text not yet consumed
    fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        let rest = self.remaining();
        self.position += rest.len() - rest.trim_start().len();
    }
}

impl<'a> Iterator for AttributeTokenizer<'a> {
    type Item = RawAttribute<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_attribute()
    }
}

/// An opening tag split into its parts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTag {
    /// Lower-cased tag name
    pub name: String,
    /// Attributes with one value
    pub attributes: SingleValuedAttributes,
    /// Attributes with several values
    pub multi_valued: MultiValuedAttributes,
    /// Whether the tag closed itself with `/>`
    pub empty_element: bool,
}

impl ParsedTag {
    /// Rebuild the tag, optionally keeping only some attributes
    pub fn to_tag(&self, restrict_to: Option<&[&str]>) -> String {
        rebuild_tag(
            &self.name,
            &self.attributes,
            &self.multi_valued,
            restrict_to,
            self.empty_element,
        )
    }
}

/// Parses fragments of HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    config: ParserConfig,
}

impl HtmlParser {
    /// Create a new parser with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parser configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Attributes which can contain multiple values
    pub fn multi_valued_attributes(&self) -> &[String] {
        &self.config.multi_valued_attributes
    }

    /// Options splitting the configured multi-valued attributes and discarding nothing
    pub fn default_options(&self) -> AttributeOptions {
        AttributeOptions::from(&self.config)
    }

    /// Parses the attributes string from inside an HTML opening tag, even if
    /// they are not correctly quoted.
    pub fn parse_attributes(&self, attributes: &str, values: &mut SingleValuedAttributes) {
        parse_into(attributes, values, None, &AttributeOptions::default());
    }

    /// Parses the attributes string from inside an HTML opening tag, even if
    /// they are not correctly quoted, splitting multi-valued attributes and
    /// discarding unwanted ones.
    ///
    /// Fails only if `options` names multi-valued attributes but `multi_valued`
    /// is `None`.
    pub fn parse_attributes_with(
        &self,
        attributes: &str,
        single_valued: &mut SingleValuedAttributes,
        multi_valued: Option<&mut MultiValuedAttributes>,
        options: &AttributeOptions,
    ) -> ParserResult<()> {
        if multi_valued.is_none() && !options.split_values_for.is_empty() {
            return Err(ParserError::InvalidArgument(
                "multi-valued attributes requested without a map to hold them".to_string(),
            ));
        }
        parse_into(attributes, single_valued, multi_valued, options);
        Ok(())
    }

    /// Split a complete opening tag such as `<a href="/x" class="y z">` into
    /// its name and attributes, using [`HtmlParser::default_options`].
    ///
    /// Returns `None` if `tag` is not an opening tag.
    pub fn parse_tag(&self, tag: &str) -> Option<ParsedTag> {
        let caps = OPENING_TAG.captures(tag.trim())?;
        let name = caps[1].to_lowercase();
        let rest = caps.get(2).map_or("", |m| m.as_str()).trim_end();

        let (attributes, empty_element) = match rest.strip_suffix('/') {
            Some(before)
                if before.is_empty()
                    || before.ends_with(|c: char| c.is_whitespace() || c == '"' || c == '\'') =>
            {
                (before, true)
            }
            _ => (rest, false),
        };

        let mut parsed = ParsedTag {
            name,
            empty_element,
            ..Default::default()
        };
        parse_into(
            attributes,
            &mut parsed.attributes,
            Some(&mut parsed.multi_valued),
            &self.default_options(),
        );
        Some(parsed)
    }
}

fn parse_into(
    attributes: &str,
    single_valued: &mut SingleValuedAttributes,
    mut multi_valued: Option<&mut MultiValuedAttributes>,
    options: &AttributeOptions,
) {
    for raw in AttributeTokenizer::new(attributes) {
        let name = raw.name.to_lowercase();

        match multi_valued.as_deref_mut() {
            Some(multi) if options.is_multi_valued(&name) => {
                let values = split_values(raw.value, &options.split_values_by);
                multi.entry(name).or_default().extend(values);
            }
            _ => {
                if single_valued.contains_key(&name) {
                    tracing::debug!("Dropping duplicate attribute {:?}", name);
                } else {
                    single_valued.insert(name, raw.value.to_string());
                }
            }
        }
    }

    if !options.unwanted_attributes.is_empty() {
        single_valued.retain(|name, _| !options.is_unwanted(name));
        if let Some(multi) = multi_valued {
            multi.retain(|name, _| !options.is_unwanted(name));
        }
    }
}

/// Split `value` at every occurrence of any separator, dropping empty pieces.
///
/// At each position the separators are tried in order and the first match wins.
fn split_values(value: &str, separators: &[String]) -> Vec<String> {
    let separators: Vec<&str> = separators
        .iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();

    let mut values = Vec::new();
    let mut start = 0;
    let mut position = 0;

    while position < value.len() {
        let rest = &value[position..];
        match separators.iter().find(|sep| rest.starts_with(**sep)) {
            Some(sep) => {
                values.push(&value[start..position]);
                position += sep.len();
                start = position;
            }
            None => {
                position += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    values.push(&value[start..]);

    values
        .into_iter()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
