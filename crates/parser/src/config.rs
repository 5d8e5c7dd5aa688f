use serde::{Deserialize, Serialize};
use tidyfrag_security::{LineEnding, BLOCK_ELEMENTS};

/// Configuration for the attribute parser
///
/// Built once and then only read, so a single value can be shared between
/// threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Attributes which can contain multiple values
    pub multi_valued_attributes: Vec<String>,
    /// Separators between the values of a multi-valued attribute
    pub value_separators: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            multi_valued_attributes: vec!["class".to_string(), "rel".to_string(), "rev".to_string()],
            value_separators: vec![" ".to_string()],
        }
    }
}

/// Per-call options for attribute parsing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeOptions {
    /// Names of the attributes which can have multiple values
    pub split_values_for: Vec<String>,
    /// Separators to split multiple values by
    pub split_values_by: Vec<String>,
    /// Names of attributes to discard once parsing completes
    pub unwanted_attributes: Vec<String>,
}

impl AttributeOptions {
    /// Add attribute names to discard
    pub fn discarding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unwanted_attributes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Check if values of this (lower-cased) attribute name are split
    pub fn is_multi_valued(&self, name: &str) -> bool {
        self.split_values_for.iter().any(|n| n.to_lowercase() == name)
    }

    /// Check if this (lower-cased) attribute name is discarded
    pub fn is_unwanted(&self, name: &str) -> bool {
        self.unwanted_attributes.iter().any(|n| n.to_lowercase() == name)
    }
}

impl From<&ParserConfig> for AttributeOptions {
    fn from(config: &ParserConfig) -> Self {
        Self {
            split_values_for: config.multi_valued_attributes.clone(),
            split_values_by: config.value_separators.clone(),
            unwanted_attributes: Vec::new(),
        }
    }
}

/// Configuration for the block element formatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Elements which start a new block and are never wrapped in a paragraph
    pub block_elements: Vec<String>,
    /// Separator between lines of the input and output
    pub line_ending: LineEnding,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            block_elements: BLOCK_ELEMENTS.iter().map(|s| s.to_string()).collect(),
            line_ending: LineEnding::default(),
        }
    }
}
