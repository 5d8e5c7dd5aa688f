use serde::{Deserialize, Serialize};

use crate::error::{SecurityError, SecurityResult};

/// Line separator written in place of structural markup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The separator as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// The separator repeated `count` times
    pub fn repeat(&self, count: usize) -> String {
        self.as_str().repeat(count)
    }
}

/// Configuration for the tag sanitiser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitiserConfig {
    /// Tag names which survive stripping and escaping. `None` allows no tags.
    pub allowed_tags: Option<Vec<String>>,
    /// Separator used when `<br />` and `</p>` are stripped
    pub line_ending: LineEnding,
}

impl SanitiserConfig {
    /// Create a configuration allowing the given tag names
    pub fn allowing<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_tags: Some(tags.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Check that every allowed tag name is usable in a tag pattern
    pub fn validate(&self) -> SecurityResult<()> {
        for name in self.allowed_tags.iter().flatten() {
            validate_tag_name(name)?;
        }
        Ok(())
    }
}

/// Tag names are non-empty runs of ASCII letters and digits.
pub fn is_valid_tag_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Like [`is_valid_tag_name`], reporting the offending name.
pub fn validate_tag_name(name: &str) -> SecurityResult<()> {
    if is_valid_tag_name(name) {
        Ok(())
    } else {
        Err(SecurityError::InvalidConfiguration(format!(
            "tag name {:?} must be non-empty ASCII letters or digits",
            name
        )))
    }
}
