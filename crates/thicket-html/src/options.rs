use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Tags that never take children or a close tag.
pub const VOID_TAGS: [&str; 3] = ["!doctype", "meta", "input"];

/// Void tags added by [`ParseOptions::default`] on top of [`VOID_TAGS`].
pub const DEFAULT_EXTRA_VOID_TAGS: [&str; 2] = ["br", "img"];

/// Tags whose content is read as raw text up to the matching close tag.
pub const RAW_TEXT_TAGS: [&str; 2] = ["script", "style"];

/// Correctness regime for a parse.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Fail on the first structural violation.
    Strict,
    /// Recover from structural violations the way browsers tend to.
    #[default]
    Lenient,
}

/// Options for a single parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Strict or lenient parsing.
    pub mode: ParseMode,
    /// Keep comments as comment nodes instead of dropping them.
    pub keep_comments: bool,
    /// Void tags in addition to [`VOID_TAGS`].
    pub extra_void_tags: Vec<String>,
    /// Raw-text tags in addition to [`RAW_TEXT_TAGS`].
    pub extra_raw_text_tags: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::Lenient,
            keep_comments: false,
            extra_void_tags: DEFAULT_EXTRA_VOID_TAGS
                .iter()
                .map(ToString::to_string)
                .collect(),
            extra_raw_text_tags: Vec::new(),
        }
    }
}

impl ParseOptions {
    /// Default options in strict mode.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            mode: ParseMode::Strict,
            ..Self::default()
        }
    }

    /// Default options in lenient mode.
    #[must_use]
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Set whether comments are kept.
    #[must_use]
    pub fn with_comments(mut self, keep_comments: bool) -> Self {
        self.keep_comments = keep_comments;
        self
    }

    /// Treat `tag_name` as a void tag.
    #[must_use]
    pub fn with_void_tag(mut self, tag_name: &str) -> Self {
        self.extra_void_tags.push(tag_name.to_lowercase());
        self
    }

    /// Treat `tag_name` as a raw-text tag.
    #[must_use]
    pub fn with_raw_text_tag(mut self, tag_name: &str) -> Self {
        self.extra_raw_text_tags.push(tag_name.to_lowercase());
        self
    }

    /// Whether the parse is strict.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.mode == ParseMode::Strict
    }

    /// Whether `tag_name` never takes children.
    #[must_use]
    pub fn is_void_tag(&self, tag_name: &str) -> bool {
        VOID_TAGS.contains(&tag_name) || self.extra_void_tags.iter().any(|t| t == tag_name)
    }

    /// Whether the content of `tag_name` is raw text.
    #[must_use]
    pub fn is_raw_text_tag(&self, tag_name: &str) -> bool {
        RAW_TEXT_TAGS.contains(&tag_name) || self.extra_raw_text_tags.iter().any(|t| t == tag_name)
    }
}
