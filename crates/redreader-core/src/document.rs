//! Tokenized, anchored documents.

use alloc::{string::String, vec::Vec};
use core::fmt;

use log::warn;

use crate::text::{orp_index, tokenize};

const UNTITLED: &str = "Untitled";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DocumentError {
    /// The text produced no display tokens.
    Empty,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("text contains no readable tokens"),
        }
    }
}

impl core::error::Error for DocumentError {}

/// Read-only token sequence with one ORP index per token.
///
/// `tokens.len() == orp_indexes.len()` and every index is below
/// `max(1, chars(token))`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    id: String,
    title: String,
    raw_text: String,
    tokens: Vec<String>,
    orp_indexes: Vec<usize>,
}

impl Document {
    /// Tokenizes `raw_text` and anchors each token.
    pub fn from_text(
        id: impl Into<String>,
        title: &str,
        raw_text: impl Into<String>,
    ) -> Result<Self, DocumentError> {
        let raw_text = raw_text.into();
        let tokens = tokenize(&raw_text);
        if tokens.is_empty() {
            return Err(DocumentError::Empty);
        }

        let orp_indexes = tokens.iter().map(|token| orp_index(token)).collect();
        Ok(Self {
            id: id.into(),
            title: display_title(title),
            raw_text,
            tokens,
            orp_indexes,
        })
    }

    /// Rebuilds a document from stored rows.
    ///
    /// Stored ORP indexes are trusted only when they satisfy the document
    /// invariant; a length mismatch recomputes all of them and an out-of-range
    /// entry is recomputed on its own.
    pub fn from_parts(
        id: impl Into<String>,
        title: &str,
        raw_text: impl Into<String>,
        tokens: Vec<String>,
        orp_indexes: Vec<usize>,
    ) -> Self {
        let id = id.into();

        let orp_indexes = if orp_indexes.len() != tokens.len() {
            warn!(
                "document: {} has {} orp indexes for {} tokens; recomputing",
                id,
                orp_indexes.len(),
                tokens.len()
            );
            tokens.iter().map(|token| orp_index(token)).collect()
        } else {
            tokens
                .iter()
                .zip(orp_indexes)
                .enumerate()
                .map(|(position, (token, stored))| {
                    if stored < token.chars().count().max(1) {
                        stored
                    } else {
                        warn!(
                            "document: {} token {} orp index {} out of range; recomputing",
                            id, position, stored
                        );
                        orp_index(token)
                    }
                })
                .collect()
        };

        Self {
            id,
            title: display_title(title),
            raw_text: raw_text.into(),
            tokens,
            orp_indexes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn orp_indexes(&self) -> &[usize] {
        &self.orp_indexes
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn orp_index_at(&self, index: usize) -> usize {
        self.orp_indexes.get(index).copied().unwrap_or(0)
    }

    /// Largest valid cursor position, `0` for an empty document.
    pub fn last_index(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }
}

fn display_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        String::from(UNTITLED)
    } else {
        String::from(trimmed)
    }
}
