//! Input block-stream types.
//!
//! The caller hands the engine an already-parsed, ordered sequence of typed
//! blocks; markdown tokenizing happens upstream. Each block exposes a
//! flattened-text extraction that concatenates its inline content.

use serde::{Deserialize, Serialize};

/// Inline content inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inline {
    /// Plain text.
    Text(String),
    /// Inline code span, concatenated verbatim when flattening.
    Code(String),
    /// Soft or hard line break, collapsed to a single space when flattening.
    LineBreak,
}

/// A single item of an ordered or unordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Flattened item text.
    pub text: String,
    /// Nested sub-items. Carried by the model; the current renderer emits
    /// top-level items only.
    pub children: Vec<ListItem>,
}

impl ListItem {
    /// Create a leaf item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Create an item with nested sub-items.
    pub fn with_children(text: impl Into<String>, children: Vec<ListItem>) -> Self {
        Self {
            text: text.into(),
            children,
        }
    }
}

/// A block-level document element.
///
/// Closed set: each variant maps to exactly one builder operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    /// Heading with level 1-6.
    Heading { level: u8, content: Vec<Inline> },
    /// Body paragraph.
    Paragraph { content: Vec<Inline> },
    /// Ordered or unordered list.
    List { ordered: bool, items: Vec<ListItem> },
    /// Fenced code block with an optional language tag.
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    /// Block quote.
    Quote { content: Vec<Inline> },
    /// Horizontal rule.
    ThematicBreak,
}

impl Block {
    /// Flattened text of the block's inline content.
    ///
    /// Code blocks return their verbatim source; thematic breaks have no
    /// text.
    pub fn flatten_text(&self) -> String {
        match self {
            Block::Heading { content, .. }
            | Block::Paragraph { content }
            | Block::Quote { content } => flatten_inlines(content),
            Block::CodeBlock { code, .. } => code.clone(),
            Block::List { items, .. } => items
                .iter()
                .map(|item| item.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            Block::ThematicBreak => String::new(),
        }
    }
}

/// Concatenate inline content: text and inline code verbatim, line breaks as
/// a single space.
pub fn flatten_inlines(content: &[Inline]) -> String {
    let mut out = String::new();
    for inline in content {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Code(code) => out.push_str(code),
            Inline::LineBreak => out.push(' '),
        }
    }
    out
}
