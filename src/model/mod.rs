//! Data model: the consumed block stream, resolved style records, and the
//! owned output node tree.

pub mod block;
pub mod node;
pub mod style;

pub use block::{flatten_inlines, Block, Inline, ListItem};
pub use node::{
    Border, BorderEdge, BreakKind, DrawingRef, FieldCharKind, FontPair, Indent, Justification,
    LineRule, Paragraph, ParagraphProps, Run, RunContent, RunProps, Spacing,
};
pub use style::{
    BorderExtent, CodeBlockStyle, HeadingStyle, ListStyle, ParagraphStyle, QuoteStyle,
    TableOfContentsStyle, TitlePageStyle,
};
