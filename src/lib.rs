//! # mkdocx
//!
//! Markdown block stream to DOCX conversion library.
//!
//! The crate consumes an already-parsed sequence of typed blocks (headings,
//! paragraphs, lists, code blocks, quotes, thematic breaks) plus a validated
//! style-configuration record, and assembles a WordprocessingML package
//! under a pluggable page-geometry model.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mkdocx::{convert_to_file, Block, ConversionConfig, Inline};
//!
//! fn main() -> mkdocx::Result<()> {
//!     let blocks = vec![
//!         Block::Heading {
//!             level: 1,
//!             content: vec![Inline::Text("Title".into())],
//!         },
//!         Block::Paragraph {
//!             content: vec![Inline::Text("Body text.".into())],
//!         },
//!     ];
//!
//!     let config = ConversionConfig::default();
//!     convert_to_file(&blocks, &config, "book.md", None, "book.docx")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Driving the builder directly
//!
//! ```no_run
//! use mkdocx::docx::DocxBuilder;
//! use mkdocx::geometry::WritingMode;
//! use mkdocx::style;
//!
//! fn main() -> mkdocx::Result<()> {
//!     let config = mkdocx::ConversionConfig::default();
//!     let mut builder = DocxBuilder::create("out.docx", WritingMode::Vertical)?;
//!
//!     let heading = style::resolve_heading(1, &config.styles)?;
//!     builder.add_heading(1, "第一章", &heading)?;
//!     builder.add_thematic_break()?;
//!
//!     builder.save()?;
//!     builder.dispose();
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Writing modes**: horizontal (left-to-right) and vertical
//!   (top-to-bottom, right-to-left) page geometry, selected once per
//!   document
//! - **Styled elements**: headings with border-extent control, paragraphs,
//!   lists, fenced code blocks, quotes, thematic breaks
//! - **Front matter**: cover title page with fit-scaled images, updatable
//!   table-of-contents field
//! - **Header inspection**: PNG/JPEG pixel dimensions read directly from
//!   file bytes, no decoding library

pub mod convert;
pub mod docx;
pub mod error;
pub mod geometry;
pub mod image;
pub mod model;
pub mod style;

// Re-export commonly used types
pub use convert::{convert_blocks, convert_to_file};
pub use docx::DocxBuilder;
pub use error::{Error, Result};
pub use geometry::{Orientation, PageGeometry, ParagraphGeometry, TextDirection, WritingMode};
pub use image::{ImageDimensions, ImageFormat};
pub use model::{
    Block, BorderExtent, CodeBlockStyle, HeadingStyle, Inline, ListItem, ListStyle,
    ParagraphStyle, QuoteStyle, TableOfContentsStyle, TitlePageStyle,
};
pub use style::{ConversionConfig, StyleConfig};
