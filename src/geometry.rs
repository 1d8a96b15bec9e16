//! Page geometry and writing-mode providers.
//!
//! A writing mode is selected once per document and fixes the page
//! dimensions, margins, and paragraph-level direction flags for every node
//! the builder emits afterwards. The accessors are pure and have no failure
//! modes.

use serde::{Deserialize, Serialize};

/// Twentieths of a point (twips) per centimeter.
pub const TWIPS_PER_CM: u32 = 567;

// Page size constants (15.24 cm x 22.86 cm, in twips).
const PAGE_SHORT_EDGE_TWIPS: u32 = 8646; // 15.24 cm
const PAGE_LONG_EDGE_TWIPS: u32 = 12950; // 22.86 cm

// Margin constants (in twips).
const MARGIN_2CM: i32 = 1134;
const MARGIN_2_5CM: i32 = 1417;
const MARGIN_1_25CM: i32 = 708;

/// 1.5x line spacing in twips.
const LINE_SPACING_1_5X: &str = "360";

/// Text flow selection for the whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingMode {
    /// Left-to-right, top-to-bottom (Western style).
    #[default]
    Horizontal,
    /// Top-to-bottom, right-to-left (Japanese tategaki style).
    Vertical,
}

impl WritingMode {
    /// Page dimensions and margins for this mode.
    pub fn page_geometry(&self) -> PageGeometry {
        match self {
            WritingMode::Horizontal => PageGeometry {
                width: PAGE_SHORT_EDGE_TWIPS,
                height: PAGE_LONG_EDGE_TWIPS,
                orientation: Orientation::Portrait,
                margin_top: MARGIN_2CM,
                margin_bottom: MARGIN_2CM,
                margin_left: MARGIN_2_5CM,
                margin_right: MARGIN_2_5CM,
                margin_header: MARGIN_1_25CM,
                margin_footer: MARGIN_1_25CM,
                margin_gutter: 0,
            },
            // Width and height are swapped relative to horizontal. The margin
            // fields keep their names and magnitudes: under tbRl flow the
            // format's renderer maps top/bottom onto the right/left visual
            // edges and left/right onto top/bottom. No value rotation here.
            WritingMode::Vertical => PageGeometry {
                width: PAGE_LONG_EDGE_TWIPS,
                height: PAGE_SHORT_EDGE_TWIPS,
                orientation: Orientation::Landscape,
                margin_top: MARGIN_2CM,
                margin_bottom: MARGIN_2CM,
                margin_left: MARGIN_2_5CM,
                margin_right: MARGIN_2_5CM,
                margin_header: MARGIN_1_25CM,
                margin_footer: MARGIN_1_25CM,
                margin_gutter: 0,
            },
        }
    }

    /// Paragraph-level direction flags for this mode.
    pub fn paragraph_geometry(&self) -> ParagraphGeometry {
        match self {
            WritingMode::Horizontal => ParagraphGeometry {
                direction: TextDirection::LrTb,
                kinsoku: false,
                line_spacing: Some(LINE_SPACING_1_5X.to_string()),
            },
            WritingMode::Vertical => ParagraphGeometry {
                direction: TextDirection::TbRl,
                // East-Asian forbidden-line-break-character handling
                kinsoku: true,
                line_spacing: Some(LINE_SPACING_1_5X.to_string()),
            },
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Attribute value used in the section descriptor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Paragraph text-direction values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextDirection {
    /// Left-to-right, top-to-bottom.
    LrTb,
    /// Top-to-bottom, right-to-left.
    TbRl,
}

impl TextDirection {
    /// Attribute value used on paragraphs and the section descriptor.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::LrTb => "lrTb",
            TextDirection::TbRl => "tbRl",
        }
    }
}

/// Page layout for the document's single section, all values in twips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
    pub margin_top: i32,
    pub margin_bottom: i32,
    pub margin_left: i32,
    pub margin_right: i32,
    pub margin_header: i32,
    pub margin_footer: i32,
    pub margin_gutter: i32,
}

impl PageGeometry {
    /// Printable width in twips (page width minus left/right margins).
    pub fn printable_width(&self) -> i64 {
        i64::from(self.width) - i64::from(self.margin_left) - i64::from(self.margin_right)
    }

    /// Printable height in twips (page height minus top/bottom margins).
    pub fn printable_height(&self) -> i64 {
        i64::from(self.height) - i64::from(self.margin_top) - i64::from(self.margin_bottom)
    }
}

/// Paragraph-level typography configuration shared by every emitted node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphGeometry {
    /// Direction flag applied to every paragraph.
    pub direction: TextDirection,
    /// Whether East-Asian line-breaking rules are enabled.
    pub kinsoku: bool,
    /// Default line spacing in twips, auto rule.
    pub line_spacing: Option<String>,
}
