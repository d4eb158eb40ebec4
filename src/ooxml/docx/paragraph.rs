/// Paragraph - one block of text in the report document tree.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::common::RGBColor;
use crate::ooxml::docx::section::PageGeometry;

/// Forced line break marker inside paragraph text.
pub const LINE_SEPARATOR: char = '\n';

/// Vertical tab, Word's own manual line break character.
pub const MANUAL_LINE_BREAK: char = '\u{0B}';

/// A paragraph snapshot.
///
/// Formatting left unset (`None`, `0.0`, `false`) is taken from the
/// paragraph's style when it has one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Paragraph {
    /// Identity of the paragraph; rendered as content when `text` is empty
    pub id: String,
    /// Raw text; each `LINE_SEPARATOR` or `MANUAL_LINE_BREAK` becomes a
    /// forced break
    pub text: String,
    pub style: Option<String>,
    /// Indentation in tab stops
    pub indent_level: u32,
    pub font_name: Option<String>,
    /// Font size in points; 0 inherits
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<RGBColor>,
    /// Closes a page-layout section
    pub section_terminator: bool,
    /// Geometry of the section this paragraph closes
    pub page_geometry: Option<PageGeometry>,
}

impl Paragraph {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style = Some(style_id.into());
        self
    }

    pub fn with_indent(mut self, level: u32) -> Self {
        self.indent_level = level;
        self
    }

    pub fn with_font(mut self, name: impl Into<String>, size: f32) -> Self {
        self.font_name = Some(name.into());
        self.font_size = size;
        self
    }

    pub fn with_color(mut self, color: RGBColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Mark this paragraph as the last one of a section laid out on `page`.
    pub fn terminate_section(mut self, page: Option<PageGeometry>) -> Self {
        self.section_terminator = true;
        self.page_geometry = page;
        self
    }

    /// The text to render: the paragraph text, or its identity when empty.
    ///
    /// Generated filler paragraphs often carry no text; showing their id
    /// keeps them visible in the output.
    #[inline]
    pub fn content(&self) -> &str {
        if self.text.is_empty() {
            &self.id
        } else {
            &self.text
        }
    }

    /// Split the content into lines. Never empty: text without separators is
    /// a single line, and `k` separators always give `k + 1` lines.
    pub fn lines(&self) -> SmallVec<[&str; 4]> {
        self.content()
            .split([LINE_SEPARATOR, MANUAL_LINE_BREAK])
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect()
    }
}
