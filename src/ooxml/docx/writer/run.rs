/// Run writer: character formatting and the text/break sequence of a run.
use std::borrow::Cow;

use crate::common::unit::pt_to_half_points;
use crate::common::{RGBColor, XmlElement};
use crate::ooxml::docx::format::UNDERLINE_SINGLE;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::styles::EffectiveStyle;

/// Character formatting after applying the paragraph's style.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct RunFormat<'a> {
    pub(crate) font_name: Option<&'a str>,
    pub(crate) half_points: Option<u32>,
    pub(crate) bold: bool,
    pub(crate) italic: bool,
    pub(crate) underline: bool,
    pub(crate) color: Option<RGBColor>,
}

impl<'a> RunFormat<'a> {
    /// Paragraph values win; unset ones come from `style`.
    pub(crate) fn resolve(paragraph: &'a Paragraph, style: Option<&'a EffectiveStyle>) -> Self {
        let font_name = paragraph
            .font_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| style.and_then(|s| s.font_name.as_deref()));

        let points = if paragraph.font_size > 0.0 {
            Some(paragraph.font_size)
        } else {
            style.and_then(|s| s.font_size).filter(|size| *size > 0.0)
        };

        Self {
            font_name,
            half_points: points.map(pt_to_half_points),
            bold: paragraph.bold || style.is_some_and(|s| s.bold),
            italic: paragraph.italic || style.is_some_and(|s| s.italic),
            underline: paragraph.underline || style.is_some_and(|s| s.underline),
            color: paragraph.color.or_else(|| style.and_then(|s| s.color)),
        }
    }

    /// `w:rPr`, or `None` when nothing is set.
    pub(crate) fn properties(&self) -> Option<XmlElement> {
        let mut rpr = XmlElement::new("w:rPr");

        if let Some(name) = self.font_name {
            rpr.append(
                XmlElement::new("w:rFonts")
                    .with_attr("w:ascii", name)
                    .with_attr("w:hAnsi", name),
            );
        }
        if self.bold {
            rpr.append(XmlElement::new("w:b"));
        }
        if self.italic {
            rpr.append(XmlElement::new("w:i"));
        }
        if let Some(color) = self.color {
            rpr.append(XmlElement::new("w:color").with_attr("w:val", color.to_hex()));
        }
        if let Some(size) = self.half_points {
            rpr.append(XmlElement::new("w:sz").with_num("w:val", size));
        }
        if self.underline {
            rpr.append(XmlElement::new("w:u").with_attr("w:val", UNDERLINE_SINGLE));
        }

        (!rpr.is_empty()).then_some(rpr)
    }
}

/// Build one `w:r`: formatting, then a `w:t` per line with a `w:br` between
/// consecutive lines. Tabs inside a line become `w:tab`.
pub(crate) fn render_run(lines: &[&str], format: &RunFormat<'_>) -> XmlElement {
    let mut run = XmlElement::new("w:r");
    if let Some(rpr) = format.properties() {
        run.append(rpr);
    }

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            run.append(XmlElement::new("w:br"));
        }
        for (j, segment) in line.split('\t').enumerate() {
            if j > 0 {
                run.append(XmlElement::new("w:tab"));
            }
            // An empty line still gets its text node; empty pieces around a tab do not.
            if segment.is_empty() && line.contains('\t') {
                continue;
            }
            run.append(
                XmlElement::new("w:t")
                    .with_attr("xml:space", "preserve")
                    .with_text(xml_text(segment)),
            );
        }
    }
    run
}

/// Characters XML 1.0 allows in character data.
#[inline]
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Drop characters that cannot appear in an XML 1.0 document.
fn xml_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    log::debug!("dropping control characters from run text");
    Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
}
