//! Section properties (`w:sectPr`) emitter.
use crate::common::Result;
use crate::common::XmlElement;
use crate::common::unit::{TWIPS_PER_TAB, mm_to_twips};
use crate::ooxml::docx::section::PageGeometry;

/// Header and footer distance; not part of the report geometry.
const HEADER_FOOTER_TWIPS: u32 = TWIPS_PER_TAB;

/// Build the `w:sectPr` block for a page geometry.
///
/// Every section but the last must carry this inside the `w:pPr` of its
/// terminating paragraph; the last one is the final child of `w:body`.
pub fn section_properties(page: &PageGeometry) -> Result<XmlElement> {
    page.validate()?;

    let size = XmlElement::new("w:pgSz")
        .with_num("w:w", mm_to_twips(page.width_mm))
        .with_num("w:h", mm_to_twips(page.height_mm))
        .with_attr("w:orient", page.orientation.as_str());

    let margins = XmlElement::new("w:pgMar")
        .with_num("w:top", mm_to_twips(page.margin_top_mm))
        .with_num("w:right", mm_to_twips(page.margin_right_mm))
        .with_num("w:bottom", mm_to_twips(page.margin_bottom_mm))
        .with_num("w:left", mm_to_twips(page.margin_left_mm))
        .with_num("w:header", HEADER_FOOTER_TWIPS)
        .with_num("w:footer", HEADER_FOOTER_TWIPS)
        .with_num("w:gutter", 0);

    Ok(XmlElement::new("w:sectPr")
        .with_child(size)
        .with_child(margins))
}
