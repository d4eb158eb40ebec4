/// Paragraph writer: one report paragraph to one `w:p`.
use crate::common::unit::indent_level_to_twips;
use crate::common::{Error, Result, XmlElement};
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::writer::context::RenderContext;
use crate::ooxml::docx::writer::run::{RunFormat, render_run};
use crate::ooxml::docx::writer::section::section_properties;

/// Renders paragraphs against a style source and default page.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphRenderer<'a> {
    ctx: RenderContext<'a>,
}

impl<'a> ParagraphRenderer<'a> {
    pub fn new(ctx: RenderContext<'a>) -> Self {
        Self { ctx }
    }

    /// Render `paragraph` as a `w:p` element.
    ///
    /// Fails only on configuration errors: an unknown style id, or a section
    /// terminator with no usable geometry.
    pub fn render(&self, paragraph: &Paragraph) -> Result<XmlElement> {
        let style = paragraph
            .style
            .as_deref()
            .map(|id| self.ctx.styles.get_style(id))
            .transpose()?;

        let lines = paragraph.lines();
        log::trace!(
            "paragraph '{}': {} line(s), style {:?}",
            paragraph.id,
            lines.len(),
            paragraph.style
        );

        let mut p = XmlElement::new("w:p");
        p.append(self.properties(paragraph)?);
        p.append(render_run(&lines, &RunFormat::resolve(paragraph, style)));
        Ok(p)
    }

    fn properties(&self, paragraph: &Paragraph) -> Result<XmlElement> {
        let mut ppr = XmlElement::new("w:pPr");

        if let Some(ref style) = paragraph.style {
            ppr.append(XmlElement::new("w:pStyle").with_attr("w:val", style.as_str()));
        }

        // Zero spacing regardless of what the style sheet's defaults say.
        ppr.append(
            XmlElement::new("w:spacing")
                .with_num("w:before", 0)
                .with_num("w:after", 0),
        );

        if paragraph.indent_level > 0 {
            ppr.append(
                XmlElement::new("w:ind")
                    .with_num("w:left", indent_level_to_twips(paragraph.indent_level)),
            );
        }

        if paragraph.section_terminator {
            let page = paragraph
                .page_geometry
                .as_ref()
                .or(self.ctx.page)
                .ok_or_else(|| Error::MissingSectionGeometry(paragraph.id.clone()))?;
            ppr.append(section_properties(page)?);
        }

        Ok(ppr)
    }
}
