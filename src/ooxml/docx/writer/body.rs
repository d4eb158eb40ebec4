//! Body and document assembly.
//!
//! Walks an ordered list of blocks, delegates each to the paragraph or table
//! renderer, and closes the body with the final section's geometry.
use serde::{Deserialize, Serialize};

use crate::common::{Result, XmlElement};
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::section::PageGeometry;
use crate::ooxml::docx::table::Table;
use crate::ooxml::docx::writer::caption::{CaptionEmitter, DefaultCaption};
use crate::ooxml::docx::writer::context::RenderContext;
use crate::ooxml::docx::writer::paragraph::ParagraphRenderer;
use crate::ooxml::docx::writer::section::section_properties;
use crate::ooxml::docx::writer::table::TableRenderer;

/// A top-level block of the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    Paragraph(Paragraph),
    /// A logical table, already expanded into its physical tables
    Table(Vec<Table>),
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Self::Paragraph(paragraph)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Self::Table(vec![table])
    }
}

/// Renders a sequence of blocks into `w:body`.
#[derive(Clone, Copy)]
pub struct BodyRenderer<'a> {
    ctx: RenderContext<'a>,
    captions: &'a dyn CaptionEmitter,
}

impl std::fmt::Debug for BodyRenderer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BodyRenderer")
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

impl<'a> BodyRenderer<'a> {
    pub fn new(ctx: RenderContext<'a>) -> Self {
        Self {
            ctx,
            captions: &DefaultCaption,
        }
    }

    pub fn with_captions(mut self, captions: &'a dyn CaptionEmitter) -> Self {
        self.captions = captions;
        self
    }

    /// Append the rendering of one block to `parent`.
    pub fn render_block(&self, block: &Block, parent: &mut XmlElement) -> Result<()> {
        match block {
            Block::Paragraph(paragraph) => {
                parent.append(ParagraphRenderer::new(self.ctx).render(paragraph)?);
            },
            Block::Table(tables) => {
                TableRenderer::new(self.ctx)
                    .with_captions(self.captions)
                    .render(tables, parent)?;
            },
        }
        Ok(())
    }

    /// Render all blocks in order and close with the last section's `w:sectPr`.
    ///
    /// `last_section` falls back to the context's page, then to A4.
    pub fn render_body(
        &self,
        blocks: &[Block],
        last_section: Option<&PageGeometry>,
    ) -> Result<XmlElement> {
        let mut body = XmlElement::new("w:body");
        for block in blocks {
            self.render_block(block, &mut body)?;
        }
        self.close_body(&mut body, last_section)?;
        Ok(body)
    }

    /// Like [`render_body`](Self::render_body), rendering blocks concurrently.
    ///
    /// Each block gets its own scratch tree; the results are joined in the
    /// original order, so the output is identical to the sequential one.
    #[cfg(feature = "parallel")]
    pub fn render_body_par(
        &self,
        blocks: &[Block],
        last_section: Option<&PageGeometry>,
    ) -> Result<XmlElement> {
        use rayon::prelude::*;

        let fragments = blocks
            .par_iter()
            .map(|block| {
                let mut scratch = XmlElement::new("w:body");
                self.render_block(block, &mut scratch)?;
                Ok(scratch)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut body = XmlElement::new("w:body");
        for node in fragments.into_iter().flat_map(XmlElement::into_children) {
            body.append_node(node);
        }
        self.close_body(&mut body, last_section)?;
        Ok(body)
    }

    fn close_body(&self, body: &mut XmlElement, last_section: Option<&PageGeometry>) -> Result<()> {
        let page = last_section.unwrap_or_else(|| self.ctx.layout_page());
        body.append(section_properties(page)?);
        Ok(())
    }

    /// Render the `w:document` root element.
    pub fn render_document(
        &self,
        blocks: &[Block],
        last_section: Option<&PageGeometry>,
    ) -> Result<XmlElement> {
        Ok(XmlElement::new("w:document").with_child(self.render_body(blocks, last_section)?))
    }

    /// Render and serialize the main document part.
    pub fn render_document_xml(
        &self,
        blocks: &[Block],
        last_section: Option<&PageGeometry>,
    ) -> Result<String> {
        self.render_document(blocks, last_section)?.to_part_xml()
    }
}
