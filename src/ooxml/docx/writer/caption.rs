//! Table caption emitter.
use crate::common::{Result, XmlElement};
use crate::ooxml::docx::format::CaptionPlacement;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::table::Table;
use crate::ooxml::docx::writer::context::RenderContext;
use crate::ooxml::docx::writer::paragraph::ParagraphRenderer;

/// Style applied to captions when the registry defines it.
pub const CAPTION_STYLE: &str = "Caption";

/// Produces the caption node for a table.
///
/// Only called for tables whose caption text is non-empty; placement is
/// decided by the table renderer.
pub trait CaptionEmitter: Sync {
    fn emit_caption(&self, table: &Table, ctx: RenderContext<'_>) -> Result<XmlElement>;
}

/// A paragraph holding the caption text, in the `Caption` style if available.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCaption;

impl CaptionEmitter for DefaultCaption {
    fn emit_caption(&self, table: &Table, ctx: RenderContext<'_>) -> Result<XmlElement> {
        let mut paragraph = Paragraph::new(
            format!("{}-caption", table.id),
            table.caption.clone().unwrap_or_default(),
        )
        .with_indent(table.indent_level);
        if ctx.styles.contains(CAPTION_STYLE) {
            paragraph.style = Some(CAPTION_STYLE.to_string());
        }
        ParagraphRenderer::new(ctx).render(&paragraph)
    }
}

/// Caption placement for a table: its own, else its style's, else above.
pub(crate) fn placement(table: &Table, ctx: RenderContext<'_>) -> Result<CaptionPlacement> {
    if let Some(placement) = table.caption_placement {
        return Ok(placement);
    }
    let style = ctx.styles.resolve(table.style.id())?;
    Ok(style.caption_placement.unwrap_or_default())
}
