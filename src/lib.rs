//! wml-report - WordprocessingML rendering for report documents
//!
//! Converts a style-annotated report tree (paragraphs, tables, rows, cells)
//! into `w:` markup ready to be placed in a `.docx` main document part.
//!
//! # Features
//!
//! - **Paragraphs**: indentation, style references, run formatting, forced
//!   line breaks and section geometry on terminating paragraphs
//! - **Tables**: explicit column grids, repeating header rows, list views,
//!   cell shading from the style cascade and captions
//! - **Style sheets**: YAML-configured style registry with cell, row, table
//!   and document-default resolution
//!
//! # Example
//!
//! ```
//! use wml_report::ooxml::docx::{
//!     Block, BodyRenderer, Column, Paragraph, RenderContext, Row, StyleSheet, Table,
//! };
//!
//! # fn main() -> wml_report::Result<()> {
//! let registry = StyleSheet::from_yaml(
//!     "default_style: Normal\nstyles:\n  - id: Normal\n    font_name: Calibri\n",
//! )?
//! .into_registry()?;
//!
//! let blocks: Vec<Block> = vec![
//!     Paragraph::new("intro", "Monthly totals").bold().into(),
//!     Table::new("totals", vec![Column::pct(60.0), Column::pct(40.0)])
//!         .with_header_row()
//!         .with_rows([Row::from_texts(["Item", "Total"]), Row::from_texts(["Apples", "12"])])
//!         .into(),
//! ];
//!
//! let xml = BodyRenderer::new(RenderContext::new(&registry)).render_document_xml(&blocks, None)?;
//! assert!(xml.contains("<w:tblHeader/>"));
//! # Ok(())
//! # }
//! ```

/// Shared infrastructure: errors, units, colors, the XML tree
pub mod common;

/// OOXML output: the WordprocessingML model and renderers
pub mod ooxml;

// Re-export commonly used types for convenience
pub use common::{Error, RGBColor, Result};
