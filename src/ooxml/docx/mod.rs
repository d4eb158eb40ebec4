//! Word document (.docx) model and writers.
//!
//! The model types describe a report as immutable snapshots; the `writer`
//! module turns them into `w:` markup.

pub mod format;
pub mod paragraph;
pub mod section;
pub mod styles;
pub mod stylesheet;
pub mod table;
pub mod writer;

pub use format::{CaptionPlacement, PageOrientation};
pub use paragraph::Paragraph;
pub use section::PageGeometry;
pub use styles::{EffectiveStyle, StyleRef, StyleRegistry, StyleSource};
pub use stylesheet::StyleSheet;
pub use table::{Cell, Column, Row, Table};
pub use writer::{Block, BodyRenderer, ParagraphRenderer, RenderContext, TableRenderer};
