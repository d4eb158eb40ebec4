//! Renderers producing WordprocessingML fragments.
//!
//! Each renderer takes an immutable snapshot plus a [`RenderContext`] and
//! returns (or appends) freshly built [`XmlElement`](crate::common::XmlElement)
//! nodes. Nothing is cached between calls.

pub mod body;
pub mod caption;
pub mod context;
pub mod paragraph;
pub(crate) mod run;
pub mod section;
pub mod table;

// Re-export renderer types
pub use body::{Block, BodyRenderer};
pub use caption::{CAPTION_STYLE, CaptionEmitter, DefaultCaption};
pub use context::RenderContext;
pub use paragraph::ParagraphRenderer;
pub use section::section_properties;
pub use table::TableRenderer;
