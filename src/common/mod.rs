//! Common types and utilities shared by the renderers.
//!
//! Nothing in here knows about paragraphs or tables: unit conversion, colors,
//! the error type and the XML tree are plain building blocks.

// Submodule declarations
pub mod error;
pub mod style;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use style::RGBColor;
pub use xml::{XmlElement, XmlNode};
