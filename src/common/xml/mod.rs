//! XML tree construction and serialization.

// Submodule declarations
pub mod node;

// Re-exports
pub use node::{WORDML_NS, XmlElement, XmlNode};
