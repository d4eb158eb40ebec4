//! Unified error type for the renderer.
//!
//! Every failure the renderers can report is a configuration error: the
//! document snapshot or the style sheet asked for something that does not
//! exist or cannot be laid out. None of them are retryable.
use thiserror::Error;

/// Main error type for rendering operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A style identifier that the registry does not define
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// A section terminator paragraph with no page geometry available
    #[error("Section terminator '{0}' has no page geometry")]
    MissingSectionGeometry(String),

    /// Page geometry that cannot describe a real page
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// A table whose grid would have no columns
    #[error("Table '{0}' declares no columns")]
    EmptyColumns(String),

    /// A color value that is not a 6-digit hex RGB triple
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Style sheet could not be parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// XML serialization error
    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;
