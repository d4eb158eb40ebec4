//! Style-sheet configuration.
//!
//! A style sheet names the styles a report may reference and the default page
//! geometry. It is usually kept as YAML next to the report template:
//!
//! ```yaml
//! default_style: Normal
//! page:
//!   width_mm: 210
//!   height_mm: 297
//! styles:
//!   - id: Normal
//!     font_name: Calibri
//!     font_size: 11
//!   - id: TableHeader
//!     bold: true
//!     background: D9D9D9
//! ```
use serde::{Deserialize, Serialize};

use crate::common::Result;
use crate::ooxml::docx::section::PageGeometry;
use crate::ooxml::docx::styles::{EffectiveStyle, StyleRegistry};

/// Deserialized style sheet, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSheet {
    pub default_style: String,
    #[serde(default)]
    pub page: Option<PageGeometry>,
    #[serde(default)]
    pub styles: Vec<EffectiveStyle>,
}

impl StyleSheet {
    /// Parse a style sheet from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_saphyr::from_str(yaml)?)
    }

    /// Validate and split into the registry and the default page geometry.
    pub fn into_parts(self) -> Result<(StyleRegistry, Option<PageGeometry>)> {
        if let Some(page) = &self.page {
            page.validate()?;
        }
        let registry = StyleRegistry::new(self.styles, self.default_style)?;
        log::debug!("loaded style sheet with {} styles", registry.len());
        Ok((registry, self.page))
    }

    /// Validate and build the registry, dropping the page geometry.
    pub fn into_registry(self) -> Result<StyleRegistry> {
        self.into_parts().map(|(registry, _)| registry)
    }
}
