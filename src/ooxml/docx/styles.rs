/// Styles - resolved style snapshots and the registry that serves them.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::{Error, RGBColor, Result};
use crate::ooxml::docx::format::CaptionPlacement;

/// How a node picks its style: its own identifier, or whatever the enclosing
/// level resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleRef {
    #[default]
    Inherited,
    Own(String),
}

impl StyleRef {
    pub fn own(id: impl Into<String>) -> Self {
        Self::Own(id.into())
    }

    /// The identifier, if this level declares one.
    #[inline]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Own(id) => Some(id),
            Self::Inherited => None,
        }
    }
}

/// A fully-resolved style.
///
/// Every field is final: nothing here refers to a parent style.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectiveStyle {
    pub id: String,
    /// Cell or table shading
    pub background: Option<RGBColor>,
    pub font_name: Option<String>,
    /// Font size in points
    pub font_size: Option<f32>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Text color
    pub color: Option<RGBColor>,
    pub caption_placement: Option<CaptionPlacement>,
}

impl EffectiveStyle {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_background(mut self, color: RGBColor) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_font(mut self, name: impl Into<String>, size: f32) -> Self {
        self.font_name = Some(name.into());
        self.font_size = Some(size);
        self
    }

    pub fn with_color(mut self, color: RGBColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_caption_placement(mut self, placement: CaptionPlacement) -> Self {
        self.caption_placement = Some(placement);
        self
    }
}

/// Read-only source of resolved styles.
///
/// Renderers only ever look styles up; implementations are shared across
/// threads rendering independent output trees.
pub trait StyleSource: Sync {
    /// Look up a style by identifier. Unknown identifiers are an error.
    fn get_style(&self, id: &str) -> Result<&EffectiveStyle>;

    /// Style applied where every level inherits.
    fn default_style(&self) -> &EffectiveStyle;

    fn contains(&self, id: &str) -> bool {
        self.get_style(id).is_ok()
    }

    /// Resolve an optional identifier, falling back to the document default.
    fn resolve(&self, id: Option<&str>) -> Result<&EffectiveStyle> {
        match id {
            Some(id) => self.get_style(id),
            None => Ok(self.default_style()),
        }
    }

    /// Resolve one level: `None` when the level inherits.
    fn resolve_ref(&self, style: &StyleRef) -> Result<Option<&EffectiveStyle>> {
        style.id().map(|id| self.get_style(id)).transpose()
    }

    /// Resolve a cascade ordered innermost first (cell, row, table), stopping
    /// at the first level that declares its own style.
    fn resolve_chain(&self, chain: &[&StyleRef]) -> Result<&EffectiveStyle> {
        self.resolve(chain.iter().find_map(|level| level.id()))
    }
}

/// Immutable style registry keyed by identifier.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    styles: HashMap<String, EffectiveStyle>,
    default_id: String,
}

impl StyleRegistry {
    /// Build a registry. The default style must be among `styles`.
    pub fn new(
        styles: impl IntoIterator<Item = EffectiveStyle>,
        default_id: impl Into<String>,
    ) -> Result<Self> {
        let default_id = default_id.into();
        let mut map = HashMap::new();
        for style in styles {
            if let Some(previous) = map.insert(style.id.clone(), style) {
                log::warn!("style '{}' defined more than once; keeping the last", previous.id);
            }
        }
        if !map.contains_key(&default_id) {
            return Err(Error::Config(format!(
                "default style '{}' is not defined",
                default_id
            )));
        }
        Ok(Self {
            styles: map,
            default_id,
        })
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}

impl StyleSource for StyleRegistry {
    fn get_style(&self, id: &str) -> Result<&EffectiveStyle> {
        self.styles
            .get(id)
            .ok_or_else(|| Error::UnknownStyle(id.to_string()))
    }

    fn default_style(&self) -> &EffectiveStyle {
        // Presence is checked in `new`.
        &self.styles[&self.default_id]
    }

    fn contains(&self, id: &str) -> bool {
        self.styles.contains_key(id)
    }
}
