//! Page geometry carried by section terminators and the final section.
use serde::{Deserialize, Serialize};

use crate::common::unit::mm_to_twips;
use crate::common::{Error, Result};
use crate::ooxml::docx::format::PageOrientation;

/// Physical page layout of one section, in millimeters.
///
/// Width and height describe the sheet as it is printed: a landscape page
/// has `width_mm > height_mm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
    #[serde(default = "default_margin")]
    pub margin_top_mm: f64,
    #[serde(default = "default_margin")]
    pub margin_right_mm: f64,
    #[serde(default = "default_margin")]
    pub margin_bottom_mm: f64,
    #[serde(default = "default_margin")]
    pub margin_left_mm: f64,
    #[serde(default)]
    pub orientation: PageOrientation,
}

fn default_margin() -> f64 {
    25.4
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

impl PageGeometry {
    /// A4 portrait (210mm x 297mm) with one-inch margins.
    pub const A4: PageGeometry = PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_top_mm: 25.4,
        margin_right_mm: 25.4,
        margin_bottom_mm: 25.4,
        margin_left_mm: 25.4,
        orientation: PageOrientation::Portrait,
    };

    /// US Letter portrait (8.5" x 11") with one-inch margins.
    pub fn letter() -> Self {
        Self {
            width_mm: 215.9,
            height_mm: 279.4,
            ..Self::A4
        }
    }

    /// Turn the page sideways, swapping width and height.
    pub fn landscape(mut self) -> Self {
        if self.orientation == PageOrientation::Portrait {
            std::mem::swap(&mut self.width_mm, &mut self.height_mm);
        }
        self.orientation = PageOrientation::Landscape;
        self
    }

    /// Set all four margins (in millimeters).
    pub fn margins(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.margin_top_mm = top;
        self.margin_right_mm = right;
        self.margin_bottom_mm = bottom;
        self.margin_left_mm = left;
        self
    }

    /// Reject geometry no consumer can lay out.
    pub fn validate(&self) -> Result<()> {
        if !(self.width_mm > 0.0 && self.height_mm > 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "page size {}x{}mm must be positive",
                self.width_mm, self.height_mm
            )));
        }
        let margins = [
            self.margin_top_mm,
            self.margin_right_mm,
            self.margin_bottom_mm,
            self.margin_left_mm,
        ];
        if margins.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "margins {:?} must be non-negative",
                margins
            )));
        }
        if self.margin_left_mm + self.margin_right_mm >= self.width_mm {
            return Err(Error::InvalidGeometry(format!(
                "horizontal margins leave no text area on a {}mm page",
                self.width_mm
            )));
        }
        Ok(())
    }

    /// Width between the left and right margins, in twips.
    pub fn text_width_twips(&self) -> u32 {
        mm_to_twips(self.width_mm)
            .saturating_sub(mm_to_twips(self.margin_left_mm))
            .saturating_sub(mm_to_twips(self.margin_right_mm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_text_width() {
        // 11906 - 2 * 1440
        assert_eq!(PageGeometry::A4.text_width_twips(), 9026);
    }

    #[test]
    fn test_landscape_swaps_once() {
        let page = PageGeometry::A4.landscape().landscape();
        assert_eq!(page.width_mm, 297.0);
        assert_eq!(page.height_mm, 210.0);
        assert_eq!(page.orientation, PageOrientation::Landscape);
    }

    #[test]
    fn test_validate() {
        assert!(PageGeometry::letter().validate().is_ok());

        let zero = PageGeometry {
            width_mm: 0.0,
            ..PageGeometry::A4
        };
        assert!(matches!(zero.validate(), Err(Error::InvalidGeometry(_))));

        let crowded = PageGeometry::A4.margins(10.0, 120.0, 10.0, 100.0);
        assert!(matches!(crowded.validate(), Err(Error::InvalidGeometry(_))));

        let negative = PageGeometry::A4.margins(-1.0, 10.0, 10.0, 10.0);
        assert!(negative.validate().is_err());
    }
}
