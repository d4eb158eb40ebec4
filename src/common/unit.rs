//! Unit conversion utilities.
//!
//! WordprocessingML measures lengths in twips (1/20 pt), font sizes in
//! half-points and relative widths in fiftieths of a percent. Report
//! geometry arrives in millimeters and percentages; these helpers bridge the
//! two.

pub const TWIPS_PER_INCH: u32 = 1440;
pub const TWIPS_PER_POINT: u32 = 20;
pub const MM_PER_INCH: f64 = 25.4;
/// One tab stop, used as the indentation step.
pub const TWIPS_PER_TAB: u32 = 720;
/// `w:tcW`/`w:tblW` with `w:type="pct"` count in fiftieths of a percent.
pub const PCT_FIFTIETHS: f64 = 50.0;
pub const HALF_POINTS_PER_POINT: f32 = 2.0;

#[inline]
pub fn mm_to_twips(mm: f64) -> u32 {
    (mm * TWIPS_PER_INCH as f64 / MM_PER_INCH).round().max(0.0) as u32
}

#[inline]
pub fn twips_to_mm(twips: u32) -> f64 {
    twips as f64 * MM_PER_INCH / TWIPS_PER_INCH as f64
}

/// Share of `total` twips covered by `pct` percent, truncated.
///
/// Truncation keeps the sum of several shares at or below `total`, losing
/// less than one twip per share.
#[inline]
pub fn pct_to_twips(pct: f64, total: u32) -> u32 {
    (total as f64 * pct / 100.0).max(0.0) as u32
}

#[inline]
pub fn twips_to_pct(twips: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    twips as f64 * 100.0 / total as f64
}

#[inline]
pub fn pt_to_half_points(pt: f32) -> u32 {
    (pt * HALF_POINTS_PER_POINT).round().max(0.0) as u32
}

#[inline]
pub fn half_points_to_pt(half_points: u32) -> f32 {
    half_points as f32 / HALF_POINTS_PER_POINT
}

#[inline]
pub fn indent_level_to_twips(level: u32) -> u32 {
    level.saturating_mul(TWIPS_PER_TAB)
}

#[inline]
pub fn pct_to_fiftieths(pct: f64) -> u32 {
    (pct * PCT_FIFTIETHS).round().max(0.0) as u32
}
