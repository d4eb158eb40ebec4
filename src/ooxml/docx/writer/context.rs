//! Explicit inputs shared by every renderer.
use crate::ooxml::docx::section::PageGeometry;
use crate::ooxml::docx::styles::StyleSource;

static DEFAULT_PAGE: PageGeometry = PageGeometry::A4;

/// What a render call may read besides its own node.
///
/// Holding the style source and the default page here keeps the renderers
/// free of global state; one context can serve several threads rendering
/// independent trees.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub styles: &'a dyn StyleSource,
    /// Default page geometry. Section terminators without their own geometry
    /// use it, and table widths are computed against its text area.
    pub page: Option<&'a PageGeometry>,
}

impl<'a> RenderContext<'a> {
    pub fn new(styles: &'a dyn StyleSource) -> Self {
        Self { styles, page: None }
    }

    pub fn with_page(mut self, page: &'a PageGeometry) -> Self {
        self.page = Some(page);
        self
    }

    /// Page used for width computations.
    #[inline]
    pub fn layout_page(&self) -> &'a PageGeometry {
        self.page.unwrap_or(&DEFAULT_PAGE)
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}
