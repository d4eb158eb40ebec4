/// Table writer: logical tables to `w:tbl` elements.
use crate::common::unit::{indent_level_to_twips, pct_to_fiftieths, pct_to_twips};
use crate::common::{Error, Result, XmlElement};
use crate::ooxml::docx::format::CaptionPlacement;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::styles::{EffectiveStyle, StyleRef};
use crate::ooxml::docx::table::{Row, Table};
use crate::ooxml::docx::writer::caption::{self, CaptionEmitter, DefaultCaption};
use crate::ooxml::docx::writer::context::RenderContext;
use crate::ooxml::docx::writer::paragraph::ParagraphRenderer;

/// Renders tables, their captions and the trailing separator paragraph.
#[derive(Clone, Copy)]
pub struct TableRenderer<'a> {
    ctx: RenderContext<'a>,
    captions: &'a dyn CaptionEmitter,
}

impl std::fmt::Debug for TableRenderer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableRenderer")
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

impl<'a> TableRenderer<'a> {
    pub fn new(ctx: RenderContext<'a>) -> Self {
        Self {
            ctx,
            captions: &DefaultCaption,
        }
    }

    /// Use a custom caption emitter.
    pub fn with_captions(mut self, captions: &'a dyn CaptionEmitter) -> Self {
        self.captions = captions;
        self
    }

    /// Append every physical table of a logical table to `parent`.
    ///
    /// Each physical table is rendered independently: optional caption,
    /// `w:tbl`, optional caption, then an empty separator paragraph.
    pub fn render(&self, tables: &[Table], parent: &mut XmlElement) -> Result<()> {
        for table in tables {
            self.render_physical(table, parent)?;
        }
        Ok(())
    }

    fn render_physical(&self, table: &Table, parent: &mut XmlElement) -> Result<()> {
        let columns = table.column_count();
        if columns == 0 {
            return Err(Error::EmptyColumns(table.id.clone()));
        }

        let placement = match table.caption.as_deref() {
            Some(text) if !text.is_empty() => Some(caption::placement(table, self.ctx)?),
            _ => None,
        };
        if placement == Some(CaptionPlacement::Above) {
            parent.append(self.captions.emit_caption(table, self.ctx)?);
        }

        let table_style = self.ctx.styles.resolve_ref(&table.style)?;
        let render_width = self.render_width(table);
        log::debug!(
            "table '{}': {} column(s), {} row(s), width {} twips",
            table.id,
            columns,
            table.rows.len(),
            render_width
        );

        let mut tbl = XmlElement::new("w:tbl");
        tbl.append(self.table_properties(table, table_style));
        tbl.append(grid(table, columns, render_width));
        for (index, row) in table.rows.iter().enumerate() {
            if row.cells.len() != columns {
                log::warn!(
                    "table '{}' row {} has {} cell(s) for {} grid column(s)",
                    table.id,
                    index,
                    row.cells.len(),
                    columns
                );
            }
            tbl.append(self.render_row(table, index, row)?);
        }
        parent.append(tbl);

        if placement == Some(CaptionPlacement::Below) {
            parent.append(self.captions.emit_caption(table, self.ctx)?);
        }

        // Keeps consumers from merging this table with whatever follows.
        parent.append(XmlElement::new("w:p"));
        Ok(())
    }

    /// Width the table occupies on the page, in twips.
    fn render_width(&self, table: &Table) -> u32 {
        let available = self
            .ctx
            .layout_page()
            .text_width_twips()
            .saturating_sub(indent_level_to_twips(table.indent_level));
        pct_to_twips(table.width_pct, available)
    }

    fn table_properties(&self, table: &Table, style: Option<&EffectiveStyle>) -> XmlElement {
        let mut tbl_pr = XmlElement::new("w:tblPr");

        if let StyleRef::Own(ref id) = table.style {
            tbl_pr.append(XmlElement::new("w:tblStyle").with_attr("w:val", id.as_str()));
        }
        tbl_pr.append(
            XmlElement::new("w:tblW")
                .with_num("w:w", pct_to_fiftieths(table.width_pct))
                .with_attr("w:type", "pct"),
        );
        if table.indent_level > 0 {
            tbl_pr.append(
                XmlElement::new("w:tblInd")
                    .with_num("w:w", indent_level_to_twips(table.indent_level))
                    .with_attr("w:type", "dxa"),
            );
        }
        if let Some(fill) = style.and_then(|s| s.background) {
            tbl_pr.append(shading(&fill.to_hex()));
        }
        tbl_pr.append(XmlElement::new("w:tblLayout").with_attr("w:type", "fixed"));
        tbl_pr
    }

    fn render_row(&self, table: &Table, index: usize, row: &Row) -> Result<XmlElement> {
        let row_style = self.ctx.styles.resolve_ref(&row.style)?;

        let mut tr = XmlElement::new("w:tr");
        if table.is_header_row(index) {
            tr.append(
                XmlElement::new("w:trPr")
                    .with_child(XmlElement::new("w:cnfStyle").with_num("w:firstRow", 1))
                    .with_child(XmlElement::new("w:tblHeader")),
            );
        }

        let paragraphs = ParagraphRenderer::new(self.ctx);
        for (column, cell) in row.cells.iter().enumerate() {
            let cell_style = self.ctx.styles.resolve_ref(&cell.style)?;

            let mut tc_pr = XmlElement::new("w:tcPr");
            if table.list_view && column == 0 && index > 0 {
                tc_pr.append(XmlElement::new("w:cnfStyle").with_num("w:firstColumn", 1));
            }
            tc_pr.append(match table.column_width_pct(column) {
                Some(pct) => XmlElement::new("w:tcW")
                    .with_num("w:w", pct_to_fiftieths(pct))
                    .with_attr("w:type", "pct"),
                None => XmlElement::new("w:tcW")
                    .with_num("w:w", 0)
                    .with_attr("w:type", "auto"),
            });
            let background = cell_style
                .and_then(|s| s.background)
                .or_else(|| row_style.and_then(|s| s.background));
            if let Some(fill) = background {
                tc_pr.append(shading(&fill.to_hex()));
            }

            // Transient paragraph; it lives only for this render call.
            let content = Paragraph {
                text: cell.text.clone(),
                style: cell
                    .style
                    .id()
                    .or_else(|| row.style.id())
                    .map(str::to_string),
                ..Default::default()
            };

            tr.append(
                XmlElement::new("w:tc")
                    .with_child(tc_pr)
                    .with_child(paragraphs.render(&content)?),
            );
        }
        Ok(tr)
    }
}

/// `w:tblGrid` with one `w:gridCol` per output column.
fn grid(table: &Table, columns: usize, render_width: u32) -> XmlElement {
    let equal_share = 100.0 / columns as f64;
    let mut grid = XmlElement::new("w:tblGrid");
    for column in 0..columns {
        let pct = table.column_width_pct(column).unwrap_or(equal_share);
        grid.append(XmlElement::new("w:gridCol").with_num("w:w", pct_to_twips(pct, render_width)));
    }
    grid
}

fn shading(fill: &str) -> XmlElement {
    XmlElement::new("w:shd")
        .with_attr("w:val", "clear")
        .with_attr("w:color", "auto")
        .with_attr("w:fill", fill)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::ooxml::docx::section::PageGeometry;
    use crate::ooxml::docx::styles::StyleRegistry;
    use crate::ooxml::docx::table::{Cell, Column};

    const GREY: RGBColor = RGBColor::new(0xD9, 0xD9, 0xD9);
    const YELLOW: RGBColor = RGBColor::new(0xFF, 0xFF, 0x00);

    fn registry() -> StyleRegistry {
        StyleRegistry::new(
            [
                EffectiveStyle::new("Normal"),
                EffectiveStyle::new("Grid"),
                EffectiveStyle::new("HeaderRow").bold().with_background(GREY),
                EffectiveStyle::new("Highlight").with_background(YELLOW),
                EffectiveStyle::new("Plain"),
            ],
            "Normal",
        )
        .unwrap()
    }

    fn render_with(reg: &StyleRegistry, tables: &[Table]) -> Result<XmlElement> {
        let mut body = XmlElement::new("w:body");
        TableRenderer::new(RenderContext::new(reg)).render(tables, &mut body)?;
        Ok(body)
    }

    fn render(tables: &[Table]) -> Result<XmlElement> {
        render_with(&registry(), tables)
    }

    fn sample() -> Table {
        Table::new("t", vec![Column::pct(50.0), Column::auto()])
            .with_header_row()
            .with_style("Grid")
            .with_rows([
                Row::from_texts(["Key", "Value"]).with_style("HeaderRow"),
                Row::new([Cell::new("a").with_style("Highlight"), Cell::new("1")]),
                Row::from_texts(["b", "2"]),
            ])
    }

    fn grid_widths(body: &XmlElement) -> Vec<u32> {
        body.descendants_named("w:gridCol")
            .iter()
            .map(|c| c.attr("w:w").unwrap().parse().unwrap())
            .collect()
    }

    #[test]
    fn test_output_sequence() {
        let body = render(&[sample()]).unwrap();
        let names: Vec<&str> = body.elements().map(|e| e.name()).collect();
        assert_eq!(names, ["w:tbl", "w:p"]);
        assert!(body.elements().last().unwrap().is_empty());

        let tbl = body.child("w:tbl").unwrap();
        let inner: Vec<&str> = tbl.elements().map(|e| e.name()).collect();
        assert_eq!(inner, ["w:tblPr", "w:tblGrid", "w:tr", "w:tr", "w:tr"]);
    }

    #[test]
    fn test_table_properties() {
        let body = render(&[sample().with_indent(1).with_width(80.0)]).unwrap();
        let tbl_pr = body.descendants_named("w:tblPr")[0];
        assert_eq!(tbl_pr.child("w:tblStyle").unwrap().attr("w:val"), Some("Grid"));
        let width = tbl_pr.child("w:tblW").unwrap();
        assert_eq!(width.attr("w:w"), Some("4000"));
        assert_eq!(width.attr("w:type"), Some("pct"));
        assert_eq!(tbl_pr.child("w:tblInd").unwrap().attr("w:w"), Some("720"));
    }

    #[test]
    fn test_two_equal_columns() {
        let table = Table::new("t", vec![Column::auto(), Column::auto()])
            .with_rows([Row::from_texts(["x", "y"])]);
        let body = render(&[table]).unwrap();
        let total = PageGeometry::A4.text_width_twips();
        assert_eq!(grid_widths(&body), [total / 2, total / 2]);
    }

    #[test]
    fn test_explicit_and_default_widths() {
        let body = render(&[sample()]).unwrap();
        // 9026 twips: 50% explicit, remaining column takes the equal share
        assert_eq!(grid_widths(&body), [4513, 4513]);

        let cells = body.descendants_named("w:tcW");
        assert_eq!(cells[0].attr("w:w"), Some("2500"));
        assert_eq!(cells[0].attr("w:type"), Some("pct"));
        assert_eq!(cells[1].attr("w:type"), Some("auto"));
    }

    #[test]
    fn test_indent_reduces_render_width() {
        let table = Table::new("t", vec![Column::auto()])
            .with_indent(2)
            .with_rows([Row::from_texts(["x"])]);
        let body = render(&[table]).unwrap();
        assert_eq!(grid_widths(&body), [9026 - 1440]);
    }

    #[test]
    fn test_header_row_markers() {
        let body = render(&[sample()]).unwrap();
        let rows = body.descendants_named("w:tr");
        let tr_pr = rows[0].child("w:trPr").unwrap();
        assert!(tr_pr.child("w:tblHeader").is_some());
        assert_eq!(tr_pr.child("w:cnfStyle").unwrap().attr("w:firstRow"), Some("1"));
        assert!(rows[1..].iter().all(|r| r.child("w:trPr").is_none()));
        assert_eq!(body.descendants_named("w:tblHeader").len(), 1);
    }

    #[test]
    fn test_no_header_without_flag() {
        let mut table = sample();
        table.has_header_row = false;
        let body = render(&[table]).unwrap();
        assert!(body.descendants_named("w:tblHeader").is_empty());
        assert!(body.descendants_named("w:trPr").is_empty());
    }

    #[test]
    fn test_cell_shading_precedence() {
        let mut table = sample();
        table.rows[1].style = StyleRef::own("HeaderRow");
        let body = render(&[table]).unwrap();
        let rows = body.descendants_named("w:tr");

        let fill = |row: &XmlElement, col: usize| {
            row.children_named("w:tc")
                .nth(col)
                .and_then(|tc| tc.child("w:tcPr"))
                .and_then(|pr| pr.child("w:shd"))
                .and_then(|shd| shd.attr("w:fill"))
                .map(str::to_string)
        };
        // header row style shades both cells
        assert_eq!(fill(rows[0], 0).as_deref(), Some("D9D9D9"));
        assert_eq!(fill(rows[0], 1).as_deref(), Some("D9D9D9"));
        // cell style beats row style
        assert_eq!(fill(rows[1], 0).as_deref(), Some("FFFF00"));
        assert_eq!(fill(rows[1], 1).as_deref(), Some("D9D9D9"));
        // nothing declared, no shading
        assert_eq!(fill(rows[2], 0), None);

        let shd = rows[1].descendants_named("w:shd")[0];
        assert_eq!(shd.attr("w:val"), Some("clear"));
        assert_eq!(shd.attr("w:color"), Some("auto"));
    }

    #[test]
    fn test_cell_paragraph_inherits_style() {
        let body = render(&[sample()]).unwrap();
        let rows = body.descendants_named("w:tr");
        let style_of = |row: &XmlElement, col: usize| {
            row.children_named("w:tc")
                .nth(col)
                .unwrap()
                .descendants_named("w:pStyle")
                .first()
                .and_then(|s| s.attr("w:val"))
                .map(str::to_string)
        };
        assert_eq!(style_of(rows[0], 1).as_deref(), Some("HeaderRow"));
        assert_eq!(style_of(rows[1], 0).as_deref(), Some("Highlight"));
        assert_eq!(style_of(rows[2], 0), None);

        // Header style is bold, so its cells' runs are too.
        assert_eq!(rows[0].descendants_named("w:b").len(), 2);
        assert_eq!(rows[1].child("w:tc").unwrap().text(), "a");
    }

    #[test]
    fn test_each_cell_has_one_paragraph() {
        let body = render(&[sample()]).unwrap();
        for tc in body.descendants_named("w:tc") {
            assert_eq!(tc.children_named("w:p").count(), 1);
        }
    }

    #[test]
    fn test_list_view_first_column_flag() {
        let source = Table::new("people", vec![Column::auto(), Column::auto(), Column::auto()])
            .with_header_row()
            .with_rows([
                Row::from_texts(["Name", "Age", "City"]),
                Row::from_texts(["Ann", "31", "Oslo"]),
            ]);
        let tables = source.to_list_view();
        let body = render(&tables).unwrap();

        assert_eq!(body.descendants_named("w:gridCol").len(), 2);
        let rows = body.descendants_named("w:tr");
        assert_eq!(rows.len(), 3);
        for (index, row) in rows.iter().enumerate() {
            let flags: Vec<bool> = row
                .children_named("w:tc")
                .map(|tc| {
                    tc.descendants_named("w:cnfStyle")
                        .iter()
                        .any(|c| c.attr("w:firstColumn") == Some("1"))
                })
                .collect();
            assert_eq!(flags, [index > 0, false]);
        }
    }

    #[test]
    fn test_physical_tables_are_independent() {
        let tables = sample().split_columns(1);
        let body = render(&tables).unwrap();
        let names: Vec<&str> = body.elements().map(|e| e.name()).collect();
        assert_eq!(names, ["w:tbl", "w:p", "w:tbl", "w:p"]);
        assert_eq!(body.descendants_named("w:tblHeader").len(), 2);
    }

    #[test]
    fn test_caption_placement_only_moves_caption() {
        let above = sample().with_caption("Totals", Some(CaptionPlacement::Above));
        let below = sample().with_caption("Totals", Some(CaptionPlacement::Below));
        let a = render(&[above]).unwrap();
        let b = render(&[below]).unwrap();

        let names_a: Vec<&str> = a.elements().map(|e| e.name()).collect();
        let names_b: Vec<&str> = b.elements().map(|e| e.name()).collect();
        assert_eq!(names_a, ["w:p", "w:tbl", "w:p"]);
        assert_eq!(names_b, ["w:tbl", "w:p", "w:p"]);

        let a: Vec<&XmlElement> = a.elements().collect();
        let b: Vec<&XmlElement> = b.elements().collect();
        assert_eq!(a[0].text(), "Totals");
        assert_eq!(b[1].text(), "Totals");
        assert_eq!(a[0].to_xml().unwrap(), b[1].to_xml().unwrap());
        assert_eq!(a[1].to_xml().unwrap(), b[0].to_xml().unwrap());
        assert_eq!(a[2].to_xml().unwrap(), b[2].to_xml().unwrap());
    }

    #[test]
    fn test_rerender_is_identical() {
        let tables = [sample().with_caption("c", None)];
        let first = render(&tables).unwrap().to_xml().unwrap();
        let second = render(&tables).unwrap().to_xml().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_columns_is_error() {
        let table = Table::new("empty", vec![]).with_rows([Row::from_texts(["x"])]);
        let err = render(&[table]).unwrap_err();
        assert!(matches!(err, Error::EmptyColumns(ref id) if id == "empty"));
    }

    #[test]
    fn test_unknown_row_style_is_error() {
        let table = Table::new("t", vec![Column::auto()])
            .with_rows([Row::from_texts(["x"]).with_style("Missing")]);
        assert!(matches!(render(&[table]), Err(Error::UnknownStyle(_))));
    }

    #[test]
    fn test_unknown_table_style_is_error() {
        let table = Table::new("t", vec![Column::auto()]).with_style("Missing");
        assert!(matches!(render(&[table]), Err(Error::UnknownStyle(_))));
    }

    #[test]
    fn test_ragged_rows_are_rendered_as_given() {
        let table = Table::new("t", vec![Column::auto(), Column::auto()]).with_rows([
            Row::from_texts(["only one"]),
            Row::from_texts(["a", "b", "c"]),
        ]);
        let body = render(&[table]).unwrap();
        let rows = body.descendants_named("w:tr");
        assert_eq!(body.descendants_named("w:gridCol").len(), 2);
        assert_eq!(rows[0].children_named("w:tc").count(), 1);
        assert_eq!(rows[1].children_named("w:tc").count(), 3);
        // Third cell has no grid column, so no explicit width either
        let third = rows[1].children_named("w:tc").nth(2).unwrap();
        assert_eq!(
            third.descendants_named("w:tcW")[0].attr("w:type"),
            Some("auto")
        );
    }

    #[test]
    fn test_table_style_background() {
        let reg = StyleRegistry::new(
            [
                EffectiveStyle::new("Normal"),
                EffectiveStyle::new("Tinted").with_background(GREY),
            ],
            "Normal",
        )
        .unwrap();
        let table = Table::new("t", vec![Column::auto()])
            .with_style("Tinted")
            .with_rows([Row::from_texts(["x"])]);
        let body = render_with(&reg, &[table]).unwrap();
        let tbl_pr = body.descendants_named("w:tblPr")[0];
        assert_eq!(tbl_pr.child("w:shd").unwrap().attr("w:fill"), Some("D9D9D9"));
        // Table shading is not copied onto cells
        assert!(body.descendants_named("w:tcPr")[0].child("w:shd").is_none());
    }

    #[test]
    fn test_default_style_background_not_on_table() {
        let reg = StyleRegistry::new([EffectiveStyle::new("Normal").with_background(GREY)], "Normal")
            .unwrap();
        let table = Table::new("t", vec![Column::auto()]).with_rows([Row::from_texts(["x"])]);
        let body = render_with(&reg, &[table]).unwrap();
        assert!(body.descendants_named("w:shd").is_empty());
    }

    #[test]
    fn test_empty_caption_is_skipped() {
        let table = sample().with_caption("", Some(CaptionPlacement::Above));
        let body = render(&[table]).unwrap();
        let names: Vec<&str> = body.elements().map(|e| e.name()).collect();
        assert_eq!(names, ["w:tbl", "w:p"]);
        assert!(!body.to_xml().unwrap().contains("t-caption"));
    }

    #[test]
    fn test_list_view_without_header_row() {
        let mut source = Table::new("kv", vec![Column::auto(), Column::auto()])
            .with_rows([Row::from_texts(["a", "b"])]);
        source.has_header_row = false;
        let body = render(&source.to_list_view()).unwrap();
        assert!(body.descendants_named("w:tblHeader").is_empty());
        assert!(body.descendants_named("w:trPr").is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn prop_grid_sum_within_truncation(count in 1usize..12, width in 10.0f64..100.0, indent in 0u32..4) {
                let table = Table::new("t", vec![Column::auto(); count])
                    .with_width(width)
                    .with_indent(indent);
                let body = render(&[table.clone()]).unwrap();

                let available = PageGeometry::A4
                    .text_width_twips()
                    .saturating_sub(indent * 720);
                let total = pct_to_twips(width, available);
                let sum: u32 = grid_widths(&body).iter().sum();
                prop_assert!(sum <= total);
                prop_assert!(total - sum <= count as u32);
            }
        }
    }
}
