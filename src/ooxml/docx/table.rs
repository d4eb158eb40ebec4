/// Table - logical and physical tables of the report document tree.
use serde::{Deserialize, Serialize};

use crate::ooxml::docx::format::CaptionPlacement;
use crate::ooxml::docx::styles::StyleRef;

/// A grid column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    /// Share of the table width in percent; `None` takes an equal share
    pub width_pct: Option<f64>,
    /// Label used when the table is turned into a list view
    pub label: Option<String>,
}

impl Column {
    pub fn auto() -> Self {
        Self::default()
    }

    pub fn pct(width: f64) -> Self {
        Self {
            width_pct: Some(width),
            label: None,
        }
    }
}

/// A table cell holding plain text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cell {
    pub text: String,
    pub style: StyleRef,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: StyleRef::Inherited,
        }
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style = StyleRef::own(style_id);
        self
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub style: StyleRef,
}

impl Row {
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            style: StyleRef::Inherited,
        }
    }

    /// Row of unstyled cells from plain strings.
    pub fn from_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(texts.into_iter().map(Cell::new))
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style = StyleRef::own(style_id);
        self
    }
}

/// A physical table: one `w:tbl` in the output.
///
/// A logical table reaches the renderer as one or more of these, sharing a
/// style (see [`Table::to_list_view`] and [`Table::split_columns`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub id: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub style: StyleRef,
    /// Row 0 is a header repeated on every page
    pub has_header_row: bool,
    /// Two-column label/value rendering
    pub list_view: bool,
    /// Caption text; `None` means no caption
    pub caption: Option<String>,
    /// Overrides the style's caption placement
    pub caption_placement: Option<CaptionPlacement>,
    /// Share of the available text width, in percent
    pub width_pct: f64,
    /// Indentation in tab stops
    pub indent_level: u32,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            id: String::new(),
            columns: Vec::new(),
            rows: Vec::new(),
            style: StyleRef::Inherited,
            has_header_row: false,
            list_view: false,
            caption: None,
            caption_placement: None,
            width_pct: 100.0,
            indent_level: 0,
        }
    }
}

impl Table {
    pub fn new(id: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            id: id.into(),
            columns,
            ..Default::default()
        }
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style = StyleRef::own(style_id);
        self
    }

    pub fn with_header_row(mut self) -> Self {
        self.has_header_row = true;
        self
    }

    pub fn with_caption(
        mut self,
        text: impl Into<String>,
        placement: Option<CaptionPlacement>,
    ) -> Self {
        self.caption = Some(text.into());
        self.caption_placement = placement;
        self
    }

    pub fn with_width(mut self, pct: f64) -> Self {
        self.width_pct = pct;
        self
    }

    pub fn with_indent(mut self, level: u32) -> Self {
        self.indent_level = level;
        self
    }

    /// Columns in the output grid. A list view always has two.
    #[inline]
    pub fn column_count(&self) -> usize {
        if self.list_view { 2 } else { self.columns.len() }
    }

    /// Explicit width of a grid column, if declared.
    #[inline]
    pub fn column_width_pct(&self, index: usize) -> Option<f64> {
        self.columns.get(index).and_then(|c| c.width_pct)
    }

    /// Whether row `index` is the repeating header row.
    #[inline]
    pub fn is_header_row(&self, index: usize) -> bool {
        index == 0 && self.has_header_row
    }

    fn label_for(&self, column: usize) -> String {
        if self.has_header_row
            && let Some(cell) = self.rows.first().and_then(|r| r.cells.get(column))
        {
            return cell.text.clone();
        }
        self.columns
            .get(column)
            .and_then(|c| c.label.clone())
            .unwrap_or_else(|| (column + 1).to_string())
    }

    /// Expand into list-view tables: one two-column label/value table per
    /// data row. The first pair of each record heads its table only when the
    /// source has a header row.
    pub fn to_list_view(&self) -> Vec<Table> {
        let skip = usize::from(self.has_header_row);
        let header_style = self
            .rows
            .first()
            .filter(|_| self.has_header_row)
            .map(|r| r.style.clone())
            .unwrap_or_default();

        self.rows
            .iter()
            .skip(skip)
            .enumerate()
            .map(|(n, record)| {
                let rows = record.cells.iter().enumerate().map(|(col, cell)| {
                    let label_style = self
                        .rows
                        .first()
                        .filter(|_| self.has_header_row)
                        .and_then(|r| r.cells.get(col))
                        .map(|c| c.style.clone())
                        .unwrap_or_default();
                    let style = if col == 0 {
                        header_style.clone()
                    } else {
                        record.style.clone()
                    };
                    Row {
                        cells: vec![
                            Cell {
                                text: self.label_for(col),
                                style: label_style,
                            },
                            cell.clone(),
                        ],
                        style,
                    }
                });
                Table {
                    id: format!("{}-{}", self.id, n + 1),
                    columns: vec![Column::auto(), Column::auto()],
                    rows: rows.collect(),
                    style: self.style.clone(),
                    has_header_row: self.has_header_row,
                    list_view: true,
                    caption: if n == 0 { self.caption.clone() } else { None },
                    caption_placement: self.caption_placement,
                    width_pct: self.width_pct,
                    indent_level: self.indent_level,
                }
            })
            .collect()
    }

    /// Split a wide table into tables of at most `max_columns` columns.
    ///
    /// Explicit widths are rescaled to fill each piece; a piece with any
    /// automatic column falls back to equal shares. Only the first piece
    /// keeps the caption.
    pub fn split_columns(&self, max_columns: usize) -> Vec<Table> {
        if max_columns == 0 || self.list_view || self.columns.len() <= max_columns {
            return vec![self.clone()];
        }

        self.columns
            .chunks(max_columns)
            .enumerate()
            .map(|(n, chunk)| {
                let start = n * max_columns;
                let end = start + chunk.len();
                let explicit: Option<Vec<f64>> = chunk.iter().map(|c| c.width_pct).collect();
                let columns = match explicit {
                    Some(widths) if widths.iter().sum::<f64>() > 0.0 => {
                        let sum: f64 = widths.iter().sum();
                        chunk
                            .iter()
                            .zip(widths)
                            .map(|(c, w)| Column {
                                width_pct: Some(w * 100.0 / sum),
                                label: c.label.clone(),
                            })
                            .collect()
                    },
                    _ => chunk
                        .iter()
                        .map(|c| Column {
                            width_pct: None,
                            label: c.label.clone(),
                        })
                        .collect(),
                };
                let rows = self
                    .rows
                    .iter()
                    .map(|row| Row {
                        cells: row
                            .cells
                            .get(start..end.min(row.cells.len()))
                            .map(<[Cell]>::to_vec)
                            .unwrap_or_default(),
                        style: row.style.clone(),
                    })
                    .collect();
                Table {
                    id: format!("{}-{}", self.id, n + 1),
                    columns,
                    rows,
                    caption: if n == 0 { self.caption.clone() } else { None },
                    ..self.clone_without_content()
                }
            })
            .collect()
    }

    fn clone_without_content(&self) -> Table {
        Table {
            id: self.id.clone(),
            columns: Vec::new(),
            rows: Vec::new(),
            style: self.style.clone(),
            has_header_row: self.has_header_row,
            list_view: self.list_view,
            caption: None,
            caption_placement: self.caption_placement,
            width_pct: self.width_pct,
            indent_level: self.indent_level,
        }
    }
}
