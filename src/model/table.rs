//! Table types.

use super::StructuralElement;
use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Rows in the table
    #[serde(default)]
    pub table_rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows of plain-text cells.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            table_rows: rows
                .into_iter()
                .map(|cells| TableRow::new(cells.into_iter().map(TableCell::with_text).collect()))
                .collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.table_rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.table_rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table_rows.iter().all(|r| r.table_cells.is_empty())
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Cells in the row
    #[serde(default)]
    pub table_cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { table_cells: cells }
    }
}

/// A table cell. Cells hold their own nested structural content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// Nested structural elements
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

impl TableCell {
    /// Create a cell holding one plain paragraph.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![StructuralElement::Paragraph(super::Paragraph::with_text(
                text,
            ))],
        }
    }

    /// Create a cell from arbitrary structural content.
    pub fn new(content: Vec<StructuralElement>) -> Self {
        Self { content }
    }
}
