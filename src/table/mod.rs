//! A minimal mutable tabular container.
//!
//! [`Table`] stores insertion-ordered, name-keyed columns of [`Cell`] values.
//! It supports exactly the surface a pipeline needs: column presence and
//! listing, projection onto a column subset, column assignment by name,
//! row-wise iteration, and in-place column removal. Numeric and statistical
//! behavior lives inside transform functions, never in the table itself.

use crate::error::PipelineError;

pub mod cell;
mod io;

pub use cell::Cell;

/// One table column.
pub type Column = Vec<Cell>;

/// A value computed by a transform: a scalar, one column, or a sub-table.
///
/// Projections hand transforms a [`Value::Table`]; transforms may return any
/// of the three shapes, and all three are assignable as a table column
/// (scalars broadcast, single-column tables assign their only column).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A single cell, broadcast over all rows on assignment.
    Scalar(Cell),
    /// One column of cells.
    Column(Column),
    /// A sub-table (e.g. a projection or a multi-column intermediate).
    Table(Table),
}

/// An insertion-ordered, name-keyed collection of columns.
///
/// Column order is preserved across assignment and projection; assigning to
/// an existing name overwrites the column in place, keeping its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, column)` pairs in order.
    ///
    /// All columns must share one length; a later pair with an already-seen
    /// name overwrites the earlier column in place.
    pub fn from_columns<N: Into<String>>(
        pairs: impl IntoIterator<Item = (N, Column)>,
    ) -> Result<Self, PipelineError> {
        let mut table = Table::new();
        for (name, column) in pairs {
            table.insert(name.into(), column)?;
        }
        Ok(table)
    }

    /// Number of rows (0 for a table with no columns).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Whether a column with the given name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Borrow a column's cells by name.
    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.position(name).map(|i| self.columns[i].as_slice())
    }

    /// Iterate `(name, cells)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Cell])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Append or overwrite a column, length-checked against existing rows.
    pub fn insert(&mut self, name: impl Into<String>, column: Column) -> Result<(), PipelineError> {
        let name = name.into();
        if !self.is_empty() && column.len() != self.n_rows() {
            return Err(PipelineError::LengthMismatch {
                column: name,
                expected: self.n_rows(),
                got: column.len(),
            });
        }
        match self.position(&name) {
            Some(i) => self.columns[i] = column,
            None => {
                self.names.push(name);
                self.columns.push(column);
            }
        }
        Ok(())
    }

    /// Assign a computed [`Value`] as a column.
    ///
    /// Scalars broadcast over all rows, columns must match the row count,
    /// and a single-column table assigns its only column. Wider tables are
    /// rejected.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), PipelineError> {
        match value {
            Value::Scalar(cell) => {
                let column = vec![cell; self.n_rows()];
                self.insert(name, column)
            }
            Value::Column(column) => self.insert(name, column),
            Value::Table(table) => {
                if table.n_columns() == 1 {
                    self.insert(name, table.columns.into_iter().next().unwrap_or_default())
                } else {
                    Err(PipelineError::InvalidAssignment(format!(
                        "cannot assign a {}-column table to column '{}'",
                        table.n_columns(),
                        name
                    )))
                }
            }
        }
    }

    /// Project onto the subset of `names` that exist, in requested order.
    ///
    /// Missing names are silently skipped; strict column checking is the
    /// runner's concern.
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> Table {
        let mut projected = Table::new();
        for name in names {
            let name = name.as_ref();
            if let Some(cells) = self.column(name) {
                // Same-length columns from self, insert cannot fail.
                let _ = projected.insert(name, cells.to_vec());
            }
        }
        projected
    }

    /// Remove the named columns in place; unknown names are ignored.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            if let Some(i) = self.position(name.as_ref()) {
                self.names.remove(i);
                self.columns.remove(i);
            }
        }
    }

    /// Keep only the named columns, dropping every other column in place.
    pub fn retain_columns<S: AsRef<str>>(&mut self, names: &[S]) {
        let drop = crate::columns::absent_cols(&self.names, names);
        self.drop_columns(&drop);
    }

    /// Iterate over rows.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            table: self,
            next: 0,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// Borrowed view of one table row.
#[derive(Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    /// The row's position in the table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cell in the named column, if the column exists.
    pub fn get(&self, name: &str) -> Option<&'a Cell> {
        self.table.column(name).map(|cells| &cells[self.index])
    }

    /// Iterate the row's cells in column order.
    pub fn cells(&self) -> impl Iterator<Item = &'a Cell> {
        let index = self.index;
        self.table.columns.iter().map(move |col| &col[index])
    }
}

/// Iterator over table rows, created by [`Table::rows`].
pub struct Rows<'a> {
    table: &'a Table,
    next: usize,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.table.n_rows() {
            return None;
        }
        let row = Row {
            table: self.table,
            index: self.next,
        };
        self.next += 1;
        Some(row)
    }
}
