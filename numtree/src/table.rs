//! A small named-column table that can be used as the data of a vectorized call.

use crate::error::RowWidthMismatch;
use numtree_compiler::error::LengthMismatch;
use numtree_error::Error;

/// Rows of numbers under named columns.
///
/// Converting a table into [`Data`](crate::Data) yields one array per column, in column order,
/// with the values exactly as stored.
///
/// ```
/// use numtree::{Call, Expr, Table};
///
/// let table = Table::from_rows(["x", "y"], [[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// let expr = Expr::variable("x") * Expr::variable("y");
/// let output = expr.call(table).unwrap();
/// assert_eq!(output.as_array(), Some(&[2.0, 12.0][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    rows: usize,
}

impl Table {
    /// Creates an empty table with the given column names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect::<Vec<String>>();
        let columns = vec![Vec::new(); names.len()];
        Self { names, columns, rows: 0 }
    }

    /// Creates a table from its column names and rows.
    pub fn from_rows<I, S, R, Row>(names: I, rows: R) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = Row>,
        Row: AsRef<[f64]>,
    {
        let mut table = Self::new(names);
        for row in rows {
            table.push_row(row.as_ref())?;
        }
        Ok(table)
    }

    /// Creates a table from `(name, values)` pairs, one per column. Every column must have the
    /// same length.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let (names, columns): (Vec<String>, Vec<Vec<f64>>) = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .unzip();

        let rows = columns.first().map_or(0, Vec::len);
        if columns.iter().any(|column| column.len() != rows) {
            return Err(Error::unspanned(LengthMismatch {
                lengths: columns.iter().map(Vec::len).collect(),
            }));
        }

        Ok(Self { names, columns, rows })
    }

    /// Appends a row. The row must have one value per column.
    pub fn push_row(&mut self, row: &[f64]) -> Result<(), Error> {
        if row.len() != self.names.len() {
            return Err(Error::unspanned(RowWidthMismatch {
                row: self.rows,
                expected: self.names.len(),
                given: row.len(),
            }));
        }

        for (column, &value) in self.columns.iter_mut().zip(row) {
            column.push(value);
        }
        self.rows += 1;
        Ok(())
    }

    /// Returns the values of the first column with the given name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|index| self.columns[index].as_slice())
    }

    /// Returns the values of the column at the given index.
    ///
    /// Panics if the index is out of bounds.
    pub fn column_at(&self, index: usize) -> &[f64] {
        &self.columns[index]
    }

    /// Returns the column names, in column order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Returns the number of columns.
    pub fn num_columns(&self) -> usize {
        self.names.len()
    }

    /// Returns the number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Consumes the table, returning `(name, values)` pairs in column order.
    pub fn into_columns(self) -> impl Iterator<Item = (String, Vec<f64>)> {
        self.names.into_iter().zip(self.columns)
    }
}

#[cfg(test)]
mod tests {
    use crate::data::{Data, Value, VariableId};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn push_rows() {
        let mut table = Table::new(["a", "b", "c"]);
        table.push_row(&[1.0, 2.0, 3.0]).unwrap();
        table.push_row(&[4.0, 5.0, 6.0]).unwrap();

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 3);
        assert_eq!(table.column("b"), Some(&[2.0, 5.0][..]));
        assert_eq!(table.column("d"), None);
    }

    #[test]
    fn row_width_mismatch() {
        let mut table = Table::new(["a", "b"]);
        table.push_row(&[1.0, 2.0]).unwrap();
        let err = table.push_row(&[1.0]).unwrap_err();
        assert_eq!(err.kind_as::<RowWidthMismatch>(), Some(&RowWidthMismatch {
            row: 1,
            expected: 2,
            given: 1,
        }));
        assert_eq!(table.num_rows(), 1);
    }

    #[test]
    fn from_columns() {
        let table = Table::from_columns([
            ("x", vec![1.0, 2.0]),
            ("y", vec![3.0, 4.0]),
        ]).unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column_names(), &["x".to_string(), "y".to_string()]);

        let err = Table::from_columns([
            ("x", vec![1.0, 2.0]),
            ("y", vec![3.0]),
        ]).unwrap_err();
        assert_eq!(err.kind_as::<LengthMismatch>(), Some(&LengthMismatch {
            lengths: vec![2, 1],
        }));
    }

    #[test]
    fn into_data_preserves_column_order() {
        let table = Table::from_rows(["z", "a", "m"], [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let expected = vec![
            (VariableId::Name("z".to_string()), Value::Array(vec![1.0, 4.0])),
            (VariableId::Name("a".to_string()), Value::Array(vec![2.0, 5.0])),
            (VariableId::Name("m".to_string()), Value::Array(vec![3.0, 6.0])),
        ];

        assert_eq!(Data::from(&table).into_entries(), expected);
        assert_eq!(Data::from(table).into_entries(), expected);
    }
}
