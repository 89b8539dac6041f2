use crate::error::LengthMismatch;
use numtree_error::Error;

/// A column-major, two-dimensional buffer of input values.
///
/// Column `j` holds the values of the `j`th parameter and occupies
/// `data[j * rows .. (j + 1) * rows]`. Each row is one set of inputs to evaluate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Columns {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Columns {
    /// Creates a buffer with the given number of rows and no columns.
    ///
    /// This is the input of an expression without variables, which still produces one output per
    /// row.
    pub fn with_rows(rows: usize) -> Self {
        Self { data: Vec::new(), rows, cols: 0 }
    }

    /// Stacks the given arrays side by side, in order. Every array must have the same length.
    ///
    /// Stacking no arrays produces an empty buffer with zero rows.
    pub fn from_columns<I, C>(columns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[f64]>,
    {
        let mut data = Vec::new();
        let mut lengths = Vec::new();
        for column in columns {
            let column = column.as_ref();
            lengths.push(column.len());
            data.extend_from_slice(column);
        }

        let rows = lengths.first().copied().unwrap_or(0);
        if lengths.iter().any(|&len| len != rows) {
            return Err(Error::unspanned(LengthMismatch { lengths }));
        }

        Ok(Self { data, rows, cols: lengths.len() })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns the column at the given index.
    pub fn column(&self, index: usize) -> Option<&[f64]> {
        if index >= self.cols {
            return None;
        }
        Some(&self.data[index * self.rows..(index + 1) * self.rows])
    }

    /// Returns the value at the given row and column.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[col * self.rows + row]
    }

    /// Copies the row at the given index into `buf`, replacing its contents.
    pub fn row(&self, index: usize, buf: &mut Vec<f64>) {
        buf.clear();
        buf.extend((0..self.cols).map(|col| self.get(index, col)));
    }

    /// Returns the underlying column-major data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn column_major_layout() {
        let columns = Columns::from_columns([vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(columns.rows(), 3);
        assert_eq!(columns.cols(), 2);
        assert_eq!(columns.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(columns.column(1), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(columns.column(2), None);
    }

    #[test]
    fn gather_row() {
        let columns = Columns::from_columns([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let mut buf = vec![99.0; 7];
        columns.row(1, &mut buf);
        assert_eq!(buf, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn length_mismatch() {
        let err = Columns::from_columns([vec![1.0, 2.0, 3.0], vec![1.0, 2.0]]).unwrap_err();
        let kind = err.kind_as::<LengthMismatch>().unwrap();
        assert_eq!(kind.lengths, vec![3, 2]);
    }

    #[test]
    fn no_columns() {
        let columns = Columns::from_columns(Vec::<Vec<f64>>::new()).unwrap();
        assert_eq!(columns.rows(), 0);
        assert!(columns.is_empty());

        let columns = Columns::with_rows(4);
        assert_eq!(columns.rows(), 4);
        assert_eq!(columns.cols(), 0);
        let mut buf = Vec::new();
        columns.row(3, &mut buf);
        assert!(buf.is_empty());
    }
}
