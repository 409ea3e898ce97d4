use std::collections::{BTreeMap, BTreeSet};

use num_traits::Zero;

/// A sparse matrix held as two ordered indices: cell values keyed by
/// `(row, col)` plus a column-major key set for column traversal.
///
/// Writing a zero removes the cell, so `row` and `col` expose exactly the
/// non-zero entries, each once, in ascending index order. The iterators
/// borrow the matrix; a caller that rewrites a row or column while walking
/// it must collect the entries into an owned buffer first, which is what
/// the pivot kernel does.
#[derive(Debug, Clone)]
pub struct SparseMatrix<T> {
    cells: BTreeMap<(usize, usize), T>,
    cols: BTreeSet<(usize, usize)>,
    n_rows: usize,
}

impl<T> SparseMatrix<T> {
    pub fn new() -> Self {
        SparseMatrix {
            cells: BTreeMap::new(),
            cols: BTreeSet::new(),
            n_rows: 0,
        }
    }

    /// High-water mark over the rows that have held a non-zero value.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Non-zero entries of row `i` in ascending column order.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        self.cells
            .range((i, 0)..=(i, usize::MAX))
            .map(|(&(_, j), value)| (j, value))
    }

    /// Non-zero entries of column `j` in ascending row order.
    pub fn col(&self, j: usize) -> impl Iterator<Item = (usize, &T)> {
        self.cols
            .range((j, 0)..=(j, usize::MAX))
            .map(move |&(_, i)| (i, &self.cells[&(i, j)]))
    }
}

impl<T> SparseMatrix<T>
where
    T: Clone + Zero,
{
    /// Value at `(i, j)`; zero when the cell is absent.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.cells.get(&(i, j)).cloned().unwrap_or_else(T::zero)
    }

    /// Writes `value` at `(i, j)`; writing zero clears the cell.
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        if value.is_zero() {
            if self.cells.remove(&(i, j)).is_some() {
                self.cols.remove(&(j, i));
            }
        } else {
            self.n_rows = self.n_rows.max(i + 1);
            self.cells.insert((i, j), value);
            self.cols.insert((j, i));
        }
    }
}

impl<T> Default for SparseMatrix<T> {
    fn default() -> Self {
        SparseMatrix::new()
    }
}
