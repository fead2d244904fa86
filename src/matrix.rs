//! Dense integer matrix with exact Gauss-Jordan elimination.
//!
//! The elimination never introduces fractions: every row combination is the
//! sum of two integer-scaled rows, and rows are re-simplified by their GCD
//! after each step so intermediate values stay small.

use crate::error::Result;
use crate::num;

/// A rows × cols grid of signed integers, owned by a single balancing call.
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<i64>>,
}

impl Matrix {
    /// A zero-filled matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![0; cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, r: usize, c: usize) -> i64 {
        assert!(r < self.rows && c < self.cols, "matrix index out of bounds");
        self.cells[r][c]
    }

    pub fn set(&mut self, r: usize, c: usize, value: i64) {
        assert!(r < self.rows && c < self.cols, "matrix index out of bounds");
        self.cells[r][c] = value;
    }

    fn add_rows(x: &[i64], y: &[i64]) -> Result<Vec<i64>> {
        x.iter()
            .zip(y)
            .map(|(&a, &b)| num::checked_add(a, b))
            .collect()
    }

    fn multiply_row(x: &[i64], c: i64) -> Result<Vec<i64>> {
        x.iter().map(|&v| num::checked_mul(v, c)).collect()
    }

    fn gcd_row(x: &[i64]) -> i64 {
        x.iter().fold(0, |acc, &v| num::gcd(v, acc))
    }

    /// Divides the row by the GCD of its entries and flips its sign if the
    /// leading nonzero entry is negative, so the leading nonzero entry ends
    /// up positive and the row GCD is 0 or 1. All-zero rows are unchanged.
    fn simplify_row(mut x: Vec<i64>) -> Vec<i64> {
        let sign = match x.iter().find(|&&v| v != 0) {
            Some(&v) => v.signum(),
            None => return x,
        };
        let g = Self::gcd_row(&x) * sign;
        for v in &mut x {
            *v /= g;
        }
        x
    }

    /// Reduces the matrix to a row-echelon form in which every row is
    /// GCD-simplified. Leading coefficients are not normalized to 1.
    pub fn gauss_jordan_eliminate(&mut self) -> Result<()> {
        for row in &mut self.cells {
            *row = Self::simplify_row(std::mem::take(row));
        }

        // Forward elimination.
        let mut num_pivots = 0;
        for col in 0..self.cols {
            let Some(found) = (num_pivots..self.rows).find(|&r| self.cells[r][col] != 0) else {
                continue;
            };
            self.cells.swap(num_pivots, found);
            let pivot_row = num_pivots;
            let pivot = self.cells[pivot_row][col];
            num_pivots += 1;

            for r in num_pivots..self.rows {
                let g = num::gcd(pivot, self.cells[r][col]);
                let scaled = Self::multiply_row(&self.cells[r], pivot / g)?;
                let offset = Self::multiply_row(&self.cells[pivot_row], -self.cells[r][col] / g)?;
                self.cells[r] = Self::simplify_row(Self::add_rows(&scaled, &offset)?);
            }
        }

        // Backward elimination, pivoting on each row's leading column.
        for row in (0..self.rows).rev() {
            let Some(pivot_col) = (0..self.cols).find(|&c| self.cells[row][c] != 0) else {
                continue;
            };
            let pivot = self.cells[row][pivot_col];

            for r in (0..row).rev() {
                let g = num::gcd(pivot, self.cells[r][pivot_col]);
                let scaled = Self::multiply_row(&self.cells[r], pivot / g)?;
                let offset = Self::multiply_row(&self.cells[row], -self.cells[r][pivot_col] / g)?;
                self.cells[r] = Self::simplify_row(Self::add_rows(&scaled, &offset)?);
            }
        }
        Ok(())
    }
}
