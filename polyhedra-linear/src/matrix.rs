use num::{BigRational, Zero};

/// A dense row-major matrix of exact rationals.
///
/// Entries default to zero. Indices are checked on every access; an
/// out-of-range index is a caller bug and panics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    values: Vec<BigRational>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize) -> Matrix {
        Matrix {
            values: vec![BigRational::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Builds a matrix from row vectors. Every row must have length `cols`.
    pub fn from_rows(cols: usize, rows: Vec<Vec<BigRational>>) -> Matrix {
        let mut mat = Matrix::new(rows.len(), cols);
        for (i, row) in rows.into_iter().enumerate() {
            assert_eq!(row.len(), cols, "row {} has the wrong length", i);
            for (j, value) in row.into_iter().enumerate() {
                mat.values[i * cols + j] = value;
            }
        }
        mat
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> &BigRational {
        self.check(row, col);
        &self.values[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: BigRational) {
        self.check(row, col);
        self.values[row * self.cols + col] = value;
    }

    /// Owned copy of row `row`.
    pub fn row(&self, row: usize) -> Vec<BigRational> {
        assert!(row < self.rows, "row {} out of range ({})", row, self.rows);
        self.values[row * self.cols..(row + 1) * self.cols].to_vec()
    }

    /// Owned copy of column `col`.
    pub fn col(&self, col: usize) -> Vec<BigRational> {
        assert!(col < self.cols, "col {} out of range ({})", col, self.cols);
        (0..self.rows)
            .map(|i| self.values[i * self.cols + col].clone())
            .collect()
    }

    /// All rows, in the `Vec<Vec<_>>` shape the solvers take.
    pub fn to_rows(&self) -> Vec<Vec<BigRational>> {
        (0..self.rows).map(|i| self.row(i)).collect()
    }

    fn check(&self, row: usize, col: usize) {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range ({}, {})",
            row,
            col,
            self.rows,
            self.cols
        );
    }
}

/// Inner product of two equal-length rational vectors.
pub fn dot(a: &[BigRational], b: &[BigRational]) -> BigRational {
    assert_eq!(a.len(), b.len());
    let mut sum = BigRational::zero();
    for (x, y) in a.iter().zip(b) {
        sum += x * y;
    }
    sum
}

/// Matrix-vector product, with the matrix given as row vectors.
pub fn mat_vec(a: &[Vec<BigRational>], v: &[BigRational]) -> Vec<BigRational> {
    a.iter().map(|row| dot(row, v)).collect()
}
