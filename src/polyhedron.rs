use num::{BigRational, Zero};

use polyhedra_linear::Matrix;

/// A polyhedron as halfspaces: row i is `[b_i | a_i]`, encoding
/// `b_i + a_i x >= 0`. The geometric dimension is one less than the
/// column count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HRep(Matrix);

impl HRep {
    pub fn new(mat: Matrix) -> HRep {
        assert!(mat.cols() >= 1, "an H row needs at least the offset column");
        HRep(mat)
    }

    pub fn from_rows(dim: usize, rows: Vec<Vec<BigRational>>) -> HRep {
        HRep::new(Matrix::from_rows(dim + 1, rows))
    }

    pub fn rows(&self) -> usize {
        self.0.rows()
    }

    pub fn dim(&self) -> usize {
        self.0.cols() - 1
    }

    /// The constant term b_i.
    pub fn offset(&self, row: usize) -> &BigRational {
        self.0.get(row, 0)
    }

    /// The coefficient vector a_i.
    pub fn coeffs(&self, row: usize) -> Vec<BigRational> {
        (1..self.0.cols()).map(|j| self.0.get(row, j).clone()).collect()
    }

    pub fn row(&self, row: usize) -> Vec<BigRational> {
        self.0.row(row)
    }

    pub fn to_rows(&self) -> Vec<Vec<BigRational>> {
        self.0.to_rows()
    }
}

/// A polyhedron as generators: rows `[1 | x]` are vertices, rows
/// `[0 | r]` are extreme-ray directions. A nonzero leading entry is
/// rescaled to 1 on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VRep(Matrix);

impl VRep {
    pub fn new(mut mat: Matrix) -> VRep {
        assert!(mat.cols() >= 1, "a V row needs at least the type column");
        for i in 0..mat.rows() {
            let lead = mat.get(i, 0).clone();
            if lead.is_zero() {
                continue;
            }
            for j in 0..mat.cols() {
                let scaled = mat.get(i, j) / &lead;
                mat.set(i, j, scaled);
            }
        }
        VRep(mat)
    }

    pub fn from_rows(dim: usize, rows: Vec<Vec<BigRational>>) -> VRep {
        VRep::new(Matrix::from_rows(dim + 1, rows))
    }

    pub fn empty(dim: usize) -> VRep {
        VRep(Matrix::new(0, dim + 1))
    }

    pub fn rows(&self) -> usize {
        self.0.rows()
    }

    pub fn dim(&self) -> usize {
        self.0.cols() - 1
    }

    pub fn is_vertex_row(&self, row: usize) -> bool {
        !self.0.get(row, 0).is_zero()
    }

    /// The point or direction part of a row.
    pub fn point(&self, row: usize) -> Vec<BigRational> {
        (1..self.0.cols()).map(|j| self.0.get(row, j).clone()).collect()
    }

    /// Vertex coordinates, in input order.
    pub fn vertices(&self) -> Vec<Vec<BigRational>> {
        (0..self.rows())
            .filter(|&i| self.is_vertex_row(i))
            .map(|i| self.point(i))
            .collect()
    }

    /// Ray directions, in input order.
    pub fn rays(&self) -> Vec<Vec<BigRational>> {
        (0..self.rows())
            .filter(|&i| !self.is_vertex_row(i))
            .map(|i| self.point(i))
            .collect()
    }

    pub fn to_rows(&self) -> Vec<Vec<BigRational>> {
        self.0.to_rows()
    }
}
