use num::{BigRational, Signed};

use polyhedra_linear::{dot, inv, mat_vec};

use crate::polyhedron::HRep;

/// The coefficient rows of a candidate basis were linearly dependent.
/// Callers skip such candidates; the error never reaches the user.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SingularBasis;

/// The simplex dictionary of an H-polyhedron at a chosen basis: the
/// sorted tight-row indices, the exact inverse of their coefficient
/// submatrix, and the vertex the basis determines.
///
/// A dictionary is immutable; pivoting constructs a new one from the
/// neighbor basis.
pub struct Dictionary<'a> {
    h: &'a HRep,
    basis: Vec<usize>,
    binv: Vec<Vec<BigRational>>,
    vertex: Vec<BigRational>,
}

impl<'a> Dictionary<'a> {
    /// Builds the dictionary for `basis`, which must hold `dim` distinct
    /// row indices. Fails with `SingularBasis` when the basis rows do
    /// not determine a vertex.
    pub fn new(h: &'a HRep, mut basis: Vec<usize>) -> Result<Dictionary<'a>, SingularBasis> {
        let d = h.dim();
        basis.sort_unstable();
        assert_eq!(basis.len(), d, "a basis holds exactly dim rows");
        let b_a: Vec<Vec<BigRational>> = basis.iter().map(|&i| h.coeffs(i)).collect();
        let binv = match inv(&b_a) {
            Ok(binv) => binv,
            Err(_) => return Err(SingularBasis),
        };
        // The vertex solves B x = -b_B.
        let neg_b: Vec<BigRational> = basis.iter().map(|&i| -h.offset(i)).collect();
        let vertex = mat_vec(&binv, &neg_b);
        Ok(Dictionary {
            h,
            basis,
            binv,
            vertex,
        })
    }

    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    pub fn vertex(&self) -> &[BigRational] {
        &self.vertex
    }

    /// The slack `b_i + a_i x` of row i at the current vertex. Zero on
    /// basis rows; non-negative everywhere iff the dictionary is
    /// feasible.
    pub fn slack(&self, row: usize) -> BigRational {
        self.h.offset(row) + dot(&self.h.coeffs(row), &self.vertex)
    }

    pub fn is_feasible(&self) -> bool {
        (0..self.h.rows()).all(|i| !self.slack(i).is_negative())
    }

    fn nonbasic_rows(&self) -> Vec<usize> {
        (0..self.h.rows())
            .filter(|i| self.basis.binary_search(i).is_err())
            .collect()
    }

    /// The ℓ-th column of the basis inverse: the edge direction that
    /// keeps every basis row tight except `basis[ℓ]`, whose slack grows
    /// at unit rate.
    fn edge_direction(&self, position: usize) -> Vec<BigRational> {
        self.binv.iter().map(|row| row[position].clone()).collect()
    }

    /// Every basis reachable by one feasible pivot, in ascending lex
    /// order of the sorted index tuples.
    ///
    /// A pivot drives non-basic row e tight along the edge direction of
    /// basis position ℓ. It is admissible when the slack of e shrinks
    /// along that edge (rate negative) and no other non-basic slack goes
    /// negative over the step.
    pub fn neighbor_bases(&self) -> Vec<Vec<usize>> {
        let nonbasic = self.nonbasic_rows();
        let mut neighbors = Vec::new();
        for &e in &nonbasic {
            let a_e = self.h.coeffs(e);
            let s_e = self.slack(e);
            for position in 0..self.basis.len() {
                let u = self.edge_direction(position);
                let rate_e = dot(&a_e, &u);
                if !rate_e.is_negative() {
                    continue;
                }
                // Slack of row j after stepping to the point where e is
                // tight: s_j - s_e (a_j . u) / rate_e, exact.
                let blocked = nonbasic.iter().any(|&j| {
                    if j == e {
                        return false;
                    }
                    let rate_j = dot(&self.h.coeffs(j), &u);
                    let stepped = self.slack(j) - &s_e * &rate_j / &rate_e;
                    stepped.is_negative()
                });
                if blocked {
                    continue;
                }
                let mut neighbor = self.basis.clone();
                neighbor[position] = e;
                neighbor.sort_unstable();
                neighbors.push(neighbor);
            }
        }
        neighbors.sort();
        neighbors
    }

    /// The lex-least neighbor strictly below this basis, or None at the
    /// root of the arborescence.
    pub fn parent_basis(&self) -> Option<Vec<usize>> {
        self.neighbor_bases()
            .into_iter()
            .find(|neighbor| neighbor < &self.basis)
    }

    /// Directions of the extreme rays incident to the current vertex:
    /// edge directions along which no non-basic row ever blocks.
    /// Returned uncanonicalized, in basis-position order.
    pub fn ray_directions(&self) -> Vec<Vec<BigRational>> {
        let nonbasic = self.nonbasic_rows();
        let mut rays = Vec::new();
        for position in 0..self.basis.len() {
            let u = self.edge_direction(position);
            let unbounded = nonbasic
                .iter()
                .all(|&j| !dot(&self.h.coeffs(j), &u).is_negative());
            if unbounded {
                rays.push(u);
            }
        }
        rays
    }
}
