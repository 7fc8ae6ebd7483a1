use std::fmt::{self, Display};

use crate::dictionary::Dictionary;
use crate::polyhedron::HRep;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PhaseOneError {
    /// The inequality system has no feasible point.
    Infeasible,
    /// No dim rows are linearly independent, so no basis exists at all
    /// and the feasible region (if any) contains no vertex.
    DegenerateInfeasibility,
}

impl Display for PhaseOneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseOneError::Infeasible => write!(f, "no feasible point"),
            PhaseOneError::DegenerateInfeasibility => {
                write!(f, "coefficient rank below dimension, no vertex exists")
            }
        }
    }
}

/// Finds the lex-least feasible basis, the root of the reverse-search
/// arborescence.
///
/// The first candidate inspected is the first `dim` rows, so the common
/// case of an input already listing a feasible basis up front returns
/// immediately. Otherwise the dim-subsets of the row indices are scanned
/// in ascending lex order; singular candidates are skipped.
pub fn find_root_basis(h: &HRep) -> Result<Vec<usize>, PhaseOneError> {
    let m = h.rows();
    let d = h.dim();
    if d == 0 || m < d {
        return Err(PhaseOneError::DegenerateInfeasibility);
    }
    let mut saw_basis = false;
    let mut subset: Vec<usize> = (0..d).collect();
    loop {
        if let Ok(dict) = Dictionary::new(h, subset.clone()) {
            saw_basis = true;
            if dict.is_feasible() {
                return Ok(subset);
            }
        }
        if !next_subset(&mut subset, m) {
            break;
        }
    }
    Err(if saw_basis {
        PhaseOneError::Infeasible
    } else {
        PhaseOneError::DegenerateInfeasibility
    })
}

/// Advances a sorted k-subset of {0, .., m-1} to its lex successor.
/// Returns false when the last subset was already reached.
pub(crate) fn next_subset(subset: &mut [usize], m: usize) -> bool {
    let k = subset.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if subset[i] < m - k + i {
            subset[i] += 1;
            for j in i + 1..k {
                subset[j] = subset[j - 1] + 1;
            }
            return true;
        }
    }
    false
}
