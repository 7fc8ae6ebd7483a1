use std::collections::HashSet;

use num::{BigRational, One, Zero};
use serde::Serialize;

use polyhedra_linear::rational::{canonical_direction, row_text};

use crate::dictionary::Dictionary;
use crate::phase1::{find_root_basis, PhaseOneError};
use crate::polyhedron::{HRep, VRep};

/// Options for a vertex-enumeration run.
pub struct EnumConfig {
    /// DFS depth cap; 0 means unlimited.
    pub max_depth: usize,
    pub verbose: bool,
}

impl Default for EnumConfig {
    fn default() -> EnumConfig {
        EnumConfig {
            max_depth: 0,
            verbose: false,
        }
    }
}

/// Counters accumulated over one enumeration run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EnumStats {
    pub vertices: u64,
    pub rays: u64,
    pub bases: u64,
    pub integer_vertices: u64,
    pub max_depth: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_cobasis: Option<Vec<usize>>,
}

/// The generators of an H-polyhedron plus run statistics. `failure` is
/// set when no starting vertex exists; the generator list is then empty
/// and the statistics are zero.
pub struct VertexEnumeration {
    pub generators: VRep,
    pub stats: EnumStats,
    pub failure: Option<PhaseOneError>,
}

/// Enumerates every vertex and extreme ray of `b + Ax >= 0` by reverse
/// search: a depth-first walk of the arborescence in which each feasible
/// basis hangs under its lex-least smaller neighbor.
///
/// Output rows appear in traversal order, each vertex on the first visit
/// of a basis that yields it, followed by the novel rays at that vertex.
/// The walk is a function of the input alone.
pub fn enumerate_vertices(h: &HRep, conf: &EnumConfig) -> VertexEnumeration {
    let d = h.dim();
    let root = match find_root_basis(h) {
        Ok(root) => root,
        Err(failure) => {
            return VertexEnumeration {
                generators: VRep::empty(d),
                stats: EnumStats::default(),
                failure: Some(failure),
            }
        }
    };

    let mut stats = EnumStats::default();
    let mut rows: Vec<Vec<BigRational>> = Vec::new();
    let mut seen_bases: HashSet<Vec<usize>> = HashSet::new();
    let mut seen_vertices: HashSet<String> = HashSet::new();
    let mut seen_rays: HashSet<String> = HashSet::new();
    let mut stack: Vec<(Vec<usize>, u64)> = vec![(root, 0)];

    while let Some((basis, depth)) = stack.pop() {
        if !seen_bases.insert(basis.clone()) {
            continue;
        }
        let dict = match Dictionary::new(h, basis.clone()) {
            Ok(dict) => dict,
            Err(_) => continue,
        };
        stats.bases += 1;
        stats.max_depth = stats.max_depth.max(depth);
        stats.last_cobasis = Some(basis.clone());
        if conf.verbose {
            eprintln!("basis {:?} at depth {}", basis, depth);
        }

        let vertex_key = row_text(dict.vertex());
        if seen_vertices.insert(vertex_key) {
            stats.vertices += 1;
            if dict.vertex().iter().all(|x| x.is_integer()) {
                stats.integer_vertices += 1;
            }
            let mut row = vec![BigRational::one()];
            row.extend_from_slice(dict.vertex());
            rows.push(row);
        }
        for direction in dict.ray_directions() {
            let canonical = canonical_direction(&direction);
            if seen_rays.insert(row_text(&canonical)) {
                stats.rays += 1;
                let mut row = vec![BigRational::zero()];
                row.extend(canonical);
                rows.push(row);
            }
        }

        if conf.max_depth != 0 && depth as usize >= conf.max_depth {
            continue;
        }
        let children: Vec<Vec<usize>> = dict
            .neighbor_bases()
            .into_iter()
            .filter(|child| match Dictionary::new(h, child.clone()) {
                Ok(child_dict) => child_dict.parent_basis().as_deref() == Some(&basis[..]),
                Err(_) => false,
            })
            .collect();
        // Reverse push order makes the DFS visit children in ascending
        // lex order.
        for child in children.into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    VertexEnumeration {
        generators: VRep::from_rows(d, rows),
        stats,
        failure: None,
    }
}
