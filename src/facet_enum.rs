use std::collections::HashSet;

use num::{BigRational, One, Signed, Zero};
use serde::Serialize;

use polyhedra_linear::rational::{canonical_halfspace, row_text};
use polyhedra_linear::{dot, nullspace1, rank};

use crate::phase1::next_subset;
use crate::polyhedron::{HRep, VRep};

/// Counters accumulated over one facet-enumeration run. `bases` counts
/// the row subsets that span a candidate hyperplane (one-dimensional
/// nullspace), before orientation and dedup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FacetStats {
    pub facets: u64,
    pub bases: u64,
}

/// The supporting halfspaces of a V-polyhedron plus run statistics.
pub struct FacetEnumeration {
    pub halfspaces: HRep,
    pub stats: FacetStats,
}

struct Facet {
    row: Vec<BigRational>,
    key: String,
    cobasis: Vec<usize>,
}

/// Enumerates the distinct supporting halfspaces of the polyhedron
/// spanned by the given vertices and rays, by scanning the dim-subsets
/// of the lifted rows in lex order.
///
/// Facets are ordered: those through the origin first, then by their
/// cobasis (the lex-first affinely independent set of tight vertices),
/// then by canonical row text.
pub fn enumerate_facets(v: &VRep) -> FacetEnumeration {
    let d = v.dim();
    let lifted = v.to_rows();
    let verts = v.vertices();
    let rays = v.rays();
    let mut stats = FacetStats::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut facets: Vec<Facet> = Vec::new();

    if d > 0 && lifted.len() >= d {
        let mut subset: Vec<usize> = (0..d).collect();
        loop {
            let chosen: Vec<Vec<BigRational>> =
                subset.iter().map(|&i| lifted[i].clone()).collect();
            if let Some(normal) = nullspace1(&chosen) {
                stats.bases += 1;
                // An all-ray subset can span the trivial halfspace
                // b >= 0 (empty coefficient part); it is not a facet.
                let oriented = if normal[1..].iter().any(|x| !x.is_zero()) {
                    orient(normal, &verts, &rays)
                } else {
                    None
                };
                if let Some(oriented) = oriented {
                    let row = canonical_halfspace(&oriented);
                    let key = row_text(&row);
                    if seen.insert(key.clone()) {
                        let cobasis = tight_cobasis(&row, &verts, d);
                        facets.push(Facet { row, key, cobasis });
                    }
                }
            }
            if !next_subset(&mut subset, lifted.len()) {
                break;
            }
        }
    }

    stats.facets = facets.len() as u64;
    facets.sort_by(|a, b| {
        let a_origin = !a.row[0].is_zero();
        let b_origin = !b.row[0].is_zero();
        a_origin
            .cmp(&b_origin)
            .then_with(|| a.cobasis.cmp(&b.cobasis))
            .then_with(|| a.key.cmp(&b.key))
    });
    let rows = facets.into_iter().map(|f| f.row).collect();
    FacetEnumeration {
        halfspaces: HRep::from_rows(d, rows),
        stats,
    }
}

/// Checks a candidate normal against every generator, trying both signs.
/// None when neither sign yields a valid supporting halfspace.
fn orient(
    normal: Vec<BigRational>,
    verts: &[Vec<BigRational>],
    rays: &[Vec<BigRational>],
) -> Option<Vec<BigRational>> {
    if supports(&normal, verts, rays) {
        return Some(normal);
    }
    let negated: Vec<BigRational> = normal.iter().map(|x| -x).collect();
    if supports(&negated, verts, rays) {
        return Some(negated);
    }
    None
}

fn supports(h: &[BigRational], verts: &[Vec<BigRational>], rays: &[Vec<BigRational>]) -> bool {
    verts
        .iter()
        .all(|x| !(&h[0] + dot(&h[1..], x)).is_negative())
        && rays.iter().all(|r| !dot(&h[1..], r).is_negative())
}

/// The lex-first affinely independent dim-subset of the vertices tight
/// on the facet, by input order; every tight vertex when fewer than dim
/// independent ones exist (the facet is then unbounded).
fn tight_cobasis(h: &[BigRational], verts: &[Vec<BigRational>], d: usize) -> Vec<usize> {
    let mut cobasis = Vec::new();
    let mut lifted: Vec<Vec<BigRational>> = Vec::new();
    for (i, x) in verts.iter().enumerate() {
        if cobasis.len() == d {
            break;
        }
        if !(&h[0] + dot(&h[1..], x)).is_zero() {
            continue;
        }
        let mut row = vec![BigRational::one()];
        row.extend_from_slice(x);
        lifted.push(row);
        if rank(&lifted) == lifted.len() {
            cobasis.push(i);
        } else {
            lifted.pop();
        }
    }
    cobasis
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::bigint::BigInt;

    fn qs(values: &[i64]) -> Vec<BigRational> {
        values
            .iter()
            .map(|&n| BigRational::from_integer(BigInt::from(n)))
            .collect()
    }

    #[test]
    fn square_vertices_give_four_facets() {
        let v = VRep::from_rows(
            2,
            vec![qs(&[1, 0, 0]), qs(&[1, 1, 0]), qs(&[1, 0, 1]), qs(&[1, 1, 1])],
        );
        let result = enumerate_facets(&v);
        assert_eq!(result.stats.facets, 4);
        let mut rows = result.halfspaces.to_rows();
        rows.sort();
        let mut expected = vec![
            qs(&[0, 1, 0]),
            qs(&[0, 0, 1]),
            qs(&[1, -1, 0]),
            qs(&[1, 0, -1]),
        ];
        expected.sort();
        assert_eq!(rows, expected);
    }

    #[test]
    fn origin_facets_come_first() {
        let v = VRep::from_rows(
            2,
            vec![qs(&[1, 0, 0]), qs(&[1, 1, 0]), qs(&[1, 0, 1]), qs(&[1, 1, 1])],
        );
        let rows = enumerate_facets(&v).halfspaces.to_rows();
        assert!(rows[0][0].is_zero());
        assert!(rows[1][0].is_zero());
        assert!(!rows[2][0].is_zero());
        assert!(!rows[3][0].is_zero());
    }

    #[test]
    fn simplex_round_trip_recovers_vertices() {
        use crate::reverse_search::{enumerate_vertices, EnumConfig};
        let v = VRep::from_rows(
            3,
            vec![
                qs(&[1, 0, 0, 0]),
                qs(&[1, 1, 0, 0]),
                qs(&[1, 0, 1, 0]),
                qs(&[1, 0, 0, 1]),
            ],
        );
        let facets = enumerate_facets(&v);
        assert_eq!(facets.stats.facets, 4);
        let back = enumerate_vertices(&facets.halfspaces, &EnumConfig::default());
        assert_eq!(back.stats.vertices, 4);
        assert_eq!(back.stats.rays, 0);
        let mut rows = back.generators.to_rows();
        rows.sort();
        let mut expected = v.to_rows();
        expected.sort();
        assert_eq!(rows, expected);
    }

    #[test]
    fn square_round_trip_recovers_facets() {
        use crate::reverse_search::{enumerate_vertices, EnumConfig};
        let original = vec![
            qs(&[0, 1, 0]),
            qs(&[0, 0, 1]),
            qs(&[1, -1, 0]),
            qs(&[1, 0, -1]),
        ];
        let h = HRep::from_rows(2, original.clone());
        let verts = enumerate_vertices(&h, &EnumConfig::default());
        assert!(verts.failure.is_none());
        let back = enumerate_facets(&verts.generators);
        let mut rows = back.halfspaces.to_rows();
        rows.sort();
        let mut expected = original;
        expected.sort();
        assert_eq!(rows, expected);
    }

    #[test]
    fn ray_only_directions_make_unbounded_facets() {
        // Apex plus two rays: the cone y >= 0, x - y >= 0.
        let v = VRep::from_rows(
            2,
            vec![qs(&[1, 0, 0]), qs(&[0, 1, 0]), qs(&[0, 1, 1])],
        );
        let result = enumerate_facets(&v);
        let mut rows = result.halfspaces.to_rows();
        rows.sort();
        let mut expected = vec![qs(&[0, 0, 1]), qs(&[0, 1, -1])];
        expected.sort();
        assert_eq!(rows, expected);
    }

    #[test]
    fn too_few_rows_give_no_facets() {
        let v = VRep::from_rows(2, vec![qs(&[1, 0, 0])]);
        let result = enumerate_facets(&v);
        assert_eq!(result.stats.facets, 0);
        assert_eq!(result.halfspaces.rows(), 0);
    }
}
