use num::rational::Ratio;
use num::traits::{Inv, NumAssign};
use num::{Integer, One, Zero};

/// Reduces a rectangular matrix to reduced row echelon form in place.
/// Returns the pivot columns, one per nonzero row.
fn reduce<Int: Clone + Integer + NumAssign>(a: &mut [Vec<Ratio<Int>>]) -> Vec<usize> {
    let r = a.len();
    let c = if r == 0 { 0 } else { a[0].len() };
    let mut pivots = Vec::new();
    let mut row = 0;
    for col in 0..c {
        if row == r {
            break;
        }
        let pivot = match (row..r).find(|&i| !a[i][col].is_zero()) {
            None => continue,
            Some(pivot) => pivot,
        };
        a.swap(row, pivot);
        let factor = a[row][col].clone().inv();
        for k in col..c {
            a[row][k] *= &factor;
        }
        for i in 0..r {
            if i == row || a[i][col].is_zero() {
                continue;
            }
            let coef = a[i][col].clone();
            for k in col..c {
                let tmp = &coef * &a[row][k];
                a[i][k] -= tmp;
            }
        }
        pivots.push(col);
        row += 1;
    }
    pivots
}

/// Rank of a rectangular matrix.
pub fn rank<Int: Clone + Integer + NumAssign>(a: &[Vec<Ratio<Int>>]) -> usize {
    let mut a = a.to_vec();
    reduce(&mut a).len()
}

/// If the nullspace of a is one-dimensional, returns a nonzero v with av = 0.
/// Returns None when the nullspace has any other dimension.
pub fn nullspace1<Int: Clone + Integer + NumAssign>(
    a: &[Vec<Ratio<Int>>],
) -> Option<Vec<Ratio<Int>>> {
    if a.is_empty() {
        return None;
    }
    let c = a[0].len();
    let mut a = a.to_vec();
    let pivots = reduce(&mut a);
    if c - pivots.len() != 1 {
        return None;
    }
    let free = (0..c).find(|col| !pivots.contains(col)).unwrap();
    let mut v = vec![Ratio::zero(); c];
    v[free] = Ratio::one();
    // Each pivot row reads x_p + a[row][free] x_free = 0.
    for (row, &p) in pivots.iter().enumerate() {
        let mut value = Ratio::zero();
        value -= &a[row][free];
        v[p] = value;
    }
    Some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_works() {
        let a: Vec<Vec<Ratio<i64>>> = vec![
            vec![1.into(), 2.into(), 3.into()],
            vec![2.into(), 4.into(), 6.into()],
            vec![0.into(), 1.into(), 1.into()],
        ];
        assert_eq!(rank(&a), 2);
    }

    #[test]
    fn rank_plus_nullity_is_width() {
        let a: Vec<Vec<Ratio<i64>>> = vec![
            vec![1.into(), 0.into(), 2.into(), 1.into()],
            vec![0.into(), 1.into(), 1.into(), 0.into()],
            vec![1.into(), 1.into(), 3.into(), 1.into()],
        ];
        // Third row is the sum of the first two.
        assert_eq!(rank(&a), 2);
        // Nullity 2, so nullspace1 must refuse.
        assert_eq!(nullspace1(&a), None);
    }

    #[test]
    fn nullspace1_works() {
        let a: Vec<Vec<Ratio<i64>>> = vec![
            vec![1.into(), 0.into(), (-2).into()],
            vec![0.into(), 1.into(), 3.into()],
        ];
        let v = nullspace1(&a).unwrap();
        assert!(v.iter().any(|x| !x.is_zero()));
        for row in &a {
            let s: Ratio<i64> = row.iter().zip(&v).map(|(p, q)| p * q).sum();
            assert_eq!(s, Ratio::zero());
        }
    }

    #[test]
    fn nullspace1_rejects_full_rank() {
        let a: Vec<Vec<Ratio<i64>>> = vec![vec![1.into(), 0.into()], vec![0.into(), 1.into()]];
        assert_eq!(nullspace1(&a), None);
    }

    #[test]
    fn nullspace1_of_duplicated_rows() {
        // Rank 2 with 3 columns: the repeated rows change nothing.
        let a: Vec<Vec<Ratio<i64>>> = vec![
            vec![1.into(), 1.into(), 1.into()],
            vec![1.into(), 1.into(), 1.into()],
            vec![0.into(), 1.into(), 2.into()],
        ];
        let v = nullspace1(&a).unwrap();
        for row in &a {
            let s: Ratio<i64> = row.iter().zip(&v).map(|(p, q)| p * q).sum();
            assert_eq!(s, Ratio::zero());
        }
    }
}
