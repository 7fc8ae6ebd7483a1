use num::rational::Ratio;
use num::traits::{Inv, NumAssign};
use num::{Integer, One, Zero};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SingularMatrix;

/// Solves ax = b for a square matrix a.
///
/// If a is not invertible, this function returns Err(SingularMatrix).
///
/// Complexity: O(n^3)
pub fn solve<Int: Clone + Integer + NumAssign>(
    a: &[Vec<Ratio<Int>>],
    b: &[Ratio<Int>],
) -> Result<Vec<Ratio<Int>>, SingularMatrix> {
    let n = a.len();
    assert_eq!(b.len(), n);
    let aug = gauss_jordan(a.to_vec(), b.iter().map(|x| vec![x.clone()]).collect())?;
    Ok(aug.into_iter().map(|mut row| row.pop().unwrap()).collect())
}

/// Inverts a square matrix.
///
/// Complexity: O(n^3)
pub fn inv<Int: Clone + Integer + NumAssign>(
    a: &[Vec<Ratio<Int>>],
) -> Result<Vec<Vec<Ratio<Int>>>, SingularMatrix> {
    let n = a.len();
    let mut id = vec![vec![Ratio::zero(); n]; n];
    #[allow(clippy::needless_range_loop)]
    for i in 0..n {
        id[i][i] = Ratio::one();
    }
    gauss_jordan(a.to_vec(), id)
}

/// Reduces a to the identity by row operations, applying the same
/// operations to aug. Returns the transformed aug.
fn gauss_jordan<Int: Clone + Integer + NumAssign>(
    mut a: Vec<Vec<Ratio<Int>>>,
    mut aug: Vec<Vec<Ratio<Int>>>,
) -> Result<Vec<Vec<Ratio<Int>>>, SingularMatrix> {
    let n = a.len();
    let width = if n == 0 { 0 } else { aug[0].len() };
    for i in 0..n {
        let pivot = match (i..n).find(|&j| !a[j][i].is_zero()) {
            None => return Err(SingularMatrix),
            Some(pivot) => pivot,
        };
        a.swap(i, pivot);
        aug.swap(i, pivot);
        let factor = a[i][i].clone().inv();
        for k in 0..n {
            a[i][k] *= &factor;
        }
        for k in 0..width {
            aug[i][k] *= &factor;
        }
        for j in 0..n {
            if j == i || a[j][i].is_zero() {
                continue;
            }
            let coef = a[j][i].clone();
            for k in 0..n {
                let tmp = &coef * &a[i][k];
                a[j][k] -= tmp;
            }
            for k in 0..width {
                let tmp = &coef * &aug[i][k];
                aug[j][k] -= tmp;
            }
        }
    }
    Ok(aug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mul<Int: Clone + Integer + NumAssign>(
        a: &[Vec<Ratio<Int>>],
        b: &[Vec<Ratio<Int>>],
    ) -> Vec<Vec<Ratio<Int>>> {
        let n = a.len();
        let mut prod = vec![vec![Ratio::zero(); n]; n];
        #[allow(clippy::needless_range_loop)]
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    let tmp = &a[i][k] * &b[k][j];
                    prod[i][j] += tmp;
                }
            }
        }
        prod
    }

    #[test]
    fn solve_works() {
        let a: Vec<Vec<Ratio<i64>>> = vec![vec![1.into(), 2.into()], vec![3.into(), 4.into()]];
        let b = vec![5.into(), 11.into()];
        // (1 2; 3 4) (1 2)^T = (5 11)^T
        assert_eq!(solve(&a, &b), Ok(vec![1.into(), 2.into()]));
    }

    #[test]
    fn solve_recovers_known_product() {
        let a: Vec<Vec<Ratio<i64>>> = vec![
            vec![2.into(), 0.into(), 1.into()],
            vec![1.into(), 1.into(), 0.into()],
            vec![0.into(), 3.into(), 1.into()],
        ];
        let x: Vec<Ratio<i64>> = vec![4.into(), (-1).into(), 7.into()];
        let b: Vec<Ratio<i64>> = a
            .iter()
            .map(|row| row.iter().zip(&x).map(|(p, q)| p * q).sum())
            .collect();
        assert_eq!(solve(&a, &b), Ok(x));
    }

    #[test]
    fn solve_rejects_singular() {
        let a: Vec<Vec<Ratio<i64>>> = vec![vec![1.into(), 2.into()], vec![2.into(), 4.into()]];
        let b = vec![1.into(), 2.into()];
        assert_eq!(solve(&a, &b), Err(SingularMatrix));
    }

    #[test]
    fn inv_works() {
        let a: Vec<Vec<Ratio<i64>>> = vec![vec![5.into(), 2.into()], vec![2.into(), 1.into()]];
        let expected = vec![vec![1.into(), (-2).into()], vec![(-2).into(), 5.into()]];
        assert_eq!(inv(&a), Ok(expected));
    }

    #[test]
    fn inv_times_original_is_identity() {
        let a: Vec<Vec<Ratio<i64>>> = vec![
            vec![0.into(), 1.into(), 2.into()],
            vec![1.into(), 0.into(), 3.into()],
            vec![4.into(), (-3).into(), 8.into()],
        ];
        let ainv = inv(&a).unwrap();
        let mut id = vec![vec![Ratio::zero(); 3]; 3];
        #[allow(clippy::needless_range_loop)]
        for i in 0..3 {
            id[i][i] = Ratio::one();
        }
        assert_eq!(mul(&ainv, &a), id);
        assert_eq!(mul(&a, &ainv), id);
    }

    #[test]
    fn inv_rejects_singular() {
        let a: Vec<Vec<Ratio<i64>>> = vec![vec![1.into(), 0.into()], vec![(-3).into(), 0.into()]];
        assert_eq!(inv(&a), Err(SingularMatrix));
    }
}
