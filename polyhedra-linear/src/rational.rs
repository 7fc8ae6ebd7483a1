use std::fmt::{self, Display};
use std::str::FromStr;

use num::bigint::BigInt;
use num::{BigRational, Integer, One, Signed, Zero};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseRatioError {
    BadInteger(String),
    ZeroDenominator,
}

impl Display for ParseRatioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseRatioError::BadInteger(tok) => write!(f, "not an integer: {}", tok),
            ParseRatioError::ZeroDenominator => write!(f, "zero denominator"),
        }
    }
}

/// Parses `p` or `p/q` with arbitrary-precision integers.
/// Whitespace around either part is tolerated.
pub fn parse_ratio(text: &str) -> Result<BigRational, ParseRatioError> {
    match text.split_once('/') {
        None => Ok(BigRational::from_integer(parse_int(text)?)),
        Some((numer, denom)) => {
            let p = parse_int(numer)?;
            let q = parse_int(denom)?;
            if q.is_zero() {
                return Err(ParseRatioError::ZeroDenominator);
            }
            Ok(BigRational::new(p, q))
        }
    }
}

fn parse_int(text: &str) -> Result<BigInt, ParseRatioError> {
    let text = text.trim();
    BigInt::from_str(text).map_err(|_| ParseRatioError::BadInteger(text.to_string()))
}

/// The canonical text of a rational vector: space-separated lowest-terms
/// entries. Used both for file output and as a dedup key.
pub fn row_text(row: &[BigRational]) -> String {
    let entries: Vec<String> = row.iter().map(|x| x.to_string()).collect();
    entries.join(" ")
}

/// Canonical form of a direction vector: denominators cleared, numerators
/// divided by their gcd, sign flipped so the first nonzero entry is
/// positive. Two vectors are positive multiples of each other iff their
/// canonical forms are equal. The zero vector is returned unchanged.
pub fn canonical_direction(v: &[BigRational]) -> Vec<BigRational> {
    let mut scale = BigInt::one();
    for x in v {
        scale = scale.lcm(x.denom());
    }
    let ints: Vec<BigInt> = v.iter().map(|x| x.numer() * (&scale / x.denom())).collect();
    let mut g = BigInt::zero();
    for x in &ints {
        g = g.gcd(x);
    }
    if g.is_zero() {
        return v.to_vec();
    }
    if let Some(first) = ints.iter().find(|x| !x.is_zero()) {
        if first.is_negative() {
            g = -g;
        }
    }
    ints.into_iter()
        .map(|x| BigRational::from_integer(x / &g))
        .collect()
}

/// Canonical form of a halfspace row: divided by the absolute value of
/// its first nonzero entry. The divisor is positive, so the halfspace is
/// unchanged. The zero vector is returned unchanged.
pub fn canonical_halfspace(h: &[BigRational]) -> Vec<BigRational> {
    match h.iter().find(|x| !x.is_zero()) {
        None => h.to_vec(),
        Some(lead) => {
            let scale = lead.abs();
            h.iter().map(|x| x / &scale).collect()
        }
    }
}
