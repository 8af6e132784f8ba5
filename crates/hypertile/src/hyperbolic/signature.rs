//! Reflection-group signatures and their target angles.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Mirror counts `q_i` at each polygon vertex. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReflectionGroupSignature(Vec<u32>);

impl ReflectionGroupSignature {
    /// Pre: every entry positive. Length and `q_i ≥ 3` are left to the
    /// feasibility check so that `{2,2,2}` reports an angle-sum failure.
    pub fn new(entries: Vec<u32>) -> Result<Self, ParseError> {
        if let Some(index) = entries.iter().position(|&q| q == 0) {
            return Err(ParseError::NonPositive { index, value: 0 });
        }
        Ok(Self(entries))
    }
    /// Regular signature `{q, q, …, q}` with `p` entries.
    pub fn regular(p: usize, q: u32) -> Result<Self, ParseError> {
        Self::new(vec![q; p])
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    #[inline]
    pub fn entries(&self) -> &[u32] {
        &self.0
    }
    /// `angle_i = 2π / q_i`.
    pub fn angles(&self) -> AngleSequence {
        AngleSequence(self.0.iter().map(|&q| TAU / f64::from(q)).collect())
    }
}

impl FromStr for ReflectionGroupSignature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_signature(s)
    }
}

impl fmt::Display for ReflectionGroupSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, q) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{q}")?;
        }
        Ok(())
    }
}

/// Parse comma-separated integers, e.g. `"4, 6, 4, 6"`.
///
/// Tokens are trimmed; any token that is not an integer fails the whole parse.
pub fn parse_signature(text: &str) -> Result<ReflectionGroupSignature, ParseError> {
    let mut entries = Vec::new();
    for (index, token) in text.split(',').enumerate() {
        let token = token.trim();
        let value: i64 = token.parse().map_err(|_| ParseError::NotAnInteger {
            index,
            token: token.to_string(),
        })?;
        if value <= 0 {
            return Err(ParseError::NonPositive { index, value });
        }
        let q = u32::try_from(value).map_err(|_| ParseError::OutOfRange { index, value })?;
        entries.push(q);
    }
    ReflectionGroupSignature::new(entries)
}

/// Target interior angles, one per vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleSequence(Vec<f64>);

impl AngleSequence {
    /// Raw angles (radians). Validity is checked by `check_feasible`.
    pub fn new(angles: Vec<f64>) -> Self {
        Self(angles)
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
    #[inline]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
    /// Index of the next vertex (cyclic).
    #[inline]
    pub fn next(&self, i: usize) -> usize {
        (i + 1) % self.0.len()
    }
    /// Index of the previous vertex (cyclic).
    #[inline]
    pub fn prev(&self, i: usize) -> usize {
        (i + self.0.len() - 1) % self.0.len()
    }
    /// Constant central angle `2π/n` between consecutive vertices.
    #[inline]
    pub fn central_angle(&self) -> f64 {
        TAU / self.0.len() as f64
    }
}

impl std::ops::Index<usize> for AngleSequence {
    type Output = f64;
    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}
