//! Ordered set of confirmed primes.

use std::fmt;

/// Primes in ascending order of discovery.
///
/// Candidates are generated in increasing order, so discovery order and
/// numeric order coincide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimeSet {
    values: Vec<i64>,
}

impl PrimeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a prime. Callers push in increasing order.
    pub fn push(&mut self, prime: i64) {
        self.values.push(prime);
    }

    /// Number of primes in the set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set holds no primes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest prime, if any.
    pub fn first(&self) -> Option<i64> {
        self.values.first().copied()
    }

    /// Largest prime, if any.
    pub fn last(&self) -> Option<i64> {
        self.values.last().copied()
    }

    /// Borrow the primes as a slice.
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Iterate over the primes.
    pub fn iter(&self) -> std::slice::Iter<'_, i64> {
        self.values.iter()
    }

    /// Consume the set, returning the underlying vector.
    pub fn into_vec(self) -> Vec<i64> {
        self.values
    }
}

impl From<Vec<i64>> for PrimeSet {
    fn from(values: Vec<i64>) -> Self {
        Self { values }
    }
}

impl FromIterator<i64> for PrimeSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PrimeSet {
    type Item = &'a i64;
    type IntoIter = std::slice::Iter<'a, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for PrimeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => {
                write!(f, "{} primes in [{}, {}]", self.len(), first, last)
            }
            _ => write!(f, "0 primes"),
        }
    }
}
