//! Candidate range configuration.
//!
//! A range yields `start + offset + step * i` for `i in 0..length / step`.
//! The default covers every odd number from 10001 to 19999.

use std::fmt;

use crate::error::ConfigError;

/// Default first value of the range (exclusive when `offset > 0`).
pub const DEFAULT_START: i64 = 10_000;

/// Default span of the range.
pub const DEFAULT_LENGTH: i64 = 10_000;

/// Default distance between candidates.
pub const DEFAULT_STEP: i64 = 2;

/// Default offset of the first candidate from `start`.
pub const DEFAULT_OFFSET: i64 = 1;

/// Parameters describing which integers are tested for primality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeConfig {
    /// Base value of the range.
    pub start: i64,

    /// Span covered from `start`.
    pub length: i64,

    /// Distance between consecutive candidates.
    pub step: i64,

    /// Offset of the first candidate from `start`.
    pub offset: i64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            length: DEFAULT_LENGTH,
            step: DEFAULT_STEP,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl RangeConfig {
    /// Create a range config, validating `step` and `length`.
    pub fn new(start: i64, length: i64, step: i64, offset: i64) -> Result<Self, ConfigError> {
        let config = Self {
            start,
            length,
            step,
            offset,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the range can be iterated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step < 1 {
            return Err(ConfigError::InvalidRange(format!(
                "step must be at least 1, got {}",
                self.step
            )));
        }
        if self.length < 0 {
            return Err(ConfigError::InvalidRange(format!(
                "length must not be negative, got {}",
                self.length
            )));
        }
        if self.last_candidate().is_none() && self.candidate_count() > 0 {
            return Err(ConfigError::InvalidRange(
                "range overflows a 64-bit integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of candidates the range yields.
    pub fn candidate_count(&self) -> u64 {
        if self.step < 1 || self.length < 0 {
            return 0;
        }
        (self.length / self.step) as u64
    }

    /// First candidate, if the range is non-empty.
    pub fn first_candidate(&self) -> Option<i64> {
        if self.candidate_count() == 0 {
            return None;
        }
        self.start.checked_add(self.offset)
    }

    /// Last candidate, if the range is non-empty and does not overflow.
    pub fn last_candidate(&self) -> Option<i64> {
        let count = self.candidate_count();
        if count == 0 {
            return None;
        }
        let span = self.step.checked_mul(count as i64 - 1)?;
        self.start.checked_add(self.offset)?.checked_add(span)
    }

    /// Iterate candidates in increasing order.
    ///
    /// Iteration stops at the first candidate that would overflow `i64`, so
    /// an unvalidated range yields a truncated sequence rather than panicking.
    pub fn candidates(&self) -> impl Iterator<Item = i64> + '_ {
        let base = self.start.checked_add(self.offset);
        (0..self.candidate_count() as i64)
            .map_while(move |i| base?.checked_add(self.step.checked_mul(i)?))
    }
}

impl fmt::Display for RangeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first_candidate(), self.last_candidate()) {
            (Some(first), Some(last)) => write!(f, "[{}, {}] step {}", first, last, self.step),
            _ => write!(f, "empty range from {}", self.start),
        }
    }
}
