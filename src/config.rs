use crate::capacity::CapacitySequence;
use crate::error::Error;
use crate::error::Result;

const DEFAULT_GROW_THRESHOLD: f64 = 0.5;
const DEFAULT_SHRINK_THRESHOLD: f64 = 0.1;

/// Resize policy for a table: the load factor thresholds and the capacities
/// it may step through.
///
/// A table grows before an insert that would bring `len / capacity` up to
/// `grow_threshold`, and shrinks after a remove that brings it down to
/// `shrink_threshold` or below (except at the floor capacity, which is never
/// left). The defaults are `0.5` and `0.1` over [`CapacitySequence::PRIMES`].
///
/// # Examples
///
/// ```rust
/// use probe_hash::Config;
///
/// let config = Config::new(0.75, 0.2).unwrap();
/// assert_eq!(config.grow_threshold(), 0.75);
///
/// assert!(Config::new(0.2, 0.75).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    grow_threshold: f64,
    shrink_threshold: f64,
    capacities: CapacitySequence,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grow_threshold: DEFAULT_GROW_THRESHOLD,
            shrink_threshold: DEFAULT_SHRINK_THRESHOLD,
            capacities: CapacitySequence::PRIMES,
        }
    }
}

impl Config {
    /// Creates a policy with the given thresholds and the default capacity
    /// sequence.
    ///
    /// Fails with [`Error::InvalidThresholds`] unless
    /// `0 <= shrink_threshold < grow_threshold <= 1`.
    pub fn new(grow_threshold: f64, shrink_threshold: f64) -> Result<Self> {
        // Written so that NaN fails every comparison.
        let valid = shrink_threshold >= 0.0
            && shrink_threshold < grow_threshold
            && grow_threshold <= 1.0;
        if !valid {
            return Err(Error::InvalidThresholds);
        }

        Ok(Self {
            grow_threshold,
            shrink_threshold,
            capacities: CapacitySequence::PRIMES,
        })
    }

    /// Replaces the capacity sequence.
    pub fn with_capacities(mut self, capacities: CapacitySequence) -> Self {
        self.capacities = capacities;
        self
    }

    /// Load factor at or above which the table must grow.
    pub fn grow_threshold(&self) -> f64 {
        self.grow_threshold
    }

    /// Load factor at or below which the table shrinks.
    pub fn shrink_threshold(&self) -> f64 {
        self.shrink_threshold
    }

    /// The capacities the table steps through.
    pub fn capacities(&self) -> CapacitySequence {
        self.capacities
    }

    /// Smallest element count whose load factor reaches the grow threshold
    /// at `capacity`. Always at least 1 and at most `capacity`.
    #[inline]
    pub(crate) fn grow_at(&self, capacity: usize) -> usize {
        let limit = ceil(self.grow_threshold * capacity as f64) as usize;
        limit.clamp(1, capacity)
    }

    /// Largest element count whose load factor is at or below the shrink
    /// threshold at `capacity`.
    #[inline]
    pub(crate) fn shrink_at(&self, capacity: usize) -> usize {
        (self.shrink_threshold * capacity as f64) as usize
    }
}

// `f64::ceil` needs std. Inputs are non-negative.
#[inline]
fn ceil(x: f64) -> f64 {
    let truncated = x as u64 as f64;
    if truncated < x { truncated + 1.0 } else { truncated }
}
