use crate::error::Error;
use crate::error::Result;

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        const PRIMES: &[usize] = &[
            7, 11, 17, 37, 67, 131, 257, 521, 1031, 2053, 4099, 8209, 16411, 32771, 65537, 131101,
            262147, 524309, 1048583, 2097169, 4194319, 8388617, 16777259, 33554467, 67108879,
            134217757, 268435459, 536870923, 1073741827, 2147483659, 4294967311, 8589934609,
            17179869209, 34359738421, 68719476767, 137438953481, 274877906951, 549755813911,
            1099511627791,
        ];
    } else if #[cfg(target_pointer_width = "32")] {
        const PRIMES: &[usize] = &[
            7, 11, 17, 37, 67, 131, 257, 521, 1031, 2053, 4099, 8209, 16411, 32771, 65537, 131101,
            262147, 524309, 1048583, 2097169, 4194319, 8388617, 16777259, 33554467, 67108879,
            134217757, 268435459, 536870923, 1073741827, 2147483659,
        ];
    } else {
        const PRIMES: &[usize] = &[7, 11, 17, 37, 67, 131, 257, 521, 1031, 2053, 4099, 8209, 16411];
    }
}

/// The ordered list of bucket array sizes a table steps through as it
/// grows and shrinks.
///
/// The table only ever allocates capacities from this list; its cursor moves
/// one position up on growth and down on shrinkage. The default sequence,
/// [`CapacitySequence::PRIMES`], starts at 7 and continues with the first
/// prime above each power of two, so every step roughly doubles or halves
/// the table while keeping `hash % capacity` well distributed.
///
/// # Examples
///
/// ```rust
/// use probe_hash::CapacitySequence;
///
/// let primes = CapacitySequence::PRIMES;
/// assert_eq!(primes.floor(), 7);
/// assert_eq!(primes.get(1), Some(11));
///
/// static SMALL: [usize; 3] = [5, 11, 23];
/// let small = CapacitySequence::new(&SMALL).unwrap();
/// assert_eq!(small.last_index(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacitySequence {
    capacities: &'static [usize],
}

impl CapacitySequence {
    /// Primes just above successive powers of two, starting at 7.
    pub const PRIMES: Self = Self { capacities: PRIMES };

    /// Wraps a custom sequence.
    ///
    /// Fails with [`Error::InvalidCapacitySequence`] unless the slice is
    /// non-empty, starts above zero and is strictly increasing.
    pub fn new(capacities: &'static [usize]) -> Result<Self> {
        let valid = capacities.first().is_some_and(|&floor| floor > 0)
            && capacities.windows(2).all(|w| w[0] < w[1]);
        if !valid {
            return Err(Error::InvalidCapacitySequence);
        }

        Ok(Self { capacities })
    }

    /// The capacity at `index`, if the sequence is that long.
    #[inline]
    pub fn get(&self, index: usize) -> Option<usize> {
        self.capacities.get(index).copied()
    }

    /// The smallest capacity, used for new and emptied tables.
    #[inline]
    pub fn floor(&self) -> usize {
        self.capacities[0]
    }

    /// Index of the largest capacity.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.capacities.len() - 1
    }

    /// Number of capacities in the sequence. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.capacities.len()
    }

    /// The underlying capacities.
    pub fn as_slice(&self) -> &'static [usize] {
        self.capacities
    }
}

impl Default for CapacitySequence {
    fn default() -> Self {
        Self::PRIMES
    }
}
