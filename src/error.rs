use core::fmt;

/// Errors reported by table operations and configuration constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An insert found an equal key already present. The table is unchanged.
    DuplicateKey,
    /// A remove or update named a key that is not present.
    KeyNotFound,
    /// The table needed to grow past the largest configured capacity.
    ///
    /// Under a sane [`Config`](crate::Config) this only happens with custom,
    /// short capacity sequences.
    CapacityExhausted {
        /// The capacity the table was at when growth was refused.
        capacity: usize,
    },
    /// Load factor thresholds must satisfy `0 <= shrink < grow <= 1`.
    InvalidThresholds,
    /// Capacity sequences must be non-empty, start above zero, and be
    /// strictly increasing.
    InvalidCapacitySequence,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateKey => f.write_str("duplicate key"),
            Error::KeyNotFound => f.write_str("key not found"),
            Error::CapacityExhausted { capacity } => {
                write!(f, "cannot grow past the largest capacity ({capacity})")
            }
            Error::InvalidThresholds => {
                f.write_str("load factor thresholds must satisfy 0 <= shrink < grow <= 1")
            }
            Error::InvalidCapacitySequence => f.write_str(
                "capacity sequence must be non-empty, non-zero and strictly increasing",
            ),
        }
    }
}

impl core::error::Error for Error {}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
