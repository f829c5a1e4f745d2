#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bucket_array;

/// The prime capacity sequence tables resize along.
pub mod capacity;

/// Load factor thresholds and the capacity sequence, bundled as a resize
/// policy.
pub mod config;

/// The crate's error type.
pub mod error;

/// A keyed map over [`HashTable`].
///
/// This module provides a `HashMap` that hashes keys with a configurable
/// `BuildHasher` and exposes strict insert, update and remove operations.
pub mod hash_map;

/// The raw table: values addressed by a caller-supplied hash and equality
/// predicate.
pub mod hash_table;

pub use capacity::CapacitySequence;
pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use hash_map::HashMap;
#[cfg(feature = "stats")]
pub use hash_table::DebugStats;
pub use hash_table::HashTable;
#[cfg(feature = "stats")]
pub use hash_table::ProbeHistogram;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder [`HashMap`] uses unless told otherwise.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder [`HashMap`] uses unless told otherwise.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// Placeholder hasher builder for `no_std` builds without `foldhash`.
        ///
        /// It cannot be constructed: pass a hasher builder to
        /// [`HashMap::with_hasher`] instead.
        #[derive(Clone, Copy, Debug)]
        pub enum DefaultHashBuilder {}
    }
}
