//! Hash collections used across the crate.
//!
//! Keys are small integer newtypes, for which Fx hashing is much faster than
//! the SipHash default.

pub use std::collections::hash_map;

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
