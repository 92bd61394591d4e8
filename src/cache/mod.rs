//! Cache module for storing the last forecast document on disk
//!
//! The cached document is replayed at startup so the last known forecast can
//! be shown before, or without, a network fetch. Reads are best-effort: a
//! missing or corrupt entry is simply "no cached data".

mod manager;

pub use manager::CacheManager;
