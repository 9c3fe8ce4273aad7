// crates/trustnet-store/src/lib.rs
//
// trustnet-store: Vote storage for Trustnet.
//
// Provides a RocksDB-backed persistent store whose snapshots give the
// scoring engine a consistent view of the vote graph, an in-memory store
// for tests and tooling, and the default category catalogue.

pub mod memory;
pub mod rocks;
pub mod seed;

// Re-export key types for ergonomic access from downstream crates.
pub use memory::{InMemoryVoteStore, MemorySnapshot};
pub use rocks::{RocksSnapshot, RocksVoteStore};
pub use seed::{default_categories, seed_default_categories};
