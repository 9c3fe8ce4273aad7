// crates/trustnet-core/src/lib.rs
//
// trustnet-core: Core types, store traits, and error type for Trustnet.
//
// This is the leaf crate that every other crate in the workspace depends on.
// It defines participants, trust categories, vote records, the category
// filter used to scope vote queries, and the read/write store interfaces
// the scoring engine is written against.

pub mod category;
pub mod error;
pub mod identity;
pub mod traits;
pub mod vote;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use trustnet_core::Category;`

pub use category::{Category, CategoryFilter, CategoryKind, CategoryType, GENERAL_CATEGORY};
pub use error::TrustError;
pub use identity::ParticipantId;
pub use traits::{VoteReader, VoteStore};
pub use vote::{OutgoingVote, VoteRecord};
