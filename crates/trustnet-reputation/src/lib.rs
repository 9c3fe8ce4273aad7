// crates/trustnet-reputation/src/lib.rs
//
// trustnet-reputation: Personalized trust scoring for Trustnet.
//
// Answers "how much should viewer V trust target T in category C" using only
// the part of the vote graph reachable from V. The pipeline runs once per
// request against a single store snapshot:
//
//   category -> network -> index -> trust_matrix -> solver -> finalize
//
// `engine` wires the stages together.

pub mod category;
pub mod config;
pub mod engine;
pub mod finalize;
pub mod index;
pub mod network;
pub mod solver;
pub mod trust_matrix;

pub use category::{resolve_category, ResolvedCategory};
pub use config::EngineConfig;
pub use engine::{compute_score, evaluate, ScoreReport, TrustEngine};
