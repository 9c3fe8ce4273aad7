use thiserror::Error;

use crate::identity::ParticipantId;

/// Error types shared by the Trustnet crates.
///
/// `CategoryNotFound` and `ParticipantNotInNetwork` are expected outcomes of
/// a score request and are mapped to a score of 0.0 by the engine. Storage
/// and serialization faults are fatal to the request that hit them.
#[derive(Debug, Error)]
pub enum TrustError {
    /// The named trust category does not exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// The target is not reachable from the viewer within the bounded network.
    #[error("Participant {0} is not in the viewer's network")]
    ParticipantNotInNetwork(ParticipantId),

    /// Storage layer error (RocksDB, poisoned lock, snapshot failure).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A vote that can never be valid (e.g. a participant voting for itself).
    #[error("Invalid vote: {0}")]
    InvalidVote(String),

    /// An engine setting is outside the range the pipeline can work with.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A vote adjustment would leave a negative vote count.
    #[error("Cannot have a negative amount of trust: {current} + {amount} < 0")]
    NegativeTrust {
        /// Count stored before the adjustment.
        current: u64,
        /// Requested adjustment.
        amount: i64,
    },
}

impl From<serde_json::Error> for TrustError {
    fn from(e: serde_json::Error) -> Self {
        TrustError::Serialization(e.to_string())
    }
}
