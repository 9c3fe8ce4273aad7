// crates/trustnet-core/src/identity.rs
//
// Participant identity as seen by the scoring engine.
//
// Account records, credentials, and service connections live in the
// identity subsystem; the engine only ever handles the resolved integer id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque integer identifier of a vote-graph participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

impl ParticipantId {
    /// Return the raw integer id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ParticipantId {
    fn from(id: u64) -> Self {
        ParticipantId(id)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
