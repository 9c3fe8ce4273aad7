// crates/trustnet-core/src/vote.rs
//
// Vote records: repeatable positive-integer endorsements scoped to a category.

use serde::{Deserialize, Serialize};

use crate::identity::ParticipantId;

/// A stored vote counter: `from` has voted `count` times for `to` in `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub category: String,
    pub count: u64,
}

/// One outgoing edge as returned by a filtered vote query.
///
/// A query may return several entries for the same destination (one per
/// matching category, or duplicated rows); consumers sum them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutgoingVote {
    pub to: ParticipantId,
    pub count: u64,
}

impl From<&VoteRecord> for OutgoingVote {
    fn from(record: &VoteRecord) -> Self {
        OutgoingVote {
            to: record.to,
            count: record.count,
        }
    }
}
