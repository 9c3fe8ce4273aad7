// crates/trustnet-reputation/src/network.rs
//
// Network discovery: the bounded set of participants reachable from a viewer
// through outgoing votes that pass the category filter.
//
// The traversal never expands the target under investigation, so a target
// cannot pull arbitrary participants into its own trust computation by
// voting for them. Expansion order only affects performance, except when
// the size cap truncates the walk.

use std::collections::{BTreeSet, VecDeque};

use tracing::{debug, warn};

use trustnet_core::category::CategoryFilter;
use trustnet_core::error::TrustError;
use trustnet_core::identity::ParticipantId;
use trustnet_core::traits::VoteReader;

/// Participants visible to a viewer for one category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    members: BTreeSet<ParticipantId>,
    truncated: bool,
}

impl Network {
    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.members.contains(&participant)
    }

    /// Number of participants, viewer included. Never zero.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in ascending id order.
    pub fn members(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.members.iter().copied()
    }

    /// Whether a reachable participant was left out because of the size cap.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

/// Walk outgoing votes from `viewer`, visiting at most `limit` participants.
///
/// `target`, when given, is added if reached but never expanded. Hitting the
/// cap is not an error: the result is a truncated, best-effort network.
pub fn discover_network<R: VoteReader + ?Sized>(
    reader: &R,
    viewer: ParticipantId,
    target: Option<ParticipantId>,
    filter: &CategoryFilter,
    limit: usize,
) -> Result<Network, TrustError> {
    let limit = limit.max(1);
    let mut members = BTreeSet::from([viewer]);
    let mut frontier = VecDeque::from([viewer]);
    let mut truncated = false;

    // Nodes popped after the cap is reached are still scanned, so `truncated`
    // is only set when a reachable participant is actually left out.
    'walk: while let Some(node) = frontier.pop_front() {
        if Some(node) == target {
            continue;
        }
        for vote in reader.outgoing_votes(node, filter)? {
            if members.contains(&vote.to) {
                continue;
            }
            if members.len() >= limit {
                truncated = true;
                break 'walk;
            }
            members.insert(vote.to);
            frontier.push_back(vote.to);
        }
    }

    if truncated {
        warn!(%viewer, limit, "network discovery hit the size cap");
    }
    debug!(%viewer, size = members.len(), truncated, "network discovered");

    Ok(Network { members, truncated })
}
