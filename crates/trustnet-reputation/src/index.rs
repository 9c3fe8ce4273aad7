// crates/trustnet-reputation/src/index.rs
//
// Participant indexing: positions 0..N-1 in the trust matrix, viewer at 0.

use std::collections::HashMap;

use trustnet_core::identity::ParticipantId;

use crate::network::Network;

/// Bijection between network members and matrix positions.
///
/// The viewer is always position 0. Everyone else follows in ascending id
/// order; the scores do not depend on that order.
#[derive(Debug, Clone)]
pub struct ParticipantIndex {
    order: Vec<ParticipantId>,
    positions: HashMap<ParticipantId, usize>,
}

impl ParticipantIndex {
    /// Index every member of `network`, placing `viewer` first.
    ///
    /// The viewer is indexed even if the network does not list it.
    pub fn build(network: &Network, viewer: ParticipantId) -> Self {
        let mut order = Vec::with_capacity(network.len());
        order.push(viewer);
        order.extend(network.members().filter(|&member| member != viewer));

        let positions = order
            .iter()
            .enumerate()
            .map(|(idx, &member)| (member, idx))
            .collect();
        Self { order, positions }
    }

    /// Position of `participant`.
    ///
    /// # Panics
    /// Panics if `participant` was never indexed. Asking for a participant
    /// outside the discovered network is a wiring bug in the pipeline, and a
    /// silently wrong score is worse than a failed request.
    pub fn index_of(&self, participant: ParticipantId) -> usize {
        match self.positions.get(&participant) {
            Some(&idx) => idx,
            None => panic!(
                "participant {} not indexed: it is not part of the discovered network",
                participant
            ),
        }
    }

    /// Position of `participant`, if indexed.
    pub fn get(&self, participant: ParticipantId) -> Option<usize> {
        self.positions.get(&participant).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Participants in position order, with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (usize, ParticipantId)> + '_ {
        self.order.iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::discover_network;
    use trustnet_core::category::{Category, CategoryFilter};
    use trustnet_core::traits::VoteStore;
    use trustnet_store::InMemoryVoteStore;

    fn network_of(edges: &[(u64, u64)], viewer: u64) -> Network {
        let store = InMemoryVoteStore::with_categories([Category::general("general")]);
        for &(from, to) in edges {
            store
                .cast_vote(ParticipantId(from), ParticipantId(to), "general", 1)
                .unwrap();
        }
        let snapshot = store.snapshot().unwrap();
        discover_network(&snapshot, ParticipantId(viewer), None, &CategoryFilter::All, 100).unwrap()
    }

    #[test]
    fn viewer_is_position_zero() {
        let network = network_of(&[(3, 1), (3, 2), (3, 4)], 3);
        let index = ParticipantIndex::build(&network, ParticipantId(3));
        assert_eq!(index.len(), 4);
        assert_eq!(index.index_of(ParticipantId(3)), 0);
        assert_eq!(index.index_of(ParticipantId(1)), 1);
        assert_eq!(index.index_of(ParticipantId(2)), 2);
        assert_eq!(index.index_of(ParticipantId(4)), 3);
    }

    #[test]
    fn positions_are_a_bijection() {
        let network = network_of(&[(1, 9), (9, 5), (5, 7), (7, 1)], 1);
        let index = ParticipantIndex::build(&network, ParticipantId(1));
        let mut seen: Vec<usize> = index.iter().map(|(idx, _)| idx).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
        for (idx, member) in index.iter() {
            assert_eq!(index.index_of(member), idx);
        }
    }

    #[test]
    fn unknown_participant_get_is_none() {
        let network = network_of(&[(1, 2)], 1);
        let index = ParticipantIndex::build(&network, ParticipantId(1));
        assert_eq!(index.get(ParticipantId(42)), None);
    }

    #[test]
    #[should_panic(expected = "participant 42 not indexed")]
    fn unknown_participant_index_of_panics() {
        let network = network_of(&[(1, 2), (2, 3), (3, 4)], 1);
        let index = ParticipantIndex::build(&network, ParticipantId(1));
        index.index_of(ParticipantId(42));
    }
}
