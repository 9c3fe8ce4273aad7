// crates/trustnet-reputation/src/trust_matrix.rs
//
// Trust matrix: M[target][source] = share of `source`'s filtered votes that
// went to `target`.
//
// Each column is one voter's outgoing votes normalized by that voter's total,
// so a column sums to 1.0 (or to 0.0 for a voter who cast nothing). Two
// structural rules are applied after filling: the viewer's row is zeroed so
// no trust flows back into the viewer, and the diagonal is zeroed so nobody
// trusts themselves.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use trustnet_core::category::CategoryFilter;
use trustnet_core::error::TrustError;
use trustnet_core::identity::ParticipantId;
use trustnet_core::traits::VoteReader;

use crate::index::ParticipantIndex;
use crate::network::Network;

/// A dense N x N matrix of non-negative trust weights, row = target,
/// column = source.
#[derive(Debug, Clone, PartialEq)]
pub struct TrustMatrix {
    n: usize,
    /// Row-major cells: cells[row * n + col].
    cells: Vec<f64>,
}

impl TrustMatrix {
    /// Create a zero-initialized N x N matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            cells: vec![0.0; n * n],
        }
    }

    /// Number of rows (and columns).
    pub fn dimension(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.n + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.cells[row * self.n + col] = value;
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row * self.n..(row + 1) * self.n]
    }

    /// Set every entry of `row` to zero.
    pub fn zero_row(&mut self, row: usize) {
        let n = self.n;
        self.cells[row * n..(row + 1) * n].fill(0.0);
    }

    /// Set every diagonal entry to zero.
    pub fn zero_diagonal(&mut self) {
        for i in 0..self.n {
            self.set(i, i, 0.0);
        }
    }

    /// Matrix-vector product `M . v`.
    pub fn multiply(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.n);
        (0..self.n)
            .map(|row| {
                self.row(row)
                    .iter()
                    .zip(v)
                    .map(|(weight, value)| weight * value)
                    .sum()
            })
            .collect()
    }
}

/// Raw vote volume seen while building the matrix, used to scale scores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    /// Sum of every filtered vote cast by every processed network member.
    pub total_votes: u64,
    cast_by: HashMap<ParticipantId, u64>,
}

impl VoteTally {
    /// Filtered votes cast by `participant` (0 if it was not processed).
    pub fn votes_cast_by(&self, participant: ParticipantId) -> u64 {
        self.cast_by.get(&participant).copied().unwrap_or(0)
    }

    /// `total_votes` minus the votes `participant` cast itself.
    pub fn votes_excluding(&self, participant: ParticipantId) -> u64 {
        self.total_votes
            .saturating_sub(self.votes_cast_by(participant))
    }
}

/// Build the trust matrix and vote tally for one computation.
///
/// The target's own outgoing votes are never queried. Duplicate vote rows
/// for the same destination are summed. When the network was truncated at
/// its size cap, votes to participants outside it still count toward the
/// voter's total but get no matrix entry.
pub fn build_trust_matrix<R: VoteReader + ?Sized>(
    reader: &R,
    network: &Network,
    index: &ParticipantIndex,
    target: ParticipantId,
    filter: &CategoryFilter,
) -> Result<(TrustMatrix, VoteTally), TrustError> {
    let mut matrix = TrustMatrix::zeros(index.len());
    let mut tally = VoteTally::default();

    for (col, voter) in index.iter() {
        if voter == target {
            continue;
        }

        let mut merged: BTreeMap<ParticipantId, u64> = BTreeMap::new();
        for vote in reader.outgoing_votes(voter, filter)? {
            *merged.entry(vote.to).or_insert(0) += vote.count;
        }
        let total: u64 = merged.values().sum();
        tally.total_votes += total;
        *tally.cast_by.entry(voter).or_insert(0) += total;

        if total == 0 {
            continue;
        }
        for (to, count) in merged {
            if network.truncated() && index.get(to).is_none() {
                continue;
            }
            let row = index.index_of(to);
            matrix.set(row, col, count as f64 / total as f64);
        }
    }

    // Trust never flows back into the viewer, and nobody trusts themselves.
    matrix.zero_row(0);
    matrix.zero_diagonal();

    debug!(
        size = index.len(),
        total_votes = tally.total_votes,
        "trust matrix built"
    );
    Ok((matrix, tally))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::discover_network;
    use trustnet_core::category::Category;
    use trustnet_core::traits::VoteStore;
    use trustnet_core::vote::VoteRecord;
    use trustnet_store::InMemoryVoteStore;

    fn p(id: u64) -> ParticipantId {
        ParticipantId(id)
    }

    fn row(from: u64, to: u64, count: u64) -> VoteRecord {
        VoteRecord {
            from: p(from),
            to: p(to),
            category: "general".to_string(),
            count,
        }
    }

    fn store_with(rows: &[(u64, u64, u64)]) -> InMemoryVoteStore {
        let store = InMemoryVoteStore::with_categories([Category::general("general")]);
        for &(from, to, count) in rows {
            store.insert_row(row(from, to, count)).unwrap();
        }
        store
    }

    fn build(
        store: &InMemoryVoteStore,
        viewer: u64,
        target: u64,
    ) -> (TrustMatrix, VoteTally, ParticipantIndex) {
        let snapshot = store.snapshot().unwrap();
        let network =
            discover_network(&snapshot, p(viewer), Some(p(target)), &CategoryFilter::All, 100)
                .unwrap();
        let index = ParticipantIndex::build(&network, p(viewer));
        let (matrix, tally) =
            build_trust_matrix(&snapshot, &network, &index, p(target), &CategoryFilter::All)
                .unwrap();
        (matrix, tally, index)
    }

    #[test]
    fn multiply_matches_hand_computation() {
        let mut m = TrustMatrix::zeros(2);
        m.set(0, 0, 1.0);
        m.set(0, 1, 2.0);
        m.set(1, 0, 3.0);
        m.set(1, 1, 4.0);
        assert_eq!(m.multiply(&[1.0, 1.0]), vec![3.0, 7.0]);
        assert_eq!(m.multiply(&[2.0, 0.5]), vec![3.0, 8.0]);
    }

    #[test]
    fn columns_are_normalized_by_voter_total() {
        let store = store_with(&[(1, 2, 1), (1, 3, 3), (2, 3, 2)]);
        let (m, tally, index) = build(&store, 1, 4);
        let (i1, i2, i3) = (index.index_of(p(1)), index.index_of(p(2)), index.index_of(p(3)));
        assert!((m.get(i2, i1) - 0.25).abs() < 1e-12);
        assert!((m.get(i3, i1) - 0.75).abs() < 1e-12);
        assert!((m.get(i3, i2) - 1.0).abs() < 1e-12);
        assert_eq!(tally.total_votes, 6);
        assert_eq!(tally.votes_cast_by(p(1)), 4);
        assert_eq!(tally.votes_cast_by(p(2)), 2);
        assert_eq!(tally.votes_excluding(p(1)), 2);
    }

    #[test]
    fn viewer_row_and_diagonal_are_zero() {
        // Everyone votes for the viewer, and 2 has a stray self-vote row.
        let store = store_with(&[(1, 2, 1), (2, 1, 5), (2, 2, 5), (2, 3, 1), (3, 1, 2), (3, 2, 1)]);
        let (m, _, index) = build(&store, 1, 4);
        let n = m.dimension();
        assert_eq!(n, index.len());
        assert!(m.row(0).iter().all(|&w| w == 0.0));
        for i in 0..n {
            assert_eq!(m.get(i, i), 0.0);
        }
    }

    #[test]
    fn target_column_is_empty() {
        let store = store_with(&[(1, 2, 1), (2, 3, 1), (2, 1, 4), (2, 4, 1)]);
        let (m, tally, index) = build(&store, 1, 2);
        let col = index.index_of(p(2));
        for r in 0..m.dimension() {
            assert_eq!(m.get(r, col), 0.0);
        }
        // Votes cast by the target are not tallied.
        assert_eq!(tally.votes_cast_by(p(2)), 0);
        assert_eq!(tally.total_votes, 1);
    }

    #[test]
    fn duplicate_rows_are_summed() {
        let store = store_with(&[(1, 2, 1), (1, 2, 2), (1, 3, 1)]);
        let (m, tally, index) = build(&store, 1, 9);
        let (i2, i3) = (index.index_of(p(2)), index.index_of(p(3)));
        assert!((m.get(i2, 0) - 0.75).abs() < 1e-12);
        assert!((m.get(i3, 0) - 0.25).abs() < 1e-12);
        assert_eq!(tally.total_votes, 4);
    }

    #[test]
    fn zero_vote_voter_contributes_nothing() {
        let store = store_with(&[(1, 2, 0), (1, 3, 2)]);
        let (m, tally, index) = build(&store, 1, 9);
        // 2 is reached through a zero-count row and casts nothing itself.
        let i2 = index.index_of(p(2));
        assert_eq!(m.get(i2, 0), 0.0);
        assert!(m.row(0).iter().all(|&w| w == 0.0));
        for r in 0..m.dimension() {
            assert_eq!(m.get(r, i2), 0.0);
        }
        assert_eq!(tally.total_votes, 2);
    }

    #[test]
    fn truncated_network_drops_outside_destinations() {
        let store = store_with(&[(1, 2, 1), (1, 3, 1), (1, 4, 2)]);
        let snapshot = store.snapshot().unwrap();
        let network =
            discover_network(&snapshot, p(1), Some(p(9)), &CategoryFilter::All, 2).unwrap();
        assert!(network.truncated());
        let index = ParticipantIndex::build(&network, p(1));
        let (m, tally) =
            build_trust_matrix(&snapshot, &network, &index, p(9), &CategoryFilter::All).unwrap();
        assert_eq!(m.dimension(), 2);
        assert!((m.get(1, 0) - 0.25).abs() < 1e-12);
        assert_eq!(tally.total_votes, 4);
    }
}
