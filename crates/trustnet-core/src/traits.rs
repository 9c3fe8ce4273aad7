// crates/trustnet-core/src/traits.rs

use crate::category::{Category, CategoryFilter};
use crate::error::TrustError;
use crate::identity::ParticipantId;
use crate::vote::OutgoingVote;

/// Read-only view of the vote graph, consistent for its whole lifetime.
///
/// This is the only interface the scoring engine reads through. One
/// computation uses one reader, so every query in it sees the same votes.
pub trait VoteReader {
    /// Look up a category by name. `Ok(None)` when it does not exist.
    fn category_lookup(&self, name: &str) -> Result<Option<Category>, TrustError>;

    /// All votes cast by `from` in categories matching `filter`.
    ///
    /// The same destination may appear more than once.
    fn outgoing_votes(
        &self,
        from: ParticipantId,
        filter: &CategoryFilter,
    ) -> Result<Vec<OutgoingVote>, TrustError>;

    /// The votes `from` cast directly for `to` in exactly `category`.
    ///
    /// Returns `None` when no vote row exists. Duplicate rows are summed.
    fn direct_vote_count(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        category: &str,
    ) -> Result<Option<u64>, TrustError> {
        let filter = CategoryFilter::only([category]);
        let total = self
            .outgoing_votes(from, &filter)?
            .into_iter()
            .filter(|vote| vote.to == to)
            .map(|vote| vote.count)
            .reduce(|a, b| a + b);
        Ok(total)
    }
}

impl<R: VoteReader + ?Sized> VoteReader for &R {
    fn category_lookup(&self, name: &str) -> Result<Option<Category>, TrustError> {
        (**self).category_lookup(name)
    }

    fn outgoing_votes(
        &self,
        from: ParticipantId,
        filter: &CategoryFilter,
    ) -> Result<Vec<OutgoingVote>, TrustError> {
        (**self).outgoing_votes(from, filter)
    }

    fn direct_vote_count(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        category: &str,
    ) -> Result<Option<u64>, TrustError> {
        (**self).direct_vote_count(from, to, category)
    }
}

/// Persistent vote storage.
///
/// Implemented by trustnet-store (RocksDB and in-memory backends).
/// Concurrency control for writes is the store's own business; readers
/// only ever go through a [`VoteStore::snapshot`].
pub trait VoteStore: Send + Sync {
    /// Consistent read view handed to the scoring engine.
    type Snapshot<'a>: VoteReader
    where
        Self: 'a;

    /// Take a consistent snapshot of categories and votes.
    fn snapshot(&self) -> Result<Self::Snapshot<'_>, TrustError>;

    /// Create or replace a category definition.
    fn put_category(&self, category: &Category) -> Result<(), TrustError>;

    /// All known categories, ordered by name.
    fn list_categories(&self) -> Result<Vec<Category>, TrustError>;

    /// Add `amount` (may be negative) to the votes `from` cast for `to`.
    ///
    /// Returns the new count. Rejects self-votes, unknown categories, and
    /// adjustments that would leave a negative count.
    fn cast_vote(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        category: &str,
        amount: i64,
    ) -> Result<u64, TrustError>;

    /// How many times `from` voted for `to`, in one category or in all of
    /// them when `category` is `None`. This is a raw count, not a score.
    fn vote_count(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        category: Option<&str>,
    ) -> Result<u64, TrustError>;
}

/// Validate a vote adjustment and compute the resulting count.
///
/// Shared by the store implementations so they reject the same inputs.
pub fn apply_vote_amount(
    from: ParticipantId,
    to: ParticipantId,
    current: u64,
    amount: i64,
) -> Result<u64, TrustError> {
    if from == to {
        return Err(TrustError::InvalidVote(format!(
            "participant {} cannot vote for themselves",
            from
        )));
    }
    let next = i128::from(current) + i128::from(amount);
    if next < 0 {
        return Err(TrustError::NegativeTrust { current, amount });
    }
    u64::try_from(next)
        .map_err(|_| TrustError::InvalidVote(format!("vote count overflow: {}", next)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_vote_rejected() {
        let err = apply_vote_amount(ParticipantId(1), ParticipantId(1), 0, 1).unwrap_err();
        assert!(matches!(err, TrustError::InvalidVote(_)));
    }

    #[test]
    fn negative_result_rejected() {
        let err = apply_vote_amount(ParticipantId(1), ParticipantId(2), 3, -4).unwrap_err();
        assert!(matches!(
            err,
            TrustError::NegativeTrust {
                current: 3,
                amount: -4
            }
        ));
    }

    #[test]
    fn decrement_to_zero_allowed() {
        assert_eq!(
            apply_vote_amount(ParticipantId(1), ParticipantId(2), 3, -3).unwrap(),
            0
        );
    }

    #[test]
    fn increment_adds() {
        assert_eq!(
            apply_vote_amount(ParticipantId(1), ParticipantId(2), 5, 2).unwrap(),
            7
        );
    }
}
