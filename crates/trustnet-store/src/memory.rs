// crates/trustnet-store/src/memory.rs
//
// In-memory vote store.
//
// Keeps raw vote rows rather than merged counters so that callers can
// reproduce duplicate (from, to, category) rows and check that readers sum
// them. A snapshot holds the read lock for its whole lifetime, which is what
// makes every query of one computation see the same state.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use trustnet_core::category::{Category, CategoryFilter};
use trustnet_core::error::TrustError;
use trustnet_core::identity::ParticipantId;
use trustnet_core::traits::{apply_vote_amount, VoteReader, VoteStore};
use trustnet_core::vote::{OutgoingVote, VoteRecord};

#[derive(Debug, Default)]
struct MemoryState {
    categories: BTreeMap<String, Category>,
    rows: Vec<VoteRecord>,
}

/// A `VoteStore` that lives entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryVoteStore {
    state: RwLock<MemoryState>,
}

impl InMemoryVoteStore {
    /// Create an empty store with no categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given categories.
    pub fn with_categories<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        let state = MemoryState {
            categories: categories
                .into_iter()
                .map(|c| (c.name.clone(), c))
                .collect(),
            rows: Vec::new(),
        };
        Self {
            state: RwLock::new(state),
        }
    }

    /// Append a raw vote row without merging it into an existing counter.
    ///
    /// Bypasses every validation `cast_vote` performs.
    pub fn insert_row(&self, record: VoteRecord) -> Result<(), TrustError> {
        self.write()?.rows.push(record);
        Ok(())
    }

    /// Number of raw rows currently stored.
    pub fn row_count(&self) -> Result<usize, TrustError> {
        Ok(self.read()?.rows.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>, TrustError> {
        self.state
            .read()
            .map_err(|_| TrustError::Storage("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>, TrustError> {
        self.state
            .write()
            .map_err(|_| TrustError::Storage("in-memory store lock poisoned".to_string()))
    }
}

impl VoteStore for InMemoryVoteStore {
    type Snapshot<'a> = MemorySnapshot<'a>;

    fn snapshot(&self) -> Result<MemorySnapshot<'_>, TrustError> {
        Ok(MemorySnapshot { state: self.read()? })
    }

    fn put_category(&self, category: &Category) -> Result<(), TrustError> {
        self.write()?
            .categories
            .insert(category.name.clone(), category.clone());
        Ok(())
    }

    fn list_categories(&self) -> Result<Vec<Category>, TrustError> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    fn cast_vote(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        category: &str,
        amount: i64,
    ) -> Result<u64, TrustError> {
        let mut state = self.write()?;
        if !state.categories.contains_key(category) {
            return Err(TrustError::CategoryNotFound(category.to_string()));
        }

        let same_edge =
            |row: &VoteRecord| row.from == from && row.to == to && row.category == category;
        let current: u64 = state
            .rows
            .iter()
            .filter(|row| same_edge(*row))
            .map(|row| row.count)
            .sum();
        let count = apply_vote_amount(from, to, current, amount)?;

        // Collapse any duplicate rows into the single updated counter.
        state.rows.retain(|row| !same_edge(row));
        state.rows.push(VoteRecord {
            from,
            to,
            category: category.to_string(),
            count,
        });
        Ok(count)
    }

    fn vote_count(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        category: Option<&str>,
    ) -> Result<u64, TrustError> {
        let state = self.read()?;
        let total = state
            .rows
            .iter()
            .filter(|row| row.from == from && row.to == to)
            .filter(|row| category.map_or(true, |name| row.category == name))
            .map(|row| row.count)
            .sum();
        Ok(total)
    }
}

/// Read view of an `InMemoryVoteStore`; writers block while it is alive.
pub struct MemorySnapshot<'a> {
    state: RwLockReadGuard<'a, MemoryState>,
}

impl VoteReader for MemorySnapshot<'_> {
    fn category_lookup(&self, name: &str) -> Result<Option<Category>, TrustError> {
        Ok(self.state.categories.get(name).cloned())
    }

    fn outgoing_votes(
        &self,
        from: ParticipantId,
        filter: &CategoryFilter,
    ) -> Result<Vec<OutgoingVote>, TrustError> {
        Ok(self
            .state
            .rows
            .iter()
            .filter(|row| row.from == from && filter.matches(&row.category))
            .map(OutgoingVote::from)
            .collect())
    }
}
