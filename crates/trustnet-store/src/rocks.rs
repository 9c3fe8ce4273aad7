// crates/trustnet-store/src/rocks.rs
//
// RocksDB-backed persistent storage for categories and votes.
//
// Key format:
//   - Category: `category:{name}`                      -> JSON-serialized Category
//   - Vote:     `vote:{from:020}:{to:020}:{category}`  -> JSON-serialized VoteRecord
//
// Zero-padded participant ids keep every vote cast by one participant under
// a single sortable prefix, so outgoing votes are one prefix scan. Reads for
// a score computation go through a RocksDB snapshot.

use std::sync::Mutex;

use rocksdb::{
    DBWithThreadMode, Direction, IteratorMode, MultiThreaded, Options, ReadOptions,
    SnapshotWithThreadMode,
};
use serde::Serialize;
use tracing::{debug, info};

use trustnet_core::category::{Category, CategoryFilter};
use trustnet_core::error::TrustError;
use trustnet_core::identity::ParticipantId;
use trustnet_core::traits::{apply_vote_amount, VoteReader, VoteStore};
use trustnet_core::vote::{OutgoingVote, VoteRecord};

type Db = DBWithThreadMode<MultiThreaded>;

const CATEGORY_PREFIX: &str = "category:";
const VOTE_PREFIX: &str = "vote:";

/// RocksDB wrapper implementing the `VoteStore` trait.
#[derive(Debug)]
pub struct RocksVoteStore {
    db: Db,
    /// Serializes read-modify-write updates of vote counters.
    write_lock: Mutex<()>,
}

impl RocksVoteStore {
    /// Open a RocksDB database at the given filesystem path.
    ///
    /// Creates the database directory if it does not exist.
    pub fn open(path: &str) -> Result<Self, TrustError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = Db::open(&opts, path).map_err(|e| {
            TrustError::Storage(format!("Failed to open RocksDB at {}: {}", path, e))
        })?;
        info!(path, "opened vote store");

        Ok(Self {
            db,
            write_lock: Mutex::new(()),
        })
    }

    /// Put a JSON-serialized value under `key`.
    fn put_json<T: Serialize>(&self, key: &[u8], value: &T) -> Result<(), TrustError> {
        let json = serde_json::to_vec(value)?;
        self.db
            .put(key, json)
            .map_err(|e| TrustError::Storage(format!("RocksDB put failed: {}", e)))
    }

    /// Get raw bytes from RocksDB outside of any snapshot.
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, TrustError> {
        self.db
            .get(key)
            .map_err(|e| TrustError::Storage(format!("RocksDB get failed: {}", e)))
    }
}

impl VoteStore for RocksVoteStore {
    type Snapshot<'a> = RocksSnapshot<'a>;

    fn snapshot(&self) -> Result<RocksSnapshot<'_>, TrustError> {
        Ok(RocksSnapshot {
            db: &self.db,
            snapshot: self.db.snapshot(),
        })
    }

    fn put_category(&self, category: &Category) -> Result<(), TrustError> {
        self.put_json(&category_key(&category.name), category)
    }

    fn list_categories(&self) -> Result<Vec<Category>, TrustError> {
        self.snapshot()?.categories()
    }

    fn cast_vote(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        category: &str,
        amount: i64,
    ) -> Result<u64, TrustError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| TrustError::Storage("vote write lock poisoned".to_string()))?;

        if self.get_raw(&category_key(category))?.is_none() {
            return Err(TrustError::CategoryNotFound(category.to_string()));
        }

        let key = vote_key(from, to, category);
        let current = match self.get_raw(&key)? {
            Some(bytes) => serde_json::from_slice::<VoteRecord>(&bytes)?.count,
            None => 0,
        };
        let count = apply_vote_amount(from, to, current, amount)?;

        let record = VoteRecord {
            from,
            to,
            category: category.to_string(),
            count,
        };
        self.put_json(&key, &record)?;
        debug!(%from, %to, category, count, "vote recorded");
        Ok(count)
    }

    fn vote_count(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        category: Option<&str>,
    ) -> Result<u64, TrustError> {
        let snapshot = self.snapshot()?;
        let total = match category {
            Some(name) => snapshot.direct_vote_count(from, to, name)?.unwrap_or(0),
            None => snapshot
                .outgoing_votes(from, &CategoryFilter::All)?
                .into_iter()
                .filter(|vote| vote.to == to)
                .map(|vote| vote.count)
                .sum(),
        };
        Ok(total)
    }
}

/// A point-in-time view of a `RocksVoteStore`.
///
/// Votes written after the snapshot was taken are invisible to it.
pub struct RocksSnapshot<'a> {
    db: &'a Db,
    snapshot: SnapshotWithThreadMode<'a, Db>,
}

impl RocksSnapshot<'_> {
    fn read_options(&self) -> ReadOptions {
        let mut opts = ReadOptions::default();
        opts.set_snapshot(&self.snapshot);
        opts
    }

    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, TrustError> {
        self.db
            .get_opt(key, &self.read_options())
            .map_err(|e| TrustError::Storage(format!("RocksDB snapshot get failed: {}", e)))
    }

    /// Collect every value whose key starts with `prefix`.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<Box<[u8]>>, TrustError> {
        let iter = self.db.iterator_opt(
            IteratorMode::From(prefix, Direction::Forward),
            self.read_options(),
        );
        let mut values = Vec::new();
        for item in iter {
            let (key, value) = item
                .map_err(|e| TrustError::Storage(format!("RocksDB iteration error: {}", e)))?;
            // Keys are sorted; stop when the prefix no longer matches.
            if !key.starts_with(prefix) {
                break;
            }
            values.push(value);
        }
        Ok(values)
    }

    /// All categories visible in this snapshot, ordered by name.
    pub fn categories(&self) -> Result<Vec<Category>, TrustError> {
        self.scan_prefix(CATEGORY_PREFIX.as_bytes())?
            .iter()
            .map(|bytes| serde_json::from_slice(bytes).map_err(TrustError::from))
            .collect()
    }
}

impl VoteReader for RocksSnapshot<'_> {
    fn category_lookup(&self, name: &str) -> Result<Option<Category>, TrustError> {
        match self.get_raw(&category_key(name))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn outgoing_votes(
        &self,
        from: ParticipantId,
        filter: &CategoryFilter,
    ) -> Result<Vec<OutgoingVote>, TrustError> {
        let mut votes = Vec::new();
        for bytes in self.scan_prefix(&vote_prefix(from))? {
            let record: VoteRecord = serde_json::from_slice(&bytes)?;
            if filter.matches(&record.category) {
                votes.push(OutgoingVote::from(&record));
            }
        }
        Ok(votes)
    }

    fn direct_vote_count(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        category: &str,
    ) -> Result<Option<u64>, TrustError> {
        match self.get_raw(&vote_key(from, to, category))? {
            Some(bytes) => Ok(Some(serde_json::from_slice::<VoteRecord>(&bytes)?.count)),
            None => Ok(None),
        }
    }
}

fn category_key(name: &str) -> Vec<u8> {
    format!("{}{}", CATEGORY_PREFIX, name).into_bytes()
}

fn vote_prefix(from: ParticipantId) -> Vec<u8> {
    format!("{}{:020}:", VOTE_PREFIX, from.get()).into_bytes()
}

fn vote_key(from: ParticipantId, to: ParticipantId, category: &str) -> Vec<u8> {
    format!("{}{:020}:{:020}:{}", VOTE_PREFIX, from.get(), to.get(), category).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_keys_share_the_voter_prefix() {
        let key = vote_key(ParticipantId(12), ParticipantId(7), "general");
        assert!(key.starts_with(&vote_prefix(ParticipantId(12))));
        assert!(!key.starts_with(&vote_prefix(ParticipantId(1))));
        assert_eq!(
            String::from_utf8(key).unwrap(),
            "vote:00000000000000000012:00000000000000000007:general"
        );
    }

    #[test]
    fn category_keys_do_not_collide_with_votes() {
        let key = category_key("vote");
        assert!(key.starts_with(CATEGORY_PREFIX.as_bytes()));
        assert!(!key.starts_with(VOTE_PREFIX.as_bytes()));
    }
}
