// crates/trustnet-store/tests/rocks_store.rs
//
// Integration tests for the RocksDB vote store: persistence of categories
// and vote counters, filtered outgoing-vote scans, and snapshot isolation.

use uuid::Uuid;

use trustnet_core::category::{CategoryFilter, CategoryKind};
use trustnet_core::error::TrustError;
use trustnet_core::identity::ParticipantId;
use trustnet_core::traits::{VoteReader, VoteStore};
use trustnet_core::vote::OutgoingVote;
use trustnet_store::{seed_default_categories, RocksVoteStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a temporary directory path using UUID to avoid conflicts.
fn temp_db_path(label: &str) -> String {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("trustnet_test_{}_{}", label, Uuid::now_v7()));
    path.to_string_lossy().to_string()
}

fn open_seeded(label: &str) -> RocksVoteStore {
    let store = RocksVoteStore::open(&temp_db_path(label)).expect("open store");
    seed_default_categories(&store).expect("seed categories");
    store
}

fn p(id: u64) -> ParticipantId {
    ParticipantId(id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn categories_round_trip_through_rocksdb() {
    let store = open_seeded("categories");
    let names: Vec<String> = store
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names.len(), 5);
    assert!(names.contains(&"general".to_string()));

    let snapshot = store.snapshot().unwrap();
    let cat = snapshot
        .category_lookup("agi safety ecosystem development")
        .unwrap()
        .unwrap();
    assert_eq!(
        cat.kind,
        CategoryKind::Secondary {
            parent: "agi safety research".to_string()
        }
    );
    assert!(cat.description.is_some());
    assert!(snapshot.category_lookup("does-not-exist").unwrap().is_none());
}

#[test]
fn cast_vote_persists_counters() {
    let path = temp_db_path("persist");
    {
        let store = RocksVoteStore::open(&path).unwrap();
        seed_default_categories(&store).unwrap();
        assert_eq!(store.cast_vote(p(1), p(2), "general", 3).unwrap(), 3);
        assert_eq!(store.cast_vote(p(1), p(2), "general", 2).unwrap(), 5);
    }
    let reopened = RocksVoteStore::open(&path).unwrap();
    assert_eq!(reopened.vote_count(p(1), p(2), Some("general")).unwrap(), 5);
}

#[test]
fn invalid_votes_are_rejected() {
    let store = open_seeded("invalid");
    assert!(matches!(
        store.cast_vote(p(1), p(1), "general", 1),
        Err(TrustError::InvalidVote(_))
    ));
    assert!(matches!(
        store.cast_vote(p(1), p(2), "no such flavor", 1),
        Err(TrustError::CategoryNotFound(_))
    ));
    store.cast_vote(p(1), p(2), "general", 1).unwrap();
    assert!(matches!(
        store.cast_vote(p(1), p(2), "general", -2),
        Err(TrustError::NegativeTrust { .. })
    ));
    assert_eq!(store.vote_count(p(1), p(2), Some("general")).unwrap(), 1);
}

#[test]
fn outgoing_votes_scan_only_the_voter() {
    let store = open_seeded("outgoing");
    store.cast_vote(p(1), p(2), "general", 1).unwrap();
    store.cast_vote(p(1), p(3), "agi safety research", 4).unwrap();
    store.cast_vote(p(10), p(2), "general", 7).unwrap();
    store.cast_vote(p(11), p(1), "general", 9).unwrap();

    let snapshot = store.snapshot().unwrap();
    let mut all = snapshot.outgoing_votes(p(1), &CategoryFilter::All).unwrap();
    all.sort_by_key(|v| v.to);
    assert_eq!(
        all,
        vec![
            OutgoingVote { to: p(2), count: 1 },
            OutgoingVote { to: p(3), count: 4 },
        ]
    );

    let research = snapshot
        .outgoing_votes(p(1), &CategoryFilter::only(["agi safety research"]))
        .unwrap();
    assert_eq!(research, vec![OutgoingVote { to: p(3), count: 4 }]);
}

#[test]
fn vote_count_sums_across_categories() {
    let store = open_seeded("count");
    store.cast_vote(p(1), p(2), "general", 2).unwrap();
    store.cast_vote(p(1), p(2), "bounty ecosystem participation", 5).unwrap();
    assert_eq!(store.vote_count(p(1), p(2), None).unwrap(), 7);
    assert_eq!(
        store
            .vote_count(p(1), p(2), Some("bounty ecosystem participation"))
            .unwrap(),
        5
    );
}

#[test]
fn snapshot_does_not_see_later_votes() {
    let store = open_seeded("snapshot");
    store.cast_vote(p(1), p(2), "general", 1).unwrap();

    let snapshot = store.snapshot().unwrap();
    store.cast_vote(p(1), p(2), "general", 10).unwrap();
    store.cast_vote(p(1), p(3), "general", 1).unwrap();

    assert_eq!(
        snapshot.direct_vote_count(p(1), p(2), "general").unwrap(),
        Some(1)
    );
    let votes = snapshot.outgoing_votes(p(1), &CategoryFilter::All).unwrap();
    assert_eq!(votes, vec![OutgoingVote { to: p(2), count: 1 }]);

    let fresh = store.snapshot().unwrap();
    assert_eq!(
        fresh.direct_vote_count(p(1), p(2), "general").unwrap(),
        Some(11)
    );
}
