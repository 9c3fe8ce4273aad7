// crates/trustnet-store/src/seed.rs
//
// Default category catalogue written into a fresh store.

use tracing::info;

use trustnet_core::category::{Category, GENERAL_CATEGORY};
use trustnet_core::error::TrustError;
use trustnet_core::traits::VoteStore;

/// The categories every deployment starts with.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::general(GENERAL_CATEGORY).describe("Trust across every category."),
        Category::normal("agi safety research").describe(
            "Assign this flavor to nodes which have produced research which makes it more likely \
             that humanity will solve the AI control problem, resulting in an aligned \
             superintelligence.",
        ),
        Category::secondary("agi safety ecosystem development", "agi safety research").describe(
            "Assign this flavor to nodes which have provided value to you as a researcher \
             or other researchers by improving the ecosystem (outreach, training, \
             support, conferences, coaching, accommodation, etc).",
        ),
        Category::composite(
            "agi safety",
            ["agi safety research", "agi safety ecosystem development"],
        )
        .describe("Assign this flavor to nodes who you trust in the field of AGI Safety."),
        Category::normal("bounty ecosystem participation").describe(
            "Assign this flavor to nodes who you trust to participate in bounties in good faith. \
             This includes providing good work to claim a bounty, as well as providing payment \
             for bounties set by them.",
        ),
    ]
}

/// Write every default category the store does not have yet.
///
/// Existing definitions are left alone. Returns how many were added.
pub fn seed_default_categories<S: VoteStore + ?Sized>(store: &S) -> Result<usize, TrustError> {
    let existing: Vec<String> = store
        .list_categories()?
        .into_iter()
        .map(|c| c.name)
        .collect();

    let mut added = 0;
    for category in default_categories() {
        if existing.contains(&category.name) {
            continue;
        }
        store.put_category(&category)?;
        added += 1;
    }
    info!(added, "seeded default categories");
    Ok(added)
}
