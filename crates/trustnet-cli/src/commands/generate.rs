// crates/trustnet-cli/src/commands/generate.rs
//
// `trustnet generate`: fill the store with a random vote network.
//
// Every unordered pair of participants votes with the given probability, in
// a random direction, with 1..=max_votes votes.

use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tabled::Tabled;

use trustnet_core::category::GENERAL_CATEGORY;
use trustnet_core::error::TrustError;
use trustnet_core::identity::ParticipantId;
use trustnet_core::traits::VoteStore;

use super::Context;
use crate::output;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Number of participants, with ids 1..=users.
    #[arg(long, default_value_t = 150)]
    pub users: u64,
    /// Chance that a given pair of participants votes.
    #[arg(long, default_value_t = 0.2)]
    pub probability: f64,
    /// Upper bound on the votes cast for one edge.
    #[arg(long, default_value_t = 100)]
    pub max_votes: u64,
    #[arg(long, default_value = GENERAL_CATEGORY)]
    pub category: String,
    /// Seed for a reproducible network.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize, Tabled)]
pub struct GenerateSummary {
    pub users: u64,
    pub edges: u64,
    pub votes: u64,
}

/// Run the generate command.
pub fn run(ctx: &Context, args: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !(0.0..=1.0).contains(&args.probability) {
        return Err(format!("--probability must be within 0..=1, got {}", args.probability).into());
    }
    if args.max_votes == 0 {
        return Err("--max-votes must be at least 1".into());
    }

    let store = ctx.open_store()?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let summary = generate_votes(&store, &mut rng, args)?;
    tracing::info!(
        users = summary.users,
        edges = summary.edges,
        votes = summary.votes,
        "random network written"
    );
    output::print(ctx.format, std::slice::from_ref(&summary), &summary);
    Ok(())
}

/// Cast the random votes into `store`.
pub fn generate_votes<S: VoteStore, R: Rng>(
    store: &S,
    rng: &mut R,
    args: &GenerateArgs,
) -> Result<GenerateSummary, TrustError> {
    let mut summary = GenerateSummary {
        users: args.users,
        ..GenerateSummary::default()
    };

    for a in 1..=args.users {
        for b in (a + 1)..=args.users {
            if !rng.gen_bool(args.probability) {
                continue;
            }
            let (from, to) = if rng.gen_bool(0.5) { (a, b) } else { (b, a) };
            let amount = rng.gen_range(1..=args.max_votes);
            let amount = i64::try_from(amount).map_err(|_| {
                TrustError::InvalidVote(format!("vote amount too large: {}", amount))
            })?;
            store.cast_vote(ParticipantId(from), ParticipantId(to), &args.category, amount)?;
            summary.edges += 1;
            summary.votes += amount as u64;
        }
    }

    Ok(summary)
}
