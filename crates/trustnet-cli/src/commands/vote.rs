// crates/trustnet-cli/src/commands/vote.rs
//
// `trustnet vote` and `trustnet votes`: cast votes and read raw counts.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use trustnet_core::category::GENERAL_CATEGORY;
use trustnet_core::identity::ParticipantId;
use trustnet_core::traits::VoteStore;

use super::Context;
use crate::output;

#[derive(Debug, Args)]
pub struct VoteArgs {
    /// Participant casting the votes.
    #[arg(long)]
    pub from: u64,
    /// Participant receiving the votes.
    #[arg(long)]
    pub to: u64,
    /// Category the votes are cast in.
    #[arg(long, default_value = GENERAL_CATEGORY)]
    pub category: String,
    /// Number of votes to add; negative retracts.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub amount: i64,
}

#[derive(Debug, Args)]
pub struct VotesArgs {
    #[arg(long)]
    pub from: u64,
    #[arg(long)]
    pub to: u64,
    /// Restrict to one category; every category when omitted.
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct VoteRow {
    from: ParticipantId,
    to: ParticipantId,
    category: String,
    votes: u64,
}

/// Run the vote command.
pub fn run_vote(ctx: &Context, args: &VoteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = ctx.open_store()?;
    let from = ParticipantId(args.from);
    let to = ParticipantId(args.to);

    let votes = store.cast_vote(from, to, &args.category, args.amount)?;
    tracing::info!(%from, %to, category = %args.category, amount = args.amount, votes, "vote cast");

    let row = VoteRow {
        from,
        to,
        category: args.category.clone(),
        votes,
    };
    output::print(ctx.format, std::slice::from_ref(&row), &row);
    Ok(())
}

/// Run the votes command.
pub fn run_votes(ctx: &Context, args: &VotesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = ctx.open_store()?;
    let from = ParticipantId(args.from);
    let to = ParticipantId(args.to);

    let votes = store.vote_count(from, to, args.category.as_deref())?;
    let row = VoteRow {
        from,
        to,
        category: args.category.clone().unwrap_or_else(|| "*".to_string()),
        votes,
    };
    output::print(ctx.format, std::slice::from_ref(&row), &row);
    Ok(())
}
