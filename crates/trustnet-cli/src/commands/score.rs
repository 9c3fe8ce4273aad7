// crates/trustnet-cli/src/commands/score.rs
//
// `trustnet score`: how much a viewer should trust a target in a category.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use trustnet_core::category::GENERAL_CATEGORY;
use trustnet_core::error::TrustError;
use trustnet_core::identity::ParticipantId;
use trustnet_reputation::{ScoreReport, TrustEngine};

use super::Context;
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Participant whose point of view the score is computed from.
    #[arg(long)]
    pub viewer: u64,
    /// Participant being scored.
    #[arg(long)]
    pub target: u64,
    #[arg(long, default_value = GENERAL_CATEGORY)]
    pub category: String,
    /// Print network size, rounds, and vote totals alongside the score.
    #[arg(long)]
    pub explain: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ScoreRow {
    viewer: ParticipantId,
    target: ParticipantId,
    category: String,
    score: f64,
}

#[derive(Debug, Tabled)]
struct FieldRow {
    field: &'static str,
    value: String,
}

/// Run the score command.
pub fn run(ctx: &Context, args: &ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let viewer = ParticipantId(args.viewer);
    let target = ParticipantId(args.target);
    if viewer == target {
        return Err(format!("viewer and target must differ (both are {})", viewer).into());
    }

    let engine = TrustEngine::with_config(ctx.open_store()?, ctx.config.engine.clone());

    if !args.explain {
        let score = engine.compute_score(viewer, target, &args.category)?;
        let row = ScoreRow {
            viewer,
            target,
            category: args.category.clone(),
            score,
        };
        output::print(ctx.format, std::slice::from_ref(&row), &row);
        return Ok(());
    }

    match engine.evaluate(viewer, target, &args.category) {
        Ok(report) => print_report(ctx.format, &report),
        Err(TrustError::CategoryNotFound(name)) => {
            println!("Score 0: category not found: {}", name);
        }
        Err(TrustError::ParticipantNotInNetwork(id)) => {
            println!("Score 0: {} is not reachable from {} in '{}'", id, viewer, args.category);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn print_report(format: OutputFormat, report: &ScoreReport) {
    let rows = vec![
        field("viewer", report.viewer),
        field("target", report.target),
        field("category", format!("{} ({})", report.category, report.kind)),
        field("score", report.score),
        field("network size", report.network_size),
        field("truncated", report.truncated),
        field("rounds", report.rounds),
        field("converged", report.converged),
        field("total votes", report.total_votes),
    ];
    output::print(format, &rows, report);
}

fn field(name: &'static str, value: impl ToString) -> FieldRow {
    FieldRow {
        field: name,
        value: value.to_string(),
    }
}
