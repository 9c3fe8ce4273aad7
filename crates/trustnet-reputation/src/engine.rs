// crates/trustnet-reputation/src/engine.rs
//
// The scoring pipeline, run end to end once per request against a single
// consistent reader:
//
//   resolve category -> discover network -> index -> build matrix -> solve -> finalize
//
// Every stage depends on the previous one's output; nothing is cached
// between requests.

use serde::Serialize;
use tracing::{debug, warn};

use trustnet_core::error::TrustError;
use trustnet_core::identity::ParticipantId;
use trustnet_core::traits::{VoteReader, VoteStore};

use crate::category::resolve_category;
use crate::config::EngineConfig;
use crate::finalize::finalize_score;
use crate::index::ParticipantIndex;
use crate::network::discover_network;
use crate::solver::solve;
use crate::trust_matrix::build_trust_matrix;

/// A computed score together with how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub viewer: ParticipantId,
    pub target: ParticipantId,
    pub category: String,
    /// Resolved category type ("general", "normal", "secondary", "composite").
    pub kind: &'static str,
    pub score: f64,
    /// Participants in the viewer's network, viewer included.
    pub network_size: usize,
    /// Whether the size cap left a reachable participant out of the network.
    pub truncated: bool,
    pub rounds: u32,
    pub converged: bool,
    /// Filtered votes cast by every processed network member.
    pub total_votes: u64,
}

/// Run the full pipeline and report the details.
///
/// Unknown categories and unreachable targets surface as
/// `TrustError::CategoryNotFound` and `TrustError::ParticipantNotInNetwork`;
/// an unusable `config` as `TrustError::InvalidConfig`.
/// `viewer != target` is the caller's responsibility.
pub fn evaluate<R: VoteReader + ?Sized>(
    reader: &R,
    viewer: ParticipantId,
    target: ParticipantId,
    category: &str,
    config: &EngineConfig,
) -> Result<ScoreReport, TrustError> {
    config.validate()?;
    let resolved = resolve_category(reader, category)?;
    let filter = resolved.filter();

    let network = discover_network(
        reader,
        viewer,
        Some(target),
        filter,
        config.network_size_limit,
    )?;
    if !network.contains(target) {
        debug!(%viewer, %target, category, "target not in viewer's network");
        return Err(TrustError::ParticipantNotInNetwork(target));
    }

    let index = ParticipantIndex::build(&network, viewer);
    let (matrix, tally) = build_trust_matrix(reader, &network, &index, target, filter)?;

    let solution = solve(&matrix, config);
    if !solution.converged {
        warn!(
            %viewer,
            %target,
            category,
            rounds = solution.rounds,
            "trust vector did not converge; using last round"
        );
    }

    let score = finalize_score(reader, &resolved, &solution, &tally, &index, viewer, target)?;
    debug!(%viewer, %target, category, score, rounds = solution.rounds, "score computed");

    Ok(ScoreReport {
        viewer,
        target,
        category: category.to_string(),
        kind: resolved.label(),
        score,
        network_size: network.len(),
        truncated: network.truncated(),
        rounds: solution.rounds,
        converged: solution.converged,
        total_votes: tally.total_votes,
    })
}

/// How much `viewer` should trust `target` in `category`.
///
/// Returns 0.0 when the category is unknown or the target is not reachable
/// from the viewer. Storage faults are returned as errors and no partial
/// score is produced.
pub fn compute_score<R: VoteReader + ?Sized>(
    reader: &R,
    viewer: ParticipantId,
    target: ParticipantId,
    category: &str,
    config: &EngineConfig,
) -> Result<f64, TrustError> {
    match evaluate(reader, viewer, target, category, config) {
        Ok(report) => Ok(report.score),
        Err(TrustError::CategoryNotFound(_)) | Err(TrustError::ParticipantNotInNetwork(_)) => {
            Ok(0.0)
        }
        Err(e) => Err(e),
    }
}

/// A vote store paired with an engine configuration.
///
/// Each call takes a fresh snapshot, so concurrent calls never share state.
#[derive(Debug)]
pub struct TrustEngine<S> {
    store: S,
    config: EngineConfig,
}

impl<S: VoteStore> TrustEngine<S> {
    /// Create an engine with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// See [`compute_score`].
    pub fn compute_score(
        &self,
        viewer: ParticipantId,
        target: ParticipantId,
        category: &str,
    ) -> Result<f64, TrustError> {
        let snapshot = self.store.snapshot()?;
        compute_score(&snapshot, viewer, target, category, &self.config)
    }

    /// See [`evaluate`].
    pub fn evaluate(
        &self,
        viewer: ParticipantId,
        target: ParticipantId,
        category: &str,
    ) -> Result<ScoreReport, TrustError> {
        let snapshot = self.store.snapshot()?;
        evaluate(&snapshot, viewer, target, category, &self.config)
    }
}
