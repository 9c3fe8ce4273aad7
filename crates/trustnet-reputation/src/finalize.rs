// crates/trustnet-reputation/src/finalize.rs
//
// Score finalization: scale the target's trust fraction into a score.
//
// base = round(trust[target] * (total_votes - votes cast by target), 2)
//
// Secondary categories add the direct endorsements cast in the secondary
// category itself. The viewer's own endorsement counts at face value; any
// other endorser's count is weighted by that endorser's base score, computed
// from the parent category's propagated trust. Mixed precision is intended:
// the weights are rounded, the raw counts are not.

use trustnet_core::error::TrustError;
use trustnet_core::identity::ParticipantId;
use trustnet_core::traits::VoteReader;

use crate::category::ResolvedCategory;
use crate::index::ParticipantIndex;
use crate::solver::Solution;
use crate::trust_matrix::VoteTally;

/// Convert a solved trust vector into the final, non-negative score.
pub fn finalize_score<R: VoteReader + ?Sized>(
    reader: &R,
    resolved: &ResolvedCategory,
    solution: &Solution,
    tally: &VoteTally,
    index: &ParticipantIndex,
    viewer: ParticipantId,
    target: ParticipantId,
) -> Result<f64, TrustError> {
    let base = scaled_trust(solution, tally, index.index_of(target), target);

    let score = match resolved {
        ResolvedCategory::Secondary { name, .. } => {
            let mut score = base;
            for (position, endorser) in index.iter() {
                let Some(count) = reader.direct_vote_count(endorser, target, name)? else {
                    continue;
                };
                if endorser == viewer {
                    score += count as f64;
                } else {
                    score += count as f64 * scaled_trust(solution, tally, position, endorser);
                }
            }
            score
        }
        ResolvedCategory::General
        | ResolvedCategory::Normal { .. }
        | ResolvedCategory::Composite { .. } => base,
    };

    // Never negative; this also folds -0.0 and NaN into 0.0.
    if score > 0.0 {
        Ok(score)
    } else {
        Ok(0.0)
    }
}

/// `round(trust[position] * (total_votes - votes cast by participant), 2)`.
fn scaled_trust(
    solution: &Solution,
    tally: &VoteTally,
    position: usize,
    participant: ParticipantId,
) -> f64 {
    round_cents(solution.scores[position] * tally.votes_excluding(participant) as f64)
}

/// Round to 2 decimal places using the exact decimal value of `value`.
///
/// Scaling by 100 first can turn a value just above a tie into an exact tie
/// (2.9250000000000003 * 100 == 292.5), so the digits are taken from the
/// float's exact expansion instead. Exact ties go to the even digit.
pub fn round_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
