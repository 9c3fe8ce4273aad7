// crates/trustnet-reputation/src/solver.rs
//
// Power iteration of the personalized trust vector.
//
// Restart-style personalization: the viewer's entry is pinned to 1.0 after
// every round, so trust always re-enters the network at the viewer and loses
// `decay` of its mass per hop:
//
//   scores = (M . scores) * (1 - decay);  scores[viewer] = 1.0
//
// Iteration stops once every entry is unchanged at `precision` decimal
// places, or after `max_rounds` rounds. Hitting the round cap is not an
// error; the last vector is returned as-is.

use crate::config::EngineConfig;
use crate::trust_matrix::TrustMatrix;

/// Result of running the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Trust fraction per matrix position; position 0 (the viewer) is 1.0.
    pub scores: Vec<f64>,
    /// Rounds actually performed.
    pub rounds: u32,
    /// Whether the rounding-based equality check passed before the cap.
    pub converged: bool,
}

/// Iterate the trust vector through `matrix` until convergence or the cap.
pub fn solve(matrix: &TrustMatrix, config: &EngineConfig) -> Solution {
    let n = matrix.dimension();
    let mut scores = vec![0.0_f64; n];
    if n == 0 {
        return Solution {
            scores,
            rounds: 0,
            converged: true,
        };
    }
    scores[0] = 1.0;

    let retained = 1.0 - config.decay;
    for round in 1..=config.max_rounds {
        let mut next: Vec<f64> = matrix
            .multiply(&scores)
            .into_iter()
            .map(|s| s * retained)
            .collect();
        next[0] = 1.0;

        let converged = scores
            .iter()
            .zip(&next)
            .all(|(&old, &new)| round_to(old, config.precision) == round_to(new, config.precision));
        scores = next;
        if converged {
            return Solution {
                scores,
                rounds: round,
                converged: true,
            };
        }
    }

    Solution {
        scores,
        rounds: config.max_rounds,
        converged: false,
    }
}

/// Round `value` to `places` decimal places, ties to even.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
