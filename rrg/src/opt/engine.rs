use crate::config::RRGConfig;
use crate::opt::score;
use log::{debug, info};
use ordered_float::NotNan;
use plansheet::entities::{CellPos, Part, PartCategory};
use plansheet::layout::LayoutManager;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thousands::Separable;

/// One fully seated arrangement: part id → anchor, with its score and the
/// index of the trial that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrangement {
    pub positions: HashMap<String, CellPos>,
    pub score: f32,
    pub trial: usize,
}

/// Random-Restart-Greedy arranger: repeats the greedy first-fit layout over
/// shuffled part orders and keeps the best-scoring fully seated attempt.
///
/// Every trial draws from its own `SmallRng` seeded with `base_seed + trial`,
/// so results are reproducible and independent of execution order.
pub struct RRGOptimizer {
    pub config: RRGConfig,
    /// Number of trials that seated every part, across all calls
    pub n_feasible: usize,
}

impl RRGOptimizer {
    pub fn new(config: RRGConfig) -> Self {
        assert!(config.n_trials > 0);
        Self {
            config,
            n_feasible: 0,
        }
    }

    /// Runs the trial loop sequentially. Returns `None` when no trial seats
    /// every part — a normal outcome for part sets that exceed the sheet.
    pub fn optimize(&mut self, parts: &[Part]) -> Option<Arrangement> {
        let start = Instant::now();
        let deadline = self.deadline();
        let base_seed = self.base_seed();

        let mut best: Option<Arrangement> = None;
        for trial in 0..self.config.n_trials {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                info!("[RRG] time budget exhausted after {trial} trials");
                break;
            }
            if let Some(candidate) = self.run_trial(parts, base_seed, trial) {
                self.n_feasible += 1;
                let improves = best.as_ref().is_none_or(|b| candidate.score > b.score);
                if improves {
                    debug!(
                        "[RRG] trial {trial} improves score to {:.4}",
                        candidate.score
                    );
                    best = Some(candidate);
                }
            }
        }

        self.log_outcome(&best, start);
        best
    }

    /// Runs the trial loop on a rayon pool. Given the same seed, the reduction
    /// picks exactly the arrangement [`Self::optimize`] would have kept:
    /// highest score, earliest trial on ties.
    pub fn optimize_parallel(&mut self, parts: &[Part]) -> Option<Arrangement> {
        let start = Instant::now();
        let deadline = self.deadline();
        let base_seed = self.base_seed();

        let feasible: Vec<Arrangement> = {
            let this = &*self;
            (0..this.config.n_trials)
                .into_par_iter()
                .filter_map(|trial| {
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        return None;
                    }
                    this.run_trial(parts, base_seed, trial)
                })
                .collect()
        };
        self.n_feasible += feasible.len();

        let best = feasible.into_iter().max_by_key(|a| {
            let score = NotNan::new(a.score).expect("score is NaN");
            (score, Reverse(a.trial))
        });

        self.log_outcome(&best, start);
        best
    }

    fn run_trial(&self, parts: &[Part], base_seed: u64, trial: usize) -> Option<Arrangement> {
        let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(trial as u64));
        let mut shuffled = parts.to_vec();
        shuffled.shuffle(&mut rng);

        let mut manager = LayoutManager::new(
            self.config.footprint_rules.clone(),
            self.config.grid_rows,
            self.config.grid_cols,
        );
        if !manager.auto_layout(shuffled) {
            return None;
        }

        let placements: Vec<(PartCategory, CellPos)> = manager
            .grid
            .placed
            .values()
            .map(|p| {
                let anchor = p.position.expect("placed part always carries an anchor");
                (p.category, anchor)
            })
            .collect();
        let score = score::evaluate(
            &placements,
            self.config.grid_rows,
            self.config.grid_cols,
            &self.config.weights,
        );

        Some(Arrangement {
            positions: manager.grid.anchor_map(),
            score,
            trial,
        })
    }

    fn base_seed(&self) -> u64 {
        self.config.prng_seed.unwrap_or_else(rand::random)
    }

    fn deadline(&self) -> Option<Instant> {
        self.config
            .time_limit_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms))
    }

    fn log_outcome(&self, best: &Option<Arrangement>, start: Instant) {
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        match best {
            Some(arrangement) => info!(
                "[RRG] best of {} trials: score {:.4} from trial {} ({:.3}ms)",
                self.config.n_trials.separate_with_commas(),
                arrangement.score,
                arrangement.trial,
                elapsed_ms,
            ),
            None => info!(
                "[RRG] no feasible arrangement in {} trials ({:.3}ms)",
                self.config.n_trials.separate_with_commas(),
                elapsed_ms,
            ),
        }
    }
}
