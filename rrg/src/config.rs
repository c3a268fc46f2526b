use serde::{Deserialize, Serialize};

use plansheet::io::svg::SvgDrawOptions;
use plansheet::layout::FootprintRules;

use crate::opt::score::ScoreWeights;

/// Configuration for the RRG arranger
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RRGConfig {
    /// Per-category footprint rules; categories without an override use the built-in table
    #[serde(default)]
    pub footprint_rules: FootprintRules,
    /// Weights of the four scoring terms
    #[serde(default)]
    pub weights: ScoreWeights,
    pub grid_rows: usize,
    pub grid_cols: usize,
    /// Number of independent restart trials per `optimize` call
    pub n_trials: usize,
    /// Seed for the PRNG. If undefined, the arranger will run in non-deterministic mode using entropy
    pub prng_seed: Option<u64>,
    /// Wall-clock budget for the trial loop in milliseconds. If undefined, all trials run
    pub time_limit_ms: Option<u64>,
    /// Run the trials on a rayon thread pool; the result is identical to a sequential run
    #[serde(default)]
    pub parallel: bool,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for RRGConfig {
    fn default() -> Self {
        Self {
            footprint_rules: FootprintRules::default(),
            weights: ScoreWeights::default(),
            grid_rows: 3,
            grid_cols: 3,
            n_trials: 100,
            prng_seed: Some(0),
            time_limit_ms: None,
            parallel: false,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}
