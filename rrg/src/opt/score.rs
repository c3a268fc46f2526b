use itertools::Itertools;
use plansheet::entities::{CellPos, PartCategory};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Weights of the four scoring terms. They need not sum to 1; the default
/// weighting favors density and spread over grouping and balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub spacing: f32,
    pub alignment: f32,
    pub grouping: f32,
    pub balance: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            spacing: 0.3,
            alignment: 0.3,
            grouping: 0.2,
            balance: 0.2,
        }
    }
}

/// Weighted score of an arrangement, given every placed part's category and
/// anchor. Each term lies in [0, 1].
pub fn evaluate(
    placements: &[(PartCategory, CellPos)],
    rows: usize,
    cols: usize,
    weights: &ScoreWeights,
) -> f32 {
    weights.spacing * spacing_term(placements, rows, cols)
        + weights.alignment * alignment_term(placements, rows, cols)
        + weights.grouping * grouping_term(placements)
        + weights.balance * balance_term(placements, rows, cols)
}

/// Density over distinct anchor cells: `1 - empty_cells / total_cells`.
///
/// Deliberately counts only each part's anchor, not its full footprint; the
/// arranger's scores are calibrated against this measure, so widening it to
/// footprints would shift every ranking.
pub fn spacing_term(placements: &[(PartCategory, CellPos)], rows: usize, cols: usize) -> f32 {
    let distinct_anchors: HashSet<CellPos> = placements.iter().map(|&(_, pos)| pos).collect();
    let total_cells = rows * cols;
    let empty_cells = total_cells - distinct_anchors.len();
    1.0 - empty_cells as f32 / total_cells as f32
}

/// Mean of the fractions of rows and columns that hold at least one anchor.
pub fn alignment_term(placements: &[(PartCategory, CellPos)], rows: usize, cols: usize) -> f32 {
    let distinct_rows: HashSet<usize> = placements.iter().map(|&(_, pos)| pos.row).collect();
    let distinct_cols: HashSet<usize> = placements.iter().map(|&(_, pos)| pos.col).collect();
    (distinct_rows.len() as f32 / rows as f32 + distinct_cols.len() as f32 / cols as f32) / 2.0
}

/// Rewards same-category parts sitting close together: per category with at
/// least two anchors, `1 / (1 + mean pairwise Manhattan distance)`, averaged
/// over those categories. 0 when no category has two placed instances.
pub fn grouping_term(placements: &[(PartCategory, CellPos)]) -> f32 {
    let mut by_category: HashMap<PartCategory, Vec<CellPos>> = HashMap::new();
    for &(category, pos) in placements {
        by_category.entry(category).or_default().push(pos);
    }

    let mut total = 0.0;
    let mut n_groups = 0;
    // fixed category order keeps float accumulation deterministic
    for category in PartCategory::ALL {
        let Some(anchors) = by_category.get(&category) else {
            continue;
        };
        if anchors.len() < 2 {
            continue;
        }
        let distances = anchors
            .iter()
            .tuple_combinations()
            .map(|(a, b)| a.manhattan_distance(*b))
            .collect_vec();
        let mean_distance = distances.iter().sum::<usize>() as f32 / distances.len() as f32;
        total += 1.0 / (1.0 + mean_distance);
        n_groups += 1;
    }

    if n_groups == 0 {
        0.0
    } else {
        total / n_groups as f32
    }
}

/// How close the anchor centroid sits to the sheet center, per axis:
/// `1 - |centroid - (extent - 1) / 2| / extent`, averaged over both axes.
pub fn balance_term(placements: &[(PartCategory, CellPos)], rows: usize, cols: usize) -> f32 {
    if placements.is_empty() {
        return 0.0;
    }
    let n = placements.len() as f32;
    let row_centroid = placements.iter().map(|&(_, pos)| pos.row as f32).sum::<f32>() / n;
    let col_centroid = placements.iter().map(|&(_, pos)| pos.col as f32).sum::<f32>() / n;

    let row_balance = 1.0 - (row_centroid - (rows as f32 - 1.0) / 2.0).abs() / rows as f32;
    let col_balance = 1.0 - (col_centroid - (cols as f32 - 1.0) / 2.0).abs() / cols as f32;
    (row_balance + col_balance) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn at(category: PartCategory, row: usize, col: usize) -> (PartCategory, CellPos) {
        (category, CellPos::new(row, col))
    }

    #[test]
    fn adjacent_pair_of_one_category_scores_half() {
        let placements = vec![
            at(PartCategory::Detail, 0, 0),
            at(PartCategory::Detail, 0, 1),
        ];
        assert!(approx_eq!(f32, grouping_term(&placements), 0.5));
    }

    #[test]
    fn singleton_categories_do_not_count_towards_grouping() {
        let placements = vec![
            at(PartCategory::Detail, 0, 0),
            at(PartCategory::Section, 2, 2),
        ];
        assert_eq!(grouping_term(&placements), 0.0);
    }

    #[test]
    fn spacing_counts_distinct_anchor_cells_only() {
        let placements = vec![
            at(PartCategory::FrontView, 0, 0),
            at(PartCategory::SideView, 0, 2),
            at(PartCategory::TopView, 2, 0),
        ];
        // three anchors on nine cells, footprints are irrelevant
        assert!(approx_eq!(
            f32,
            spacing_term(&placements, 3, 3),
            1.0 - 6.0 / 9.0
        ));
    }

    #[test]
    fn full_anchor_coverage_maxes_spacing_and_alignment() {
        let placements: Vec<_> = (0..3)
            .flat_map(|row| (0..3).map(move |col| at(PartCategory::Detail, row, col)))
            .collect();
        assert!(approx_eq!(f32, spacing_term(&placements, 3, 3), 1.0));
        assert!(approx_eq!(f32, alignment_term(&placements, 3, 3), 1.0));
    }

    #[test]
    fn centered_anchor_is_perfectly_balanced() {
        let placements = vec![at(PartCategory::Detail, 1, 1)];
        assert!(approx_eq!(f32, balance_term(&placements, 3, 3), 1.0));
    }

    #[test]
    fn corner_anchor_is_penalized() {
        let placements = vec![at(PartCategory::Detail, 0, 0)];
        // centroid (0, 0), one cell off center on each axis of a 3-cell extent
        assert!(approx_eq!(f32, balance_term(&placements, 3, 3), 2.0 / 3.0));
    }

    #[test]
    fn empty_arrangement_scores_zero_balance() {
        assert_eq!(balance_term(&[], 3, 3), 0.0);
    }

    #[test]
    fn evaluate_is_the_weighted_sum() {
        let placements = vec![
            at(PartCategory::Detail, 0, 0),
            at(PartCategory::Detail, 0, 1),
        ];
        let weights = ScoreWeights::default();
        let expected = weights.spacing * spacing_term(&placements, 3, 3)
            + weights.alignment * alignment_term(&placements, 3, 3)
            + weights.grouping * grouping_term(&placements)
            + weights.balance * balance_term(&placements, 3, 3);
        assert!(approx_eq!(
            f32,
            evaluate(&placements, 3, 3, &weights),
            expected
        ));
    }
}
