use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PlannerError, Result};
use crate::models::FoodItem;
use crate::planner::constants::{
    DEFAULT_TARGET_CALORIES, QUICK_PREP_MAX_MINUTES, TIGHT_TOLERANCE_MAIN, WIDE_TOLERANCE_MAIN,
};

/// Two tolerance widths in kcal: tight for first generation, wide for
/// regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBand {
    pub tight: f64,
    pub wide: f64,
}

impl ToleranceBand {
    /// Same width for both passes.
    pub fn uniform(width: f64) -> Self {
        Self {
            tight: width,
            wide: width,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.tight.is_finite() && self.wide.is_finite() && self.tight >= 0.0 && self.wide >= 0.0
    }
}

impl Default for ToleranceBand {
    fn default() -> Self {
        Self {
            tight: TIGHT_TOLERANCE_MAIN,
            wide: WIDE_TOLERANCE_MAIN,
        }
    }
}

/// Which tolerance width a selection uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPass {
    #[default]
    Initial,
    Regenerate,
}

/// Per-call selection constraints. Preference flags are soft: if they filter
/// everything out, selection falls back rather than failing.
#[derive(Debug, Clone)]
pub struct MealSelectionFilter {
    pub target_calories: f64,
    pub tolerance: ToleranceBand,
    pub pass: SelectionPass,
    pub vegetarian_only: bool,
    pub vegan_only: bool,
    pub high_protein: bool,
    pub quick_only: bool,
    pub quick_prep_max_minutes: u32,
    pub excluded_ids: HashSet<String>,
}

impl Default for MealSelectionFilter {
    fn default() -> Self {
        Self {
            target_calories: DEFAULT_TARGET_CALORIES,
            tolerance: ToleranceBand::default(),
            pass: SelectionPass::Initial,
            vegetarian_only: false,
            vegan_only: false,
            high_protein: false,
            quick_only: false,
            quick_prep_max_minutes: QUICK_PREP_MAX_MINUTES,
            excluded_ids: HashSet::new(),
        }
    }
}

impl MealSelectionFilter {
    pub fn new(target_calories: f64, tolerance: ToleranceBand) -> Self {
        Self {
            target_calories,
            tolerance,
            ..Default::default()
        }
    }

    /// Width for the current pass.
    pub fn active_tolerance(&self) -> f64 {
        match self.pass {
            SelectionPass::Initial => self.tolerance.tight,
            SelectionPass::Regenerate => self.tolerance.wide,
        }
    }
}

/// Run the filter pipeline in order: exclusions, diet, high protein, quick.
pub fn filter_pool<'a>(pool: &'a [FoodItem], filter: &MealSelectionFilter) -> Vec<&'a FoodItem> {
    let mut candidates: Vec<&FoodItem> = pool
        .iter()
        .filter(|f| !filter.excluded_ids.contains(&f.id))
        .collect();

    if filter.vegan_only {
        candidates.retain(|f| f.is_vegan);
    } else if filter.vegetarian_only {
        candidates.retain(|f| f.is_vegetarian);
    }

    if filter.high_protein && !candidates.is_empty() {
        let mean = candidates.iter().map(|f| f.protein).sum::<f64>() / candidates.len() as f64;
        candidates.retain(|f| f.protein >= mean);
    }

    if filter.quick_only {
        candidates.retain(|f| {
            f.prep_minutes()
                .is_some_and(|m| m <= filter.quick_prep_max_minutes)
        });
    }

    candidates
}

/// Candidates whose calories lie within `tolerance` of `target`.
pub fn within_tolerance<'a>(
    candidates: &[&'a FoodItem],
    target: f64,
    tolerance: f64,
) -> Vec<&'a FoodItem> {
    candidates
        .iter()
        .copied()
        .filter(|f| (f.calories - target).abs() <= tolerance)
        .collect()
}

/// Every candidate tied at the minimum calorie distance from `target`.
pub fn nearest_ties<'a>(candidates: &[&'a FoodItem], target: f64) -> Vec<&'a FoodItem> {
    let min_distance = candidates
        .iter()
        .map(|f| (f.calories - target).abs())
        .fold(f64::INFINITY, f64::min);

    candidates
        .iter()
        .copied()
        .filter(|f| (f.calories - target).abs() == min_distance)
        .collect()
}

/// Pick one food from `pool` for the filter's calorie target.
///
/// Multi-stage selection:
/// 1. Filter pipeline (see [`filter_pool`])
/// 2. Empty result: uniform pick from the pool with only exclusions applied,
///    or from the whole pool if exclusions leave nothing
/// 3. Uniform pick among candidates within the active tolerance band
/// 4. Otherwise uniform pick among candidates tied at the minimum distance
///
/// An empty pool is a configuration error.
pub fn select_meal<'a, R: Rng + ?Sized>(
    pool: &'a [FoodItem],
    filter: &MealSelectionFilter,
    rng: &mut R,
) -> Result<&'a FoodItem> {
    if pool.is_empty() {
        return Err(PlannerError::CatalogEmpty("selection pool".to_string()));
    }

    let candidates = filter_pool(pool, filter);

    if candidates.is_empty() {
        let unexcluded: Vec<&FoodItem> = pool
            .iter()
            .filter(|f| !filter.excluded_ids.contains(&f.id))
            .collect();
        let fallback: Vec<&FoodItem> = if unexcluded.is_empty() {
            pool.iter().collect()
        } else {
            unexcluded
        };

        warn!(
            target_calories = filter.target_calories,
            pool = pool.len(),
            "no food matches the selection filters, falling back to a random pick"
        );
        return pick(&fallback, rng);
    }

    let target = filter.target_calories;
    let tolerance = filter.active_tolerance();
    let in_band = within_tolerance(&candidates, target, tolerance);
    if !in_band.is_empty() {
        debug!(
            target,
            tolerance,
            matches = in_band.len(),
            "picking within tolerance band"
        );
        return pick(&in_band, rng);
    }

    let ties = nearest_ties(&candidates, target);
    debug!(
        target,
        tolerance,
        ties = ties.len(),
        "no food within tolerance, picking nearest"
    );
    pick(&ties, rng)
}

fn pick<'a, R: Rng + ?Sized>(items: &[&'a FoodItem], rng: &mut R) -> Result<&'a FoodItem> {
    items
        .choose(rng)
        .copied()
        .ok_or_else(|| PlannerError::CatalogEmpty("selection pool".to_string()))
}
