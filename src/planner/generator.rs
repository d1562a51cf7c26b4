use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use rand::Rng;
use tracing::{debug, info};

use crate::catalog::CatalogProvider;
use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::models::{DailyMealPlan, FoodItem, MealSlot};
use crate::planner::selection::{MealSelectionFilter, SelectionPass, select_meal};

/// Caller-facing options for plan generation and regeneration.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Daily target; the config default applies when `None`.
    pub target_calories: Option<f64>,
    pub vegetarian_only: bool,
    pub vegan_only: bool,
    pub high_protein: bool,
    pub quick_only: bool,
    /// Recently used foods to avoid.
    pub excluded_ids: HashSet<String>,
    /// Plan date; today's local date when `None`.
    pub date: Option<NaiveDate>,
}

impl PlanOptions {
    pub fn with_target(target_calories: f64) -> Self {
        Self {
            target_calories: Some(target_calories),
            ..Default::default()
        }
    }

    pub fn target(&self, config: &PlannerConfig) -> f64 {
        self.target_calories
            .unwrap_or(config.default_target_calories)
    }
}

/// Per-slot calorie targets for a daily target.
pub fn slot_targets(config: &PlannerConfig, target_calories: f64) -> [(MealSlot, f64); 4] {
    MealSlot::ALL.map(|slot| (slot, target_calories * config.slot_ratios.ratio(slot)))
}

fn build_filter(
    config: &PlannerConfig,
    options: &PlanOptions,
    slot: MealSlot,
    slot_target: f64,
    pass: SelectionPass,
) -> MealSelectionFilter {
    MealSelectionFilter {
        target_calories: slot_target,
        tolerance: config.tolerance_for(slot),
        pass,
        vegetarian_only: options.vegetarian_only,
        vegan_only: options.vegan_only,
        high_protein: options.high_protein,
        quick_only: options.quick_only,
        quick_prep_max_minutes: config.quick_prep_max_minutes,
        excluded_ids: options.excluded_ids.clone(),
    }
}

fn select_for_slot<C, R>(
    catalog: &C,
    slot: MealSlot,
    filter: &MealSelectionFilter,
    rng: &mut R,
) -> Result<FoodItem>
where
    C: CatalogProvider + ?Sized,
    R: Rng + ?Sized,
{
    let pool = catalog.foods_by_slot(slot);
    if pool.is_empty() {
        return Err(PlannerError::CatalogEmpty(slot.to_string()));
    }
    select_meal(pool, filter, rng).cloned()
}

fn validate_target(target: f64) -> Result<()> {
    if target.is_finite() && target > 0.0 {
        Ok(())
    } else {
        Err(PlannerError::InvalidNumericInput(format!(
            "target calories must be a positive number, got {}",
            target
        )))
    }
}

/// Generate a full day plan: one independent selection per slot.
pub fn generate_plan<C, R>(
    catalog: &C,
    config: &PlannerConfig,
    options: &PlanOptions,
    rng: &mut R,
) -> Result<DailyMealPlan>
where
    C: CatalogProvider + ?Sized,
    R: Rng + ?Sized,
{
    let target = options.target(config);
    validate_target(target)?;

    let mut pick = |slot: MealSlot| -> Result<FoodItem> {
        let slot_target = target * config.slot_ratios.ratio(slot);
        let filter = build_filter(config, options, slot, slot_target, SelectionPass::Initial);
        let food = select_for_slot(catalog, slot, &filter, &mut *rng)?;
        debug!(%slot, slot_target, food = %food.debug_string(), "selected food");
        Ok(food)
    };

    let breakfast = pick(MealSlot::Breakfast)?;
    let lunch = pick(MealSlot::Lunch)?;
    let dinner = pick(MealSlot::Dinner)?;
    let snack = pick(MealSlot::Snack)?;

    let date = options.date.unwrap_or_else(|| Local::now().date_naive());
    let plan = DailyMealPlan::new(date, breakfast, lunch, dinner, snack);

    info!(
        %date,
        target,
        total_calories = plan.total_calories(),
        "generated meal plan"
    );
    Ok(plan)
}

/// Re-select one slot with the wide band, excluding every food already in
/// the plan. Returns a new plan; `plan` is untouched.
pub fn regenerate_slot<C, R>(
    catalog: &C,
    config: &PlannerConfig,
    plan: &DailyMealPlan,
    slot: MealSlot,
    options: &PlanOptions,
    rng: &mut R,
) -> Result<DailyMealPlan>
where
    C: CatalogProvider + ?Sized,
    R: Rng + ?Sized,
{
    let target = options.target(config);
    validate_target(target)?;

    let slot_target = target * config.slot_ratios.ratio(slot);
    let mut filter = build_filter(config, options, slot, slot_target, SelectionPass::Regenerate);
    filter.excluded_ids.extend(plan.other_slot_ids(slot));
    filter.excluded_ids.insert(plan.slot(slot).id.clone());

    let food = select_for_slot(catalog, slot, &filter, rng)?;
    info!(
        %slot,
        previous = %plan.slot(slot).id,
        replacement = %food.id,
        "regenerated meal slot"
    );
    Ok(plan.with_slot(slot, food))
}
