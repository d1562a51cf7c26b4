use std::fmt;

use crate::models::DailyMealPlan;
use crate::planner::constants::*;

/// Advisory finding about a generated plan. Never blocks generation.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanWarning {
    CalorieDeviation { total: f64, target: f64, deviation: f64 },
    LowProtein { share: f64 },
    CarbShareOutOfRange { share: f64 },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::CalorieDeviation {
                total,
                target,
                deviation,
            } => write!(
                f,
                "Total calories {:.0} deviate {:.0}% from the {:.0} kcal target",
                total,
                deviation * 100.0,
                target
            ),
            PlanWarning::LowProtein { share } => write!(
                f,
                "Protein provides only {:.0}% of calories (minimum {:.0}%)",
                share * 100.0,
                MIN_PROTEIN_CALORIE_SHARE * 100.0
            ),
            PlanWarning::CarbShareOutOfRange { share } => write!(
                f,
                "Carbs provide {:.0}% of calories (expected {:.0}-{:.0}%)",
                share * 100.0,
                CARB_CALORIE_SHARE_MIN * 100.0,
                CARB_CALORIE_SHARE_MAX * 100.0
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanValidation {
    pub valid: bool,
    pub warnings: Vec<PlanWarning>,
}

/// Post-hoc nutritional sanity check of a plan against its target.
pub fn validate_plan(plan: &DailyMealPlan, target_calories: f64) -> PlanValidation {
    let mut warnings = Vec::new();
    let total = plan.total_calories();

    if target_calories > 0.0 {
        let deviation = (total - target_calories).abs() / target_calories;
        if deviation > MAX_CALORIE_DEVIATION {
            warnings.push(PlanWarning::CalorieDeviation {
                total,
                target: target_calories,
                deviation,
            });
        }
    }

    if total > 0.0 {
        let protein_share = plan.total_protein() * KCAL_PER_GRAM_PROTEIN / total;
        if protein_share < MIN_PROTEIN_CALORIE_SHARE {
            warnings.push(PlanWarning::LowProtein {
                share: protein_share,
            });
        }

        let carb_share = plan.total_carbs() * KCAL_PER_GRAM_CARBS / total;
        if !(CARB_CALORIE_SHARE_MIN..=CARB_CALORIE_SHARE_MAX).contains(&carb_share) {
            warnings.push(PlanWarning::CarbShareOutOfRange { share: carb_share });
        }
    }

    PlanValidation {
        valid: warnings.is_empty(),
        warnings,
    }
}
