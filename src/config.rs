use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PlannerError, Result};
use crate::models::{DailyGoals, MealSlot};
use crate::planner::constants::*;
use crate::planner::selection::ToleranceBand;

/// Share of the daily calorie target given to each slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotRatios {
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
    pub snack: f64,
}

impl Default for SlotRatios {
    fn default() -> Self {
        Self {
            breakfast: BREAKFAST_RATIO,
            lunch: LUNCH_RATIO,
            dinner: DINNER_RATIO,
            snack: SNACK_RATIO,
        }
    }
}

impl SlotRatios {
    pub fn ratio(&self, slot: MealSlot) -> f64 {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
            MealSlot::Snack => self.snack,
        }
    }

    pub fn sum(&self) -> f64 {
        self.breakfast + self.lunch + self.dinner + self.snack
    }
}

/// Planner and tracker settings. Every field falls back to its default when
/// absent from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub default_target_calories: f64,
    pub slot_ratios: SlotRatios,
    pub main_meal_tolerance: ToleranceBand,
    pub snack_tolerance: ToleranceBand,
    pub quick_prep_max_minutes: u32,
    pub recent_repeat_days: u32,
    pub default_goals: DailyGoals,
    pub default_tasks: Vec<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_target_calories: DEFAULT_TARGET_CALORIES,
            slot_ratios: SlotRatios::default(),
            main_meal_tolerance: ToleranceBand {
                tight: TIGHT_TOLERANCE_MAIN,
                wide: WIDE_TOLERANCE_MAIN,
            },
            snack_tolerance: ToleranceBand {
                tight: TIGHT_TOLERANCE_SNACK,
                wide: WIDE_TOLERANCE_SNACK,
            },
            quick_prep_max_minutes: QUICK_PREP_MAX_MINUTES,
            recent_repeat_days: RECENT_REPEAT_DAYS,
            default_goals: DailyGoals {
                calories: DEFAULT_TARGET_CALORIES,
                protein: DEFAULT_PROTEIN_GOAL,
                water: DEFAULT_WATER_GOAL,
            },
            default_tasks: DEFAULT_TASKS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl PlannerConfig {
    pub fn tolerance_for(&self, slot: MealSlot) -> ToleranceBand {
        if slot.is_main_meal() {
            self.main_meal_tolerance
        } else {
            self.snack_tolerance
        }
    }

    /// Reject settings the planner cannot work with.
    pub fn validate(&self) -> Result<()> {
        if (self.slot_ratios.sum() - 1.0).abs() > 1e-6 {
            return Err(PlannerError::InvalidInput(format!(
                "slot ratios must sum to 1.0, got {:.3}",
                self.slot_ratios.sum()
            )));
        }
        for band in [self.main_meal_tolerance, self.snack_tolerance] {
            if !band.is_valid() {
                return Err(PlannerError::InvalidInput(format!(
                    "invalid tolerance band {:?}",
                    band
                )));
            }
        }
        if !(self.default_target_calories.is_finite() && self.default_target_calories > 0.0) {
            return Err(PlannerError::InvalidInput(
                "default target calories must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load settings from `path`, or defaults when no path is given or the file
/// does not exist.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<PlannerConfig> {
    let config = match path {
        Some(path) if path.as_ref().exists() => {
            let content = fs::read_to_string(path.as_ref())?;
            serde_json::from_str(&content)?
        }
        Some(path) => {
            info!(path = %path.as_ref().display(), "config file not found, using defaults");
            PlannerConfig::default()
        }
        None => PlannerConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_valid() {
        let config = PlannerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.tolerance_for(MealSlot::Snack).tight, 75.0);
        assert_eq!(config.tolerance_for(MealSlot::Dinner).wide, 200.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"default_target_calories": 1800, "recent_repeat_days": 5}"#)
            .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.default_target_calories, 1800.0);
        assert_eq!(config.recent_repeat_days, 5);
        assert_eq!(config.slot_ratios, SlotRatios::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Some("/nonexistent/planner.json")).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_bad_ratios_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"slot_ratios": {"breakfast": 0.5, "lunch": 0.5, "dinner": 0.5, "snack": 0.1}}"#,
        )
        .unwrap();
        assert!(matches!(
            load_config(Some(file.path())),
            Err(PlannerError::InvalidInput(_))
        ));
    }
}
