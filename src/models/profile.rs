use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::day::DailyGoals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// A logged body weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub date: NaiveDate,
    pub weight_kg: f64,
}

/// User profile: baseline body metrics, goals, and the weight log.
///
/// `weight_kg` and `created_on` are the anchor declared at account creation;
/// they are never rewritten by weight logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub gender: Gender,
    pub calorie_goal: f64,
    pub protein_goal: f64,
    pub water_goal: u32,
    pub created_on: NaiveDate,
    #[serde(default)]
    pub weight_log: Vec<WeightEntry>,
}

impl UserProfile {
    /// Basal metabolic rate (Mifflin-St Jeor), kcal/day.
    pub fn bmr(&self) -> f64 {
        let base = 10.0 * self.weight_kg + 6.25 * self.height_cm - 5.0 * self.age as f64;
        match self.gender {
            Gender::Male => base + 5.0,
            Gender::Female => base - 161.0,
        }
    }

    pub fn goals(&self) -> DailyGoals {
        DailyGoals {
            calories: self.calorie_goal,
            protein: self.protein_goal,
            water: self.water_goal,
        }
    }

    /// Most recent logged weight, falling back to the anchor weight.
    pub fn current_weight(&self) -> f64 {
        self.weight_log
            .iter()
            .max_by_key(|e| e.date)
            .map(|e| e.weight_kg)
            .unwrap_or(self.weight_kg)
    }

    pub fn log_weight(&mut self, date: NaiveDate, weight_kg: f64) {
        self.weight_log.push(WeightEntry { date, weight_kg });
    }
}

/// Read-only access to the active user profile.
pub trait ProfileProvider {
    fn profile(&self) -> &UserProfile;
}

impl ProfileProvider for UserProfile {
    fn profile(&self) -> &UserProfile {
        self
    }
}
