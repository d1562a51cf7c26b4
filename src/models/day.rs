use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::food::{FoodItem, MealSlot};

/// A scheduled meal inside a day aggregate. Macros are copied from the
/// catalog at scheduling time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub id: String,
    pub food_id: String,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub meal_type: MealSlot,
    #[serde(default)]
    pub consumed: bool,
}

impl MealItem {
    /// Meal item ids are `"{date}:{slot}:{food_id}"`.
    pub fn make_id(date: NaiveDate, slot: MealSlot, food_id: &str) -> String {
        format!("{}:{}:{}", date, slot, food_id)
    }

    pub fn from_food(food: &FoodItem, date: NaiveDate, slot: MealSlot) -> Self {
        Self {
            id: Self::make_id(date, slot, &food.id),
            food_id: food.id.clone(),
            name: food.name.clone(),
            calories: food.calories,
            protein: food.protein,
            carbs: food.carbs,
            fat: food.fat,
            meal_type: slot,
            consumed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTask {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyGoals {
    pub calories: f64,
    pub protein: f64,
    pub water: u32,
}

/// Per-date record of scheduled meals, consumption, water and tasks.
///
/// `consumed_calories`/`consumed_protein` equal the sum over consumed meals as
/// of the last toggle. A manual override (see `ProgressStore::update_progress`)
/// may diverge from that sum until the next toggle recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAggregate {
    pub date: NaiveDate,
    #[serde(default)]
    pub meals: Vec<MealItem>,
    #[serde(default)]
    pub water_glasses: u32,
    #[serde(default)]
    pub tasks: Vec<DailyTask>,
    pub goals: DailyGoals,
    #[serde(default)]
    pub consumed_calories: f64,
    #[serde(default)]
    pub consumed_protein: f64,
    #[serde(default)]
    pub manual_override: bool,
}

impl DayAggregate {
    pub fn new(date: NaiveDate, goals: DailyGoals, task_texts: &[String]) -> Self {
        let tasks = task_texts
            .iter()
            .enumerate()
            .map(|(i, text)| DailyTask {
                id: format!("task-{}", i + 1),
                text: text.clone(),
                completed: false,
            })
            .collect();

        Self {
            date,
            meals: Vec::new(),
            water_glasses: 0,
            tasks,
            goals,
            consumed_calories: 0.0,
            consumed_protein: 0.0,
            manual_override: false,
        }
    }

    /// Recompute consumed totals from scratch over consumed meals.
    pub fn recompute_consumed(&mut self) {
        let (calories, protein) = self
            .meals
            .iter()
            .filter(|m| m.consumed)
            .fold((0.0, 0.0), |(c, p), m| (c + m.calories, p + m.protein));
        self.consumed_calories = calories;
        self.consumed_protein = protein;
        self.manual_override = false;
    }

    /// Sum of all scheduled meal calories, consumed or not.
    pub fn scheduled_calories(&self) -> f64 {
        self.meals.iter().map(|m| m.calories).sum()
    }

    pub fn meal(&self, meal_id: &str) -> Option<&MealItem> {
        self.meals.iter().find(|m| m.id == meal_id)
    }

    pub fn meals_for(&self, slot: MealSlot) -> impl Iterator<Item = &MealItem> {
        self.meals.iter().filter(move |m| m.meal_type == slot)
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Either calories or protein logged.
    pub fn has_activity(&self) -> bool {
        self.consumed_calories > 0.0 || self.consumed_protein > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals() -> DailyGoals {
        DailyGoals {
            calories: 2000.0,
            protein: 90.0,
            water: 8,
        }
    }

    fn meal(id: &str, calories: f64, protein: f64, consumed: bool) -> MealItem {
        MealItem {
            id: id.to_string(),
            food_id: id.to_string(),
            name: id.to_string(),
            calories,
            protein,
            carbs: 0.0,
            fat: 0.0,
            meal_type: MealSlot::Lunch,
            consumed,
        }
    }

    #[test]
    fn test_new_assigns_task_ids() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 2).unwrap();
        let day = DayAggregate::new(date, goals(), &["Drink water".to_string(), "Walk".to_string()]);
        assert_eq!(day.tasks.len(), 2);
        assert_eq!(day.tasks[1].id, "task-2");
        assert!(!day.has_activity());
    }

    #[test]
    fn test_recompute_consumed_sums_only_consumed() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 2).unwrap();
        let mut day = DayAggregate::new(date, goals(), &[]);
        day.meals.push(meal("a", 400.0, 20.0, true));
        day.meals.push(meal("b", 300.0, 10.0, false));
        day.meals.push(meal("c", 150.0, 5.0, true));
        day.consumed_calories = 9999.0;
        day.manual_override = true;

        day.recompute_consumed();

        assert_eq!(day.consumed_calories, 550.0);
        assert_eq!(day.consumed_protein, 25.0);
        assert!(!day.manual_override);
        assert_eq!(day.scheduled_calories(), 850.0);
    }

    #[test]
    fn test_meal_id_format() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 2).unwrap();
        assert_eq!(
            MealItem::make_id(date, MealSlot::Dinner, "d-3"),
            "2026-05-02:dinner:d-3"
        );
    }
}
