use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::food::{FoodItem, MealSlot};

/// Macro totals summed over a plan's four slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// A generated plan: one food per slot plus derived totals.
///
/// Slots are private so totals can only change through [`DailyMealPlan::with_slot`],
/// which always recomputes them. Deserialization also recomputes totals and
/// ignores whatever totals the document carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PlanRecord")]
pub struct DailyMealPlan {
    date: NaiveDate,
    breakfast: FoodItem,
    lunch: FoodItem,
    dinner: FoodItem,
    snack: FoodItem,
    totals: PlanTotals,
}

#[derive(Deserialize)]
struct PlanRecord {
    date: NaiveDate,
    breakfast: FoodItem,
    lunch: FoodItem,
    dinner: FoodItem,
    snack: FoodItem,
}

impl From<PlanRecord> for DailyMealPlan {
    fn from(record: PlanRecord) -> Self {
        DailyMealPlan::new(
            record.date,
            record.breakfast,
            record.lunch,
            record.dinner,
            record.snack,
        )
    }
}

impl DailyMealPlan {
    pub fn new(
        date: NaiveDate,
        breakfast: FoodItem,
        lunch: FoodItem,
        dinner: FoodItem,
        snack: FoodItem,
    ) -> Self {
        let mut plan = Self {
            date,
            breakfast,
            lunch,
            dinner,
            snack,
            totals: PlanTotals::default(),
        };
        plan.totals = plan.compute_totals();
        plan
    }

    fn compute_totals(&self) -> PlanTotals {
        self.items()
            .iter()
            .fold(PlanTotals::default(), |acc, (_, food)| PlanTotals {
                calories: acc.calories + food.calories,
                protein: acc.protein + food.protein,
                carbs: acc.carbs + food.carbs,
                fat: acc.fat + food.fat,
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn slot(&self, slot: MealSlot) -> &FoodItem {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snack => &self.snack,
        }
    }

    /// Slots in plan order.
    pub fn items(&self) -> [(MealSlot, &FoodItem); 4] {
        [
            (MealSlot::Breakfast, &self.breakfast),
            (MealSlot::Lunch, &self.lunch),
            (MealSlot::Dinner, &self.dinner),
            (MealSlot::Snack, &self.snack),
        ]
    }

    /// Ids of every slot except `slot`.
    pub fn other_slot_ids(&self, slot: MealSlot) -> Vec<String> {
        self.items()
            .iter()
            .filter(|(s, _)| *s != slot)
            .map(|(_, food)| food.id.clone())
            .collect()
    }

    /// A new plan with `slot` replaced and totals recomputed.
    pub fn with_slot(&self, slot: MealSlot, food: FoodItem) -> Self {
        let mut next = self.clone();
        match slot {
            MealSlot::Breakfast => next.breakfast = food,
            MealSlot::Lunch => next.lunch = food,
            MealSlot::Dinner => next.dinner = food,
            MealSlot::Snack => next.snack = food,
        }
        next.totals = next.compute_totals();
        next
    }

    pub fn totals(&self) -> PlanTotals {
        self.totals
    }

    pub fn total_calories(&self) -> f64 {
        self.totals.calories
    }

    pub fn total_protein(&self) -> f64 {
        self.totals.protein
    }

    pub fn total_carbs(&self) -> f64 {
        self.totals.carbs
    }

    pub fn total_fat(&self) -> f64 {
        self.totals.fat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::food::CatalogEntry;

    fn food(id: &str, slot: MealSlot, calories: f64, protein: f64) -> FoodItem {
        FoodItem::from(CatalogEntry {
            id: id.to_string(),
            name: id.to_string(),
            local_name: String::new(),
            calories,
            protein,
            carbs: 10.0,
            fat: 5.0,
            fiber: 1.0,
            category: slot,
            description: String::new(),
            portion: String::new(),
            preparation_time: String::new(),
            tips: String::new(),
        })
    }

    fn sample_plan() -> DailyMealPlan {
        DailyMealPlan::new(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            food("b", MealSlot::Breakfast, 500.0, 20.0),
            food("l", MealSlot::Lunch, 700.0, 35.0),
            food("d", MealSlot::Dinner, 600.0, 30.0),
            food("s", MealSlot::Snack, 200.0, 5.0),
        )
    }

    #[test]
    fn test_totals_are_slot_sums() {
        let plan = sample_plan();
        assert_eq!(plan.total_calories(), 2000.0);
        assert_eq!(plan.total_protein(), 90.0);
        assert_eq!(plan.total_carbs(), 40.0);
        assert_eq!(plan.total_fat(), 20.0);
    }

    #[test]
    fn test_with_slot_recomputes_and_leaves_original() {
        let plan = sample_plan();
        let next = plan.with_slot(MealSlot::Snack, food("s2", MealSlot::Snack, 150.0, 8.0));

        assert_eq!(next.total_calories(), 1950.0);
        assert_eq!(next.total_protein(), 93.0);
        assert_eq!(plan.slot(MealSlot::Snack).id, "s");
        assert_eq!(next.slot(MealSlot::Lunch).id, "l");
    }

    #[test]
    fn test_other_slot_ids() {
        let ids = sample_plan().other_slot_ids(MealSlot::Lunch);
        assert_eq!(ids, vec!["b", "d", "s"]);
    }

    #[test]
    fn test_deserialize_recomputes_totals() {
        let plan = sample_plan();
        let mut value = serde_json::to_value(&plan).unwrap();
        value["totals"]["calories"] = serde_json::json!(1.0);

        let reloaded: DailyMealPlan = serde_json::from_value(value).unwrap();
        assert_eq!(reloaded.total_calories(), 2000.0);
        assert_eq!(reloaded, plan);
    }
}
