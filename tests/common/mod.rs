#![allow(dead_code)]

use chrono::NaiveDate;

use daily_meal_planner_rs::models::{FoodItem, MealSlot};

pub fn make_food(id: &str, slot: MealSlot, calories: f64) -> FoodItem {
    FoodItem {
        id: id.to_string(),
        name: format!("Food {}", id),
        local_name: String::new(),
        calories,
        protein: 10.0,
        carbs: 30.0,
        fat: 8.0,
        fiber: 3.0,
        category: slot,
        description: String::new(),
        portion: "1 plate".to_string(),
        preparation_time: "20 minutes".to_string(),
        tips: String::new(),
        is_vegetarian: true,
        is_vegan: true,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
