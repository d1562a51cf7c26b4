use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// One of the four daily planning buckets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    /// All slots in plan order.
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }

    /// Main meals get the wider tolerance bands; snacks the narrower ones.
    pub fn is_main_meal(&self) -> bool {
        !matches!(self, MealSlot::Snack)
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snack" => Ok(MealSlot::Snack),
            other => Err(PlannerError::InvalidInput(format!(
                "unknown meal slot '{}'",
                other
            ))),
        }
    }
}

/// Meat and fish tokens; any hit rules out vegetarian.
const MEAT_TOKENS: &[&str] = &[
    "chicken", "beef", "lamb", "veal", "turkey", "meat", "meatball", "steak", "mince", "bacon",
    "ham", "sausage", "salami", "pastrami", "fish", "salmon", "tuna", "sardine", "anchovy",
    "mackerel", "trout", "shrimp", "prawn", "seafood", "doner",
];

/// Animal-product tokens that are still vegetarian.
const ANIMAL_PRODUCT_TOKENS: &[&str] = &[
    "egg", "omelette", "omelet", "milk", "cheese", "feta", "yogurt", "yoghurt", "ayran", "kefir",
    "butter", "cream", "labneh", "honey", "whey", "ghee",
];

/// Plant-based phrases stripped before tokenizing so they don't trip the block-list.
const PLANT_PHRASES: &[&str] = &[
    "peanut butter",
    "almond butter",
    "almond milk",
    "oat milk",
    "soy milk",
    "coconut milk",
    "coconut yogurt",
    "soy yogurt",
    "coconut cream",
];

fn contains_token(text: &str, block_list: &[&str]) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .any(|token| {
            block_list.iter().any(|kw| {
                token == *kw
                    || token.strip_suffix('s') == Some(*kw)
                    || token.strip_suffix("es") == Some(*kw)
            })
        })
}

/// Derive (vegetarian, vegan) from a food's name, localized name and
/// description.
pub fn derive_diet_flags(name: &str, local_name: &str, description: &str) -> (bool, bool) {
    let mut text = format!("{} {} {}", name, local_name, description).to_lowercase();
    for phrase in PLANT_PHRASES {
        text = text.replace(phrase, " ");
    }

    let vegetarian = !contains_token(&text, MEAT_TOKENS);
    let vegan = vegetarian && !contains_token(&text, ANIMAL_PRODUCT_TOKENS);
    (vegetarian, vegan)
}

/// Raw catalog record as it appears in catalog JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub local_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    pub category: MealSlot,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub portion: String,
    #[serde(default)]
    pub preparation_time: String,
    #[serde(default)]
    pub tips: String,
}

/// Immutable catalog food with derived diet flags.
///
/// Once copied into a plan or a day schedule the values are frozen; later
/// catalog edits never reach historical records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub local_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub category: MealSlot,
    pub description: String,
    pub portion: String,
    pub preparation_time: String,
    pub tips: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
}

impl From<CatalogEntry> for FoodItem {
    fn from(entry: CatalogEntry) -> Self {
        let (is_vegetarian, is_vegan) =
            derive_diet_flags(&entry.name, &entry.local_name, &entry.description);
        Self {
            id: entry.id,
            name: entry.name,
            local_name: entry.local_name,
            calories: entry.calories,
            protein: entry.protein,
            carbs: entry.carbs,
            fat: entry.fat,
            fiber: entry.fiber,
            category: entry.category,
            description: entry.description,
            portion: entry.portion,
            preparation_time: entry.preparation_time,
            tips: entry.tips,
            is_vegetarian,
            is_vegan,
        }
    }
}

impl FoodItem {
    /// Preparation time in minutes, parsed from the leading integer of the
    /// free-text field ("15 minutes" -> 15).
    pub fn prep_minutes(&self) -> Option<u32> {
        let digits: String = self
            .preparation_time
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// Basic validation: non-negative macros and a non-empty id.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
            && self.calories >= 0.0
            && self.protein >= 0.0
            && self.carbs >= 0.0
            && self.fat >= 0.0
            && self.fiber >= 0.0
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} ({}): {} kcal, P:{} C:{} F:{}",
            self.name, self.id, self.calories, self.protein, self.carbs, self.fat
        )
    }
}

impl PartialEq for FoodItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FoodItem {}
