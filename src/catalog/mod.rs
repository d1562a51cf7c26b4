//! Static, read-only food catalog grouped by meal slot.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use strsim::jaro_winkler;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::models::{CatalogEntry, FoodItem, MealSlot};

/// Catalog JSON compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Minimum Jaro-Winkler score for a fuzzy name match.
const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Categorized food lookup used by the planner.
pub trait CatalogProvider {
    /// Foods for one slot. Empty means the slot is misconfigured.
    fn foods_by_slot(&self, slot: MealSlot) -> &[FoodItem];

    /// Look up a food by id.
    fn find(&self, id: &str) -> Option<&FoodItem>;
}

/// In-memory catalog built once at startup.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    by_slot: HashMap<MealSlot, Vec<FoodItem>>,
}

impl FoodCatalog {
    /// Build from raw entries, deduplicating by id (last occurrence wins) and
    /// dropping invalid entries.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut order: Vec<String> = Vec::new();
        let mut seen: HashMap<String, FoodItem> = HashMap::new();
        for entry in entries {
            let food = FoodItem::from(entry);
            if !food.is_valid() {
                debug!(food = %food.debug_string(), "skipping invalid catalog entry");
                continue;
            }
            if !seen.contains_key(&food.id) {
                order.push(food.id.clone());
            }
            seen.insert(food.id.clone(), food);
        }

        let mut by_slot: HashMap<MealSlot, Vec<FoodItem>> = HashMap::new();
        for id in order {
            if let Some(food) = seen.remove(&id) {
                by_slot.entry(food.category).or_default().push(food);
            }
        }
        Self { by_slot }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load the catalog from `path` when given, otherwise the built-in one.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                Self::from_json(&content)
            }
            None => Self::builtin(),
        }
    }

    /// Fail loudly when any slot has no items.
    pub fn ensure_complete(&self) -> Result<()> {
        for slot in MealSlot::ALL {
            if self.foods_by_slot(slot).is_empty() {
                return Err(PlannerError::CatalogEmpty(slot.to_string()));
            }
        }
        Ok(())
    }

    pub fn all_foods(&self) -> impl Iterator<Item = &FoodItem> {
        MealSlot::ALL
            .into_iter()
            .flat_map(move |slot| self.foods_by_slot(slot).iter())
    }

    pub fn len(&self) -> usize {
        self.by_slot.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Foods whose name or localized name matches `query`: exact
    /// (case-insensitive) matches first, otherwise fuzzy matches best first.
    pub fn search(&self, query: &str) -> Vec<&FoodItem> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let exact: Vec<&FoodItem> = self
            .all_foods()
            .filter(|f| f.name.to_lowercase() == query || f.local_name.to_lowercase() == query)
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        let mut scored: Vec<(&FoodItem, f64)> = self
            .all_foods()
            .map(|f| {
                let score = jaro_winkler(&f.name.to_lowercase(), &query)
                    .max(jaro_winkler(&f.local_name.to_lowercase(), &query));
                (f, score)
            })
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(f, _)| f).collect()
    }
}

impl CatalogProvider for FoodCatalog {
    fn foods_by_slot(&self, slot: MealSlot) -> &[FoodItem] {
        self.by_slot.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    fn find(&self, id: &str) -> Option<&FoodItem> {
        self.by_slot.values().flatten().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalog_covers_every_slot() {
        let catalog = FoodCatalog::builtin().unwrap();
        catalog.ensure_complete().unwrap();
        for slot in MealSlot::ALL {
            assert!(
                catalog
                    .foods_by_slot(slot)
                    .iter()
                    .all(|f| f.category == slot)
            );
        }
        assert!(catalog.all_foods().any(|f| f.is_vegan));
    }

    #[test]
    fn test_builtin_diet_flags() {
        let catalog = FoodCatalog::builtin().unwrap();
        let flags = |id: &str| {
            let food = catalog.find(id).unwrap();
            (food.is_vegetarian, food.is_vegan)
        };

        assert_eq!(flags("d-07"), (true, true)); // Lentil Kofte
        assert_eq!(flags("d-05"), (false, false)); // Grilled Meatballs
        assert_eq!(flags("l-05"), (false, false)); // Beef Kofte with Rice
        assert_eq!(flags("b-02"), (true, false)); // Menemen
        assert_eq!(flags("b-06"), (true, true)); // Peanut Butter Oats
        assert_eq!(flags("d-09"), (true, true)); // Stuffed Eggplant
        assert_eq!(flags("b-10"), (false, false)); // Smoked Salmon Bagel

        let vegan_dinners: Vec<&str> = catalog
            .foods_by_slot(MealSlot::Dinner)
            .iter()
            .filter(|f| f.is_vegan)
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(vegan_dinners, vec!["d-03", "d-04", "d-07", "d-09", "d-11"]);
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = FoodCatalog::builtin().unwrap();
        let mut ids: Vec<&str> = catalog.all_foods().map(|f| f.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_duplicate_ids_last_wins() {
        let json = r#"[
            {"id": "x", "name": "Old", "calories": 100, "protein": 1, "carbs": 20, "fat": 0, "category": "snack"},
            {"id": "x", "name": "New", "calories": 120, "protein": 2, "carbs": 22, "fat": 1, "category": "snack"}
        ]"#;
        let catalog = FoodCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("x").unwrap().name, "New");
    }

    #[test]
    fn test_ensure_complete_reports_missing_slot() {
        let json = r#"[
            {"id": "s", "name": "Banana", "calories": 105, "protein": 1, "carbs": 27, "fat": 0, "category": "snack"}
        ]"#;
        let catalog = FoodCatalog::from_json(json).unwrap();
        match catalog.ensure_complete() {
            Err(PlannerError::CatalogEmpty(slot)) => assert_eq!(slot, "breakfast"),
            other => panic!("expected CatalogEmpty, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let json = r#"[
            {"id": "b", "name": "Toast", "calories": 200, "protein": 6, "carbs": 30, "fat": 5, "category": "breakfast"}
        ]"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = FoodCatalog::load(Some(file.path())).unwrap();
        assert_eq!(catalog.foods_by_slot(MealSlot::Breakfast).len(), 1);
    }

    #[test]
    fn test_search_exact_and_fuzzy() {
        let catalog = FoodCatalog::builtin().unwrap();
        let exact = catalog.search("menemen");
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].id, "b-02");

        let fuzzy = catalog.search("chia puding");
        assert!(!fuzzy.is_empty());
        assert_eq!(fuzzy[0].id, "b-11");
    }
}
