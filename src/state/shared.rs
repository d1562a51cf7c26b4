use std::sync::{Arc, Mutex};

use crate::error::{PlannerError, Result};
use crate::models::DayAggregate;
use crate::state::store::ProgressStore;

/// Thread-safe handle serializing every mutation of a [`ProgressStore`].
///
/// Each closure runs under one lock, so a toggle's read-modify-write and its
/// recompute can't interleave with another writer.
#[derive(Clone)]
pub struct SharedProgressStore {
    inner: Arc<Mutex<ProgressStore>>,
}

impl SharedProgressStore {
    pub fn new(store: ProgressStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn read<T>(&self, f: impl FnOnce(&ProgressStore) -> T) -> Result<T> {
        let guard = self.inner.lock().map_err(|_| PlannerError::StorePoisoned)?;
        Ok(f(&guard))
    }

    pub fn update<T>(&self, f: impl FnOnce(&mut ProgressStore) -> Result<T>) -> Result<T> {
        let mut guard = self.inner.lock().map_err(|_| PlannerError::StorePoisoned)?;
        f(&mut guard)
    }

    /// Toggle a meal and return a snapshot of the affected day.
    pub fn mark_consumed(&self, meal_id: &str, consumed: bool) -> Result<DayAggregate> {
        self.update(|store| store.mark_consumed(meal_id, consumed).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogEntry, DailyGoals, FoodItem, MealSlot};
    use crate::state::store::FixedClock;
    use chrono::NaiveDate;
    use std::thread;

    fn food(id: &str, calories: f64) -> FoodItem {
        FoodItem::from(CatalogEntry {
            id: id.to_string(),
            name: id.to_string(),
            local_name: String::new(),
            calories,
            protein: 1.0,
            carbs: 0.0,
            fat: 0.0,
            fiber: 0.0,
            category: MealSlot::Snack,
            description: String::new(),
            portion: String::new(),
            preparation_time: String::new(),
            tips: String::new(),
        })
    }

    #[test]
    fn test_concurrent_toggles_do_not_drop_updates() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let mut store = ProgressStore::new(
            DailyGoals {
                calories: 2000.0,
                protein: 90.0,
                water: 8,
            },
            Vec::new(),
        )
        .with_clock(FixedClock(today));

        // Distinct slots per item so scheduling doesn't replace earlier ones.
        let mut ids = Vec::new();
        for (i, slot) in MealSlot::ALL.into_iter().enumerate() {
            ids.push(store.schedule_meal(&food(&format!("f{}", i), 100.0 * (i + 1) as f64), today, slot));
        }

        let shared = SharedProgressStore::new(store);
        let handles: Vec<_> = ids
            .into_iter()
            .map(|id| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        shared.mark_consumed(&id, false).unwrap();
                        shared.mark_consumed(&id, true).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let consumed = shared
            .read(|s| s.get_today_plan().map(|d| (d.consumed_calories, d.consumed_protein)))
            .unwrap()
            .unwrap();
        assert_eq!(consumed, (1000.0, 4.0));
    }
}
