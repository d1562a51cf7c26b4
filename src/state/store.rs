use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{Days, Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::models::{DailyGoals, DailyMealPlan, DayAggregate, FoodItem, MealItem, MealSlot};
use crate::state::persistence::PlanStorage;

/// Source of "today" for date-scoped operations.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Date-keyed day aggregates: the single mutable source of truth for
/// schedules, consumption, water and tasks.
pub struct ProgressStore {
    days: BTreeMap<NaiveDate, DayAggregate>,
    dirty: BTreeSet<NaiveDate>,
    goals: DailyGoals,
    default_tasks: Vec<String>,
    clock: Box<dyn Clock>,
}

impl ProgressStore {
    pub fn new(goals: DailyGoals, default_tasks: Vec<String>) -> Self {
        Self {
            days: BTreeMap::new(),
            dirty: BTreeSet::new(),
            goals,
            default_tasks,
            clock: Box::new(SystemClock),
        }
    }

    /// Store seeded with the config's default goals and tasks.
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.default_goals, config.default_tasks.clone())
    }

    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Goals given to newly created aggregates.
    pub fn set_goals(&mut self, goals: DailyGoals) {
        self.goals = goals;
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Pull every stored aggregate into memory.
    pub fn load_from(&mut self, storage: &dyn PlanStorage) -> Result<usize> {
        let mut loaded = 0;
        for date in storage.dates()? {
            if let Some(aggregate) = storage.load(date)? {
                self.days.insert(date, aggregate);
                loaded += 1;
            }
        }
        debug!(loaded, "loaded day aggregates");
        Ok(loaded)
    }

    /// Write back aggregates changed since the last persist.
    pub fn persist(&mut self, storage: &mut dyn PlanStorage) -> Result<usize> {
        let changed: Vec<&DayAggregate> = self
            .dirty
            .iter()
            .filter_map(|date| self.days.get(date))
            .collect();
        let count = changed.len();
        if count > 0 {
            storage.save_all(&changed)?;
        }
        self.dirty.clear();
        debug!(count, "persisted day aggregates");
        Ok(count)
    }

    pub fn get_plan_for_date(&self, date: NaiveDate) -> Option<&DayAggregate> {
        self.days.get(&date)
    }

    pub fn get_today_plan(&self) -> Option<&DayAggregate> {
        self.get_plan_for_date(self.today())
    }

    pub fn require_plan_for_date(&self, date: NaiveDate) -> Result<&DayAggregate> {
        self.get_plan_for_date(date)
            .ok_or(PlannerError::NoAggregateForDate(date))
    }

    pub fn days(&self) -> &BTreeMap<NaiveDate, DayAggregate> {
        &self.days
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Aggregate for `date`, created with the current goals if absent.
    fn day_mut(&mut self, date: NaiveDate) -> &mut DayAggregate {
        self.dirty.insert(date);
        let goals = self.goals;
        let tasks = &self.default_tasks;
        self.days.entry(date).or_insert_with(|| {
            debug!(%date, "creating day aggregate");
            DayAggregate::new(date, goals, tasks)
        })
    }

    /// Schedule `food` into `slot` on `date`, returning the meal item id.
    ///
    /// An item with the same id is refreshed in place (consumed flag kept).
    /// Otherwise un-consumed items already in the same slot are replaced.
    /// Other slots and consumed items are left alone.
    pub fn schedule_meal(&mut self, food: &FoodItem, date: NaiveDate, slot: MealSlot) -> String {
        let item = MealItem::from_food(food, date, slot);
        let id = item.id.clone();
        let day = self.day_mut(date);

        if let Some(existing) = day.meals.iter_mut().find(|m| m.id == item.id) {
            let consumed = existing.consumed;
            *existing = MealItem { consumed, ..item };
            if consumed && !day.manual_override {
                day.recompute_consumed();
            }
        } else {
            day.meals
                .retain(|m| m.meal_type != slot || m.consumed);
            day.meals.push(item);
        }

        info!(%date, %slot, meal_id = %id, "scheduled meal");
        id
    }

    /// Schedule every slot of a generated plan on the plan's date.
    pub fn schedule_plan(&mut self, plan: &DailyMealPlan) -> Vec<String> {
        plan.items()
            .into_iter()
            .map(|(slot, food)| self.schedule_meal(food, plan.date(), slot))
            .collect()
    }

    /// Set a meal's consumed flag and recompute that day's consumed totals
    /// from scratch.
    pub fn mark_consumed(&mut self, meal_id: &str, consumed: bool) -> Result<&DayAggregate> {
        let date = self
            .days
            .iter()
            .find(|(_, day)| day.meal(meal_id).is_some())
            .map(|(date, _)| *date)
            .ok_or_else(|| PlannerError::MealNotFound(meal_id.to_string()))?;

        let day = self.day_mut(date);
        if day.manual_override {
            warn!(
                %date,
                calories = day.consumed_calories,
                protein = day.consumed_protein,
                "meal toggle overwrites manually logged progress"
            );
        }
        if let Some(meal) = day.meals.iter_mut().find(|m| m.id == meal_id) {
            meal.consumed = consumed;
        }
        day.recompute_consumed();

        info!(
            %date,
            meal_id,
            consumed,
            consumed_calories = day.consumed_calories,
            "updated meal consumption"
        );
        Ok(&*day)
    }

    /// Set today's water glasses, clamped to the day's goal.
    pub fn update_water_intake(&mut self, glasses: u32) -> u32 {
        let today = self.today();
        let day = self.day_mut(today);
        day.water_glasses = glasses.min(day.goals.water);
        day.water_glasses
    }

    /// Add (or remove, for negative `delta`) glasses of water today.
    pub fn adjust_water(&mut self, delta: i32) -> u32 {
        let today = self.today();
        let current = self
            .get_plan_for_date(today)
            .map(|d| d.water_glasses)
            .unwrap_or(0);
        let next = current.saturating_add_signed(delta);
        self.update_water_intake(next)
    }

    /// Flip a task's completion on today's aggregate; returns the new state.
    pub fn toggle_task(&mut self, task_id: &str) -> Result<bool> {
        let today = self.today();
        let day = self.day_mut(today);
        let task = day
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| PlannerError::TaskNotFound(task_id.to_string()))?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Manually set today's consumed totals.
    ///
    /// Bypasses the "sum over consumed meals" rule. The override holds until
    /// the next consumption toggle on the same day, which recomputes from
    /// meals and discards it.
    pub fn update_progress(&mut self, calories: f64, protein: f64) -> Result<()> {
        for (label, value) in [("calories", calories), ("protein", protein)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerError::InvalidNumericInput(format!(
                    "{} must be a non-negative number, got {}",
                    label, value
                )));
            }
        }

        let today = self.today();
        let day = self.day_mut(today);
        day.consumed_calories = calories;
        day.consumed_protein = protein;
        day.manual_override = true;
        info!(%today, calories, protein, "manual progress override");
        Ok(())
    }

    /// Foods scheduled in the trailing `days`-day window ending on `today`.
    pub fn recent_food_ids(&self, today: NaiveDate, days: u32) -> HashSet<String> {
        if days == 0 {
            return HashSet::new();
        }
        let start = today
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .unwrap_or(NaiveDate::MIN);

        self.days
            .range(start..=today)
            .flat_map(|(_, day)| day.meals.iter().map(|m| m.food_id.clone()))
            .collect()
    }
}
