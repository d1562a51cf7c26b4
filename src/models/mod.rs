pub mod day;
pub mod food;
pub mod plan;
pub mod profile;

pub use day::{DailyGoals, DailyTask, DayAggregate, MealItem};
pub use food::{CatalogEntry, FoodItem, MealSlot, derive_diet_flags};
pub use plan::{DailyMealPlan, PlanTotals};
pub use profile::{Gender, ProfileProvider, UserProfile, WeightEntry};
