pub mod constants;
pub mod generator;
pub mod selection;
pub mod validation;

pub use constants::*;
pub use generator::{PlanOptions, generate_plan, regenerate_slot, slot_targets};
pub use selection::{
    MealSelectionFilter, SelectionPass, ToleranceBand, filter_pool, nearest_ties, select_meal,
    within_tolerance,
};
pub use validation::{PlanValidation, PlanWarning, validate_plan};
