pub mod prompts;
pub mod render;

pub use prompts::{
    parse_numeric_input, prompt_food_choice, prompt_meal_consumed, prompt_water_glasses,
    prompt_yes_no,
};
pub use render::{
    display_day, display_food_list, display_meal_plan, display_report, display_trend,
};
