use dialoguer::{Confirm, Input, Select};

use crate::error::{PlannerError, Result};
use crate::models::{FoodItem, MealItem};

/// Parse a user-entered amount. Blank input counts as 0; anything that is
/// not a finite, non-negative number is rejected so it never reaches totals.
pub fn parse_numeric_input(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| PlannerError::InvalidNumericInput(format!("'{}' is not a number", trimmed)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(PlannerError::InvalidNumericInput(format!(
            "'{}' must be a non-negative number",
            trimmed
        )));
    }
    Ok(value)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Ask whether a scheduled meal was eaten, defaulting to its current state.
pub fn prompt_meal_consumed(meal: &MealItem) -> Result<bool> {
    prompt_yes_no(
        &format!(
            "Did you eat {} ({}, {:.0} kcal)?",
            meal.name, meal.meal_type, meal.calories
        ),
        meal.consumed,
    )
}

/// Prompt for today's water glasses.
pub fn prompt_water_glasses(current: u32, goal: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt(format!("Glasses of water so far (goal {})", goal))
        .default(current.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PlannerError::InvalidNumericInput(format!("'{}' is not a whole number", input)))
}

/// Let the user pick one of several fuzzy matches.
pub fn prompt_food_choice<'a>(matches: &[&'a FoodItem]) -> Result<Option<&'a FoodItem>> {
    match matches {
        [] => Ok(None),
        [only] => {
            let confirm = prompt_yes_no(&format!("Did you mean '{}'?", only.name), true)?;
            Ok(confirm.then_some(*only))
        }
        _ => {
            let options: Vec<String> = matches
                .iter()
                .take(5)
                .map(|f| format!("{} ({}, {:.0} kcal)", f.name, f.category, f.calories))
                .collect();

            let mut selection_options = options.clone();
            selection_options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&selection_options)
                .default(0)
                .interact()?;

            Ok(matches.get(selection).copied().filter(|_| selection < options.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_input() {
        assert_eq!(parse_numeric_input("1500").unwrap(), 1500.0);
        assert_eq!(parse_numeric_input(" 72.5 ").unwrap(), 72.5);
        assert_eq!(parse_numeric_input("").unwrap(), 0.0);
        for bad in ["abc", "-5", "NaN", "inf", "12kcal"] {
            assert!(matches!(
                parse_numeric_input(bad),
                Err(PlannerError::InvalidNumericInput(_))
            ));
        }
    }
}
