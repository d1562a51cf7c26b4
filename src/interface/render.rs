use crate::models::{DailyMealPlan, DayAggregate, FoodItem};
use crate::planner::PlanValidation;
use crate::progress::{BmiCategory, PeriodReport, TrendPoint, weight_change};

/// Display a generated plan with per-slot targets and advisory warnings.
pub fn display_meal_plan(plan: &DailyMealPlan, target_calories: f64, validation: &PlanValidation) {
    println!();
    println!("=== Meal Plan for {} ({:.0} kcal target) ===", plan.date(), target_calories);
    println!();

    let max_name_len = plan
        .items()
        .iter()
        .map(|(_, f)| f.name.len())
        .max()
        .unwrap_or(10);

    for (slot, food) in plan.items() {
        let mut tags = Vec::new();
        if food.is_vegan {
            tags.push("vegan");
        } else if food.is_vegetarian {
            tags.push("vegetarian");
        }

        let tags_str = if tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", tags.join(", "))
        };

        println!(
            "{:>9}: {:<width$} - {:>4.0} kcal | P {:>4.1} C {:>5.1} F {:>4.1} | {}{}",
            slot.as_str(),
            food.name,
            food.calories,
            food.protein,
            food.carbs,
            food.fat,
            food.portion,
            tags_str,
            width = max_name_len
        );
    }

    let totals = plan.totals();
    println!();
    println!("--- Totals ---");
    println!("Calories: {:.0}", totals.calories);
    println!(
        "Protein: {:.1} g | Carbs: {:.1} g | Fat: {:.1} g",
        totals.protein, totals.carbs, totals.fat
    );

    if !validation.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &validation.warnings {
            println!("  - {}", warning);
        }
    }
    println!();
}

/// Display one day's schedule, consumption, water and tasks.
pub fn display_day(day: &DayAggregate) {
    println!();
    println!("=== {} ===", day.date);
    println!();

    if day.meals.is_empty() {
        println!("No meals scheduled.");
    }
    for meal in &day.meals {
        let mark = if meal.consumed { "x" } else { " " };
        println!(
            "[{}] {:>9}: {} - {:.0} kcal, {:.1} g protein  ({})",
            mark,
            meal.meal_type.as_str(),
            meal.name,
            meal.calories,
            meal.protein,
            meal.id
        );
    }

    println!();
    let override_note = if day.manual_override {
        " (manually logged)"
    } else {
        ""
    };
    println!(
        "Calories: {:.0} / {:.0}{}",
        day.consumed_calories, day.goals.calories, override_note
    );
    println!("Protein: {:.1} / {:.1} g", day.consumed_protein, day.goals.protein);
    println!("Water: {} / {} glasses", day.water_glasses, day.goals.water);

    if !day.tasks.is_empty() {
        println!();
        println!("Tasks:");
        for task in &day.tasks {
            let mark = if task.completed { "x" } else { " " };
            println!("  [{}] {} - {}", mark, task.id, task.text);
        }
    }
    println!();
}

/// Display a period report.
pub fn display_report(report: &PeriodReport) {
    println!();
    println!("=== Progress {} to {} ===", report.from, report.to);
    println!();

    for row in &report.rows {
        println!(
            "{}  {:>5.0}/{:<5.0} kcal  {:>5.1}/{:<5.1} g  water {}/{}  meals {}/{}",
            row.date,
            row.consumed_calories,
            row.calorie_goal,
            row.consumed_protein,
            row.protein_goal,
            row.water_glasses,
            row.water_goal,
            row.meals_consumed,
            row.meals_scheduled
        );
    }

    println!();
    println!("--- Summary ---");
    println!("Days logged: {}", report.days_logged);
    println!(
        "Averages: {:.0} kcal, {:.1} g protein, {:.1} glasses",
        report.avg_calories, report.avg_protein, report.avg_water
    );
    println!(
        "Goals met: calories {}, protein {}, water {}",
        report.goals_met.calories, report.goals_met.protein, report.goals_met.water
    );
    println!(
        "Current streak: {} days (longest {})",
        report.current_streak, report.longest_streak
    );
    println!();
}

/// Display the weight/BMI series.
pub fn display_trend(trend: &[TrendPoint]) {
    println!();
    println!("=== Weight Trend ===");
    println!();

    for point in trend {
        let label = if point.is_anchor { "  (start)" } else { "" };
        println!(
            "{}  {:>5.1} kg  BMI {:>4.1} {}{}",
            point.date,
            point.weight_kg,
            point.bmi,
            BmiCategory::classify(point.bmi),
            label
        );
    }

    println!();
    println!("Change since start: {:+.1} kg", weight_change(trend));
    println!();
}

/// Display a simple list of foods with their details.
pub fn display_food_list(foods: &[&FoodItem], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        println!(
            "  {} [{}] {} / {} - {} kcal, P:{} C:{} F:{} Fib:{}, {}",
            food.id,
            food.category,
            food.name,
            food.local_name,
            food.calories,
            food.protein,
            food.carbs,
            food.fat,
            food.fiber,
            food.preparation_time
        );
    }

    println!();
}
