use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::models::MealSlot;

/// Daily meal planner: generates meal plans and tracks daily nutrition progress.
#[derive(Parser, Debug)]
#[command(name = "daily_meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the day aggregates JSON file.
    #[arg(short, long, default_value = "meal_days.json")]
    pub data: PathBuf,

    /// Path to the user profile JSON file.
    #[arg(short, long, default_value = "profile.json")]
    pub profile: PathBuf,

    /// Path to the last generated plan.
    #[arg(long, default_value = "current_plan.json")]
    pub plan_file: PathBuf,

    /// Custom food catalog JSON (built-in catalog when omitted).
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Planner settings JSON.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Dietary preferences shared by plan and regenerate.
#[derive(Args, Debug, Clone, Default)]
pub struct PreferenceArgs {
    /// Daily calorie target (profile goal or config default when omitted).
    #[arg(short, long)]
    pub calories: Option<f64>,

    /// Only vegetarian foods.
    #[arg(long)]
    pub vegetarian: bool,

    /// Only vegan foods.
    #[arg(long)]
    pub vegan: bool,

    /// Prefer foods with above-average protein.
    #[arg(long)]
    pub high_protein: bool,

    /// Only foods ready in 30 minutes or less.
    #[arg(long)]
    pub quick: bool,

    /// Random seed for reproducible picks.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate today's meal plan.
    Plan {
        #[command(flatten)]
        prefs: PreferenceArgs,

        /// Add the plan to today's schedule.
        #[arg(long)]
        schedule: bool,
    },

    /// Regenerate one slot of the current plan.
    Regenerate {
        /// Slot to replace.
        #[arg(value_enum)]
        slot: MealSlot,

        #[command(flatten)]
        prefs: PreferenceArgs,

        /// Add the new plan to the schedule.
        #[arg(long)]
        schedule: bool,
    },

    /// Show the schedule and progress for a day (today by default).
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Schedule a catalog food by name into a slot.
    Schedule {
        /// Food name (fuzzy matched).
        food: String,

        #[arg(value_enum)]
        slot: MealSlot,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Mark a scheduled meal as eaten.
    Consume {
        meal_id: String,

        /// Mark as not eaten instead.
        #[arg(long)]
        undo: bool,
    },

    /// Set today's water glasses, or adjust with --add.
    Water {
        #[arg(allow_negative_numbers = true)]
        glasses: i32,

        /// Treat the value as a change rather than a total.
        #[arg(long)]
        add: bool,
    },

    /// Toggle a daily task.
    Task { task_id: String },

    /// Manually log today's consumed totals.
    Progress { calories: String, protein: String },

    /// Walk through today's meals and water interactively.
    Log,

    /// Log a body weight (kg) for today or a given date.
    Weight {
        kg: String,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Progress report for a period.
    Report {
        /// Number of trailing days ending today.
        #[arg(long, default_value = "7")]
        days: u32,

        /// Explicit start date (overrides --days).
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Explicit end date (defaults to today).
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Also write the report rows to CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show the weight and BMI trend.
    Trend {
        /// Also write the series to CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Search the catalog by name.
    Find { query: String },
}

impl Default for Command {
    fn default() -> Self {
        Command::Show { date: None }
    }
}
