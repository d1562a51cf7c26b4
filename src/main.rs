use std::collections::HashSet;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use daily_meal_planner_rs::catalog::FoodCatalog;
use daily_meal_planner_rs::cli::{Cli, Command, PreferenceArgs};
use daily_meal_planner_rs::config::{PlannerConfig, load_config};
use daily_meal_planner_rs::error::{PlannerError, Result};
use daily_meal_planner_rs::interface::{
    display_day, display_food_list, display_meal_plan, display_report, display_trend,
    parse_numeric_input, prompt_food_choice, prompt_meal_consumed, prompt_water_glasses,
};
use daily_meal_planner_rs::logging::init_logging;
use daily_meal_planner_rs::models::{MealSlot, UserProfile};
use daily_meal_planner_rs::planner::{PlanOptions, generate_plan, regenerate_slot, validate_plan};
use daily_meal_planner_rs::progress::{
    build_report, weight_trend, window_start, write_report_csv, write_trend_csv,
};
use daily_meal_planner_rs::state::{
    JsonFileStorage, ProgressStore, load_plan, load_profile, save_plan, save_profile,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Everything a command may need, loaded once.
struct App {
    config: PlannerConfig,
    catalog: FoodCatalog,
    profile: Option<UserProfile>,
    storage: JsonFileStorage,
    store: ProgressStore,
}

impl App {
    fn load(cli: &Cli) -> Result<Self> {
        let config = load_config(cli.config.as_deref())?;
        let catalog = FoodCatalog::load(cli.catalog.as_deref())?;
        catalog.ensure_complete()?;

        let profile = if cli.profile.exists() {
            Some(load_profile(&cli.profile)?)
        } else {
            debug!(path = %cli.profile.display(), "no profile file, using config goals");
            None
        };

        let storage = JsonFileStorage::new(&cli.data);
        let mut store = ProgressStore::from_config(&config);
        if let Some(profile) = &profile {
            store.set_goals(profile.goals());
        }
        store.load_from(&storage)?;

        Ok(Self {
            config,
            catalog,
            profile,
            storage,
            store,
        })
    }

    fn target_calories(&self, prefs: &PreferenceArgs) -> f64 {
        prefs
            .calories
            .or_else(|| self.profile.as_ref().map(|p| p.calorie_goal))
            .unwrap_or(self.config.default_target_calories)
    }

    fn plan_options(&self, prefs: &PreferenceArgs, excluded_ids: HashSet<String>) -> PlanOptions {
        PlanOptions {
            target_calories: Some(self.target_calories(prefs)),
            vegetarian_only: prefs.vegetarian,
            vegan_only: prefs.vegan,
            high_protein: prefs.high_protein,
            quick_only: prefs.quick,
            excluded_ids,
            date: Some(self.store.today()),
        }
    }

    fn require_profile(&self) -> Result<&UserProfile> {
        self.profile.as_ref().ok_or_else(|| {
            PlannerError::InvalidInput("no profile found; create profile.json first".to_string())
        })
    }

    fn persist(&mut self) -> Result<()> {
        let saved = self.store.persist(&mut self.storage)?;
        debug!(saved, "saved day aggregates");
        Ok(())
    }
}

fn rng_for(prefs: &PreferenceArgs) -> StdRng {
    match prefs.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut app = App::load(&cli)?;
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan { prefs, schedule } => cmd_plan(&mut app, &cli.plan_file, &prefs, schedule),
        Command::Regenerate {
            slot,
            prefs,
            schedule,
        } => cmd_regenerate(&mut app, &cli.plan_file, slot, &prefs, schedule),
        Command::Show { date } => {
            let date = date.unwrap_or_else(|| app.store.today());
            match app.store.get_plan_for_date(date) {
                Some(day) => display_day(day),
                None => println!("Nothing logged for {}.", date),
            }
            Ok(())
        }
        Command::Schedule { food, slot, date } => cmd_schedule(&mut app, &food, slot, date),
        Command::Consume { meal_id, undo } => {
            let day = app.store.mark_consumed(&meal_id, !undo)?;
            display_day(day);
            app.persist()
        }
        Command::Water { glasses, add } => {
            let total = if add {
                app.store.adjust_water(glasses)
            } else {
                let glasses = u32::try_from(glasses).map_err(|_| {
                    PlannerError::InvalidNumericInput(format!(
                        "water glasses must be non-negative, got {}",
                        glasses
                    ))
                })?;
                app.store.update_water_intake(glasses)
            };
            println!("Water today: {} glasses", total);
            app.persist()
        }
        Command::Task { task_id } => {
            let completed = app.store.toggle_task(&task_id)?;
            let state = if completed { "done" } else { "not done" };
            println!("Task {} marked {}.", task_id, state);
            app.persist()
        }
        Command::Progress { calories, protein } => {
            let calories = parse_numeric_input(&calories)?;
            let protein = parse_numeric_input(&protein)?;
            app.store.update_progress(calories, protein)?;
            println!(
                "Logged {:.0} kcal and {:.1} g protein for today.",
                calories, protein
            );
            println!("Note: marking a meal eaten today will recompute these from meals.");
            app.persist()
        }
        Command::Log => cmd_log(&mut app),
        Command::Weight { kg, date } => cmd_weight(&mut app, &cli.profile, &kg, date),
        Command::Report {
            days,
            from,
            to,
            csv,
        } => {
            let today = app.store.today();
            let to = to.unwrap_or(today);
            let from = from.unwrap_or_else(|| window_start(to, days.max(1)));
            let report = build_report(app.store.days(), from, to, today)?;
            display_report(&report);
            if let Some(path) = csv {
                write_report_csv(&report, &path)?;
                println!("Report written to {}", path.display());
            }
            Ok(())
        }
        Command::Trend { csv } => {
            let profile = app.require_profile()?;
            let trend = weight_trend(profile);
            display_trend(&trend);
            println!(
                "Current weight {:.1} kg, BMR {:.0} kcal/day",
                profile.current_weight(),
                profile.bmr()
            );
            if let Some(path) = csv {
                write_trend_csv(&trend, &path)?;
                println!("Trend written to {}", path.display());
            }
            Ok(())
        }
        Command::Find { query } => {
            let matches = app.catalog.search(&query);
            display_food_list(&matches, &format!("Matches for '{}'", query));
            Ok(())
        }
    }
}

/// Generate a fresh plan for today, avoiding recently scheduled foods.
fn cmd_plan(
    app: &mut App,
    plan_file: &std::path::Path,
    prefs: &PreferenceArgs,
    schedule: bool,
) -> Result<()> {
    let today = app.store.today();
    let recent = app
        .store
        .recent_food_ids(today, app.config.recent_repeat_days);
    let options = app.plan_options(prefs, recent);
    let target = app.target_calories(prefs);

    let mut rng = rng_for(prefs);
    let plan = generate_plan(&app.catalog, &app.config, &options, &mut rng)?;
    let validation = validate_plan(&plan, target);

    display_meal_plan(&plan, target, &validation);
    save_plan(plan_file, &plan)?;

    if schedule {
        let ids = app.store.schedule_plan(&plan);
        println!("Scheduled {} meals for {}.", ids.len(), plan.date());
        app.persist()?;
    }
    Ok(())
}

/// Swap one slot of the saved plan.
fn cmd_regenerate(
    app: &mut App,
    plan_file: &std::path::Path,
    slot: MealSlot,
    prefs: &PreferenceArgs,
    schedule: bool,
) -> Result<()> {
    let Some(plan) = load_plan(plan_file)? else {
        println!("No saved plan found. Run 'plan' first.");
        return Ok(());
    };

    let mut options = app.plan_options(prefs, HashSet::new());
    options.date = Some(plan.date());
    let target = app.target_calories(prefs);

    let mut rng = rng_for(prefs);
    let next = regenerate_slot(&app.catalog, &app.config, &plan, slot, &options, &mut rng)?;
    let validation = validate_plan(&next, target);

    display_meal_plan(&next, target, &validation);
    save_plan(plan_file, &next)?;

    if schedule {
        let food = next.slot(slot);
        let id = app.store.schedule_meal(food, next.date(), slot);
        println!("Scheduled {} as {}.", food.name, id);
        app.persist()?;
    }
    Ok(())
}

/// Schedule a food looked up by (fuzzy) name.
fn cmd_schedule(
    app: &mut App,
    query: &str,
    slot: MealSlot,
    date: Option<chrono::NaiveDate>,
) -> Result<()> {
    let matches = app.catalog.search(query);
    let food = match prompt_food_choice(&matches)? {
        Some(food) => food.clone(),
        None => return Err(PlannerError::FoodNotFound(query.to_string())),
    };

    let date = date.unwrap_or_else(|| app.store.today());
    let id = app.store.schedule_meal(&food, date, slot);
    println!("Scheduled {} for {} {} ({}).", food.name, date, slot, id);
    app.persist()
}

/// Interactive walk through today's meals and water.
fn cmd_log(app: &mut App) -> Result<()> {
    let today = app.store.today();
    let meals = app
        .store
        .get_plan_for_date(today)
        .map(|d| d.meals.clone())
        .unwrap_or_default();

    if meals.is_empty() {
        println!("No meals scheduled today. Use 'plan --schedule' first.");
    }

    for meal in &meals {
        let eaten = prompt_meal_consumed(meal)?;
        if eaten != meal.consumed {
            app.store.mark_consumed(&meal.id, eaten)?;
        }
    }

    let (current, goal) = app
        .store
        .get_plan_for_date(today)
        .map(|d| (d.water_glasses, d.goals.water))
        .unwrap_or((0, app.config.default_goals.water));
    let glasses = prompt_water_glasses(current, goal)?;
    app.store.update_water_intake(glasses);

    if let Some(day) = app.store.get_today_plan() {
        display_day(day);
    }
    app.persist()
}

/// Append a weight to the profile's log. The account-creation baseline is
/// left untouched.
fn cmd_weight(
    app: &mut App,
    profile_path: &std::path::Path,
    raw_kg: &str,
    date: Option<chrono::NaiveDate>,
) -> Result<()> {
    let kg = parse_numeric_input(raw_kg)?;
    if kg <= 0.0 {
        return Err(PlannerError::InvalidNumericInput(format!(
            "weight must be positive, got {}",
            raw_kg
        )));
    }

    let date = date.unwrap_or_else(|| app.store.today());
    let profile = app.profile.as_mut().ok_or_else(|| {
        PlannerError::InvalidInput("no profile found; create profile.json first".to_string())
    })?;
    profile.log_weight(date, kg);
    save_profile(profile_path, profile)?;

    println!("Logged {:.1} kg on {}.", kg, date);
    Ok(())
}
