use std::path::PathBuf;

use clap::Parser;

use daily_meal_planner_rs::catalog::FoodCatalog;
use daily_meal_planner_rs::config::load_config;
use daily_meal_planner_rs::error::Result;
use daily_meal_planner_rs::logging::init_logging;
use daily_meal_planner_rs::planner::PlanOptions;
use daily_meal_planner_rs::simulation::{SimulationConfig, print_results, run_simulation, write_csv};

#[derive(Parser, Debug)]
#[command(name = "plan-simulator")]
#[command(about = "Repeated plan generation to compare planner settings")]
struct Args {
    /// Plans generated per calorie target
    #[arg(long, default_value = "200")]
    runs: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Calorie targets to evaluate (comma-separated)
    #[arg(long, default_value = "1500,2000,2500")]
    targets: String,

    /// Custom food catalog JSON
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Planner settings JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the tight tolerance for main meals (kcal)
    #[arg(long)]
    tight_main: Option<f64>,

    /// Override the tight tolerance for snacks (kcal)
    #[arg(long)]
    tight_snack: Option<f64>,

    /// Only vegetarian foods
    #[arg(long)]
    vegetarian: bool,

    /// Only vegan foods
    #[arg(long)]
    vegan: bool,

    /// Output CSV file for the results
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_targets(s: &str) -> Vec<f64> {
    s.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .filter(|t: &f64| t.is_finite() && *t > 0.0)
        .collect()
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(tight) = args.tight_main {
        config.main_meal_tolerance.tight = tight;
    }
    if let Some(tight) = args.tight_snack {
        config.snack_tolerance.tight = tight;
    }
    config.validate()?;

    let catalog = FoodCatalog::load(args.catalog.as_deref())?;
    catalog.ensure_complete()?;

    let targets = parse_targets(&args.targets);
    if targets.is_empty() {
        eprintln!("No valid calorie targets provided.");
        std::process::exit(1);
    }

    let sim = SimulationConfig {
        runs: args.runs,
        seed: args.seed,
        targets,
        options: PlanOptions {
            vegetarian_only: args.vegetarian,
            vegan_only: args.vegan,
            ..Default::default()
        },
    };

    println!(
        "Simulating {} runs per target over {} catalog foods (seed {})...",
        sim.runs,
        catalog.len(),
        sim.seed
    );
    let results = run_simulation(&catalog, &config, &sim)?;
    print_results(&results);

    if let Some(path) = &args.csv {
        write_csv(&results, path)?;
        println!("Wrote results to {}", path.display());
    }
    Ok(())
}
