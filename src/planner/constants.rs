/// Daily calorie target when none is given.
pub const DEFAULT_TARGET_CALORIES: f64 = 2000.0;

// ─────────────────────────────────────────────────────────────────────────────
// Calorie distribution across slots (must sum to 1.0)
// ─────────────────────────────────────────────────────────────────────────────

pub const BREAKFAST_RATIO: f64 = 0.25;
pub const LUNCH_RATIO: f64 = 0.35;
pub const DINNER_RATIO: f64 = 0.30;
pub const SNACK_RATIO: f64 = 0.10;

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance bands (kcal distance from slot target)
// ─────────────────────────────────────────────────────────────────────────────

/// Initial generation, main meals.
pub const TIGHT_TOLERANCE_MAIN: f64 = 100.0;

/// Initial generation, snack.
pub const TIGHT_TOLERANCE_SNACK: f64 = 75.0;

/// Regeneration, main meals. Wider for more variety.
pub const WIDE_TOLERANCE_MAIN: f64 = 200.0;

/// Regeneration, snack.
pub const WIDE_TOLERANCE_SNACK: f64 = 150.0;

/// Upper bound for the "quick" preference, in minutes.
pub const QUICK_PREP_MAX_MINUTES: u32 = 30;

/// Days of history whose scheduled foods are excluded from a fresh plan.
pub const RECENT_REPEAT_DAYS: u32 = 3;

// ─────────────────────────────────────────────────────────────────────────────
// Plan validation thresholds
// ─────────────────────────────────────────────────────────────────────────────

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Max relative deviation of plan calories from target.
pub const MAX_CALORIE_DEVIATION: f64 = 0.10;

/// Minimum share of calories coming from protein.
pub const MIN_PROTEIN_CALORIE_SHARE: f64 = 0.15;

/// Acceptable share of calories coming from carbs.
pub const CARB_CALORIE_SHARE_MIN: f64 = 0.45;
pub const CARB_CALORIE_SHARE_MAX: f64 = 0.65;

// ─────────────────────────────────────────────────────────────────────────────
// Daily goals and reporting
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_PROTEIN_GOAL: f64 = 90.0;
pub const DEFAULT_WATER_GOAL: u32 = 8;

/// A day counts as "goal met" at this fraction of the goal.
pub const GOAL_MET_RATIO: f64 = 0.9;

pub const DEFAULT_TASKS: &[&str] = &[
    "Drink 8 glasses of water",
    "Eat a vegetable with lunch and dinner",
    "Take a 20 minute walk",
];

