use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Catalog has no items for {0}")]
    CatalogEmpty(String),

    #[error("No day aggregate for {0}")]
    NoAggregateForDate(NaiveDate),

    #[error("Invalid numeric input: {0}")]
    InvalidNumericInput(String),

    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Progress store lock poisoned")]
    StorePoisoned,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
