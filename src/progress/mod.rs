//! Read-only reporting views over day aggregates and the weight log.

pub mod export;
pub mod reporting;
pub mod trend;

pub use export::{write_report_csv, write_trend_csv};
pub use reporting::{
    DayRow, GoalCounts, PeriodReport, build_report, current_streak, goal_met_counts,
    longest_streak, monthly_slice, period_slice, weekly_slice, window_start,
};
pub use trend::{BmiCategory, TrendPoint, bmi, weight_change, weight_trend};
