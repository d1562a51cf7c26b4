mod common;

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use tempfile::TempDir;

use common::date;
use daily_meal_planner_rs::models::{DailyGoals, DayAggregate, Gender, UserProfile};
use daily_meal_planner_rs::progress::{
    BmiCategory, bmi, build_report, current_streak, longest_streak, weekly_slice, weight_change,
    weight_trend, write_report_csv,
};

fn goals() -> DailyGoals {
    DailyGoals {
        calories: 2000.0,
        protein: 100.0,
        water: 8,
    }
}

fn logged_day(date: NaiveDate, calories: f64, protein: f64, water: u32) -> DayAggregate {
    let mut day = DayAggregate::new(date, goals(), &[]);
    day.consumed_calories = calories;
    day.consumed_protein = protein;
    day.water_glasses = water;
    day
}

fn history(entries: &[(NaiveDate, f64, f64, u32)]) -> BTreeMap<NaiveDate, DayAggregate> {
    entries
        .iter()
        .map(|&(d, c, p, w)| (d, logged_day(d, c, p, w)))
        .collect()
}

fn profile() -> UserProfile {
    UserProfile {
        weight_kg: 80.0,
        height_cm: 180.0,
        age: 35,
        gender: Gender::Male,
        calorie_goal: 2200.0,
        protein_goal: 120.0,
        water_goal: 8,
        created_on: date(2026, 1, 1),
        weight_log: Vec::new(),
    }
}

#[test]
fn test_trend_anchor_survives_many_logs() {
    let mut profile = profile();
    for i in 0..60 {
        let day = date(2026, 1, 1) + Days::new(i);
        profile.log_weight(day, 80.0 - i as f64 * 0.1);
    }

    let trend = weight_trend(&profile);
    assert_eq!(trend.len(), 61);
    assert!(trend[0].is_anchor);
    assert_eq!(trend[0].weight_kg, 80.0);
    assert_eq!(trend[0].date, date(2026, 1, 1));
    assert!(trend[1..].iter().all(|p| !p.is_anchor));
    assert!((weight_change(&trend) + 5.9).abs() < 1e-9);

    // Logging never rewrites the declared baseline
    assert_eq!(profile.weight_kg, 80.0);
}

#[test]
fn test_trend_sorted_by_date() {
    let mut profile = profile();
    profile.log_weight(date(2026, 3, 1), 78.0);
    profile.log_weight(date(2026, 2, 1), 79.0);

    let dates: Vec<NaiveDate> = weight_trend(&profile).iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![date(2026, 1, 1), date(2026, 2, 1), date(2026, 3, 1)]);
}

#[test]
fn test_bmi_classification() {
    let value = bmi(80.0, 180.0);
    assert!((value - 24.69).abs() < 0.01);
    assert_eq!(BmiCategory::classify(value), BmiCategory::Normal);
    assert_eq!(BmiCategory::classify(31.0), BmiCategory::Obese);
}

#[test]
fn test_streaks() {
    let days = history(&[
        (date(2026, 9, 1), 1800.0, 80.0, 5),
        (date(2026, 9, 2), 1900.0, 90.0, 6),
        (date(2026, 9, 3), 2000.0, 95.0, 8),
        (date(2026, 9, 4), 0.0, 0.0, 0),
        (date(2026, 9, 5), 1500.0, 60.0, 4),
        (date(2026, 9, 6), 1600.0, 70.0, 4),
    ]);

    assert_eq!(longest_streak(&days), 3);
    assert_eq!(current_streak(&days, date(2026, 9, 6)), 2);
    assert_eq!(current_streak(&days, date(2026, 9, 7)), 0);
}

#[test]
fn test_report_averages_over_active_days() {
    let days = history(&[
        (date(2026, 9, 10), 2000.0, 100.0, 8),
        (date(2026, 9, 11), 0.0, 0.0, 2),
        (date(2026, 9, 12), 1000.0, 40.0, 4),
    ]);

    let report = build_report(&days, date(2026, 9, 10), date(2026, 9, 12), date(2026, 9, 12)).unwrap();
    assert_eq!(report.days_logged, 2);
    assert!((report.avg_calories - 1500.0).abs() < 1e-9);
    assert!((report.avg_protein - 70.0).abs() < 1e-9);
    assert!((report.avg_water - 6.0).abs() < 1e-9);
    assert_eq!(report.goals_met.calories, 1);
    assert_eq!(report.goals_met.water, 1);
    assert_eq!(report.rows.len(), 3);

    assert!(build_report(&days, date(2026, 9, 12), date(2026, 9, 10), date(2026, 9, 12)).is_err());
}

#[test]
fn test_weekly_slice_includes_today() {
    let days = history(&[
        (date(2026, 9, 1), 1800.0, 80.0, 5),
        (date(2026, 9, 2), 1800.0, 80.0, 5),
        (date(2026, 9, 8), 1800.0, 80.0, 5),
    ]);
    let week = weekly_slice(&days, date(2026, 9, 8));
    let dates: Vec<NaiveDate> = week.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date(2026, 9, 2), date(2026, 9, 8)]);
}

#[test]
fn test_report_csv_has_row_per_day() {
    let days = history(&[
        (date(2026, 9, 20), 2100.0, 110.0, 8),
        (date(2026, 9, 21), 1700.0, 85.0, 6),
    ]);
    let report = build_report(&days, date(2026, 9, 20), date(2026, 9, 21), date(2026, 9, 21)).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.csv");
    write_report_csv(&report, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.lines().nth(1).unwrap().starts_with("2026-09-20"));
}
