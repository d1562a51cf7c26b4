use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::{PlannerError, Result};
use crate::models::DayAggregate;
use crate::planner::constants::GOAL_MET_RATIO;

/// Aggregates dated within `from..=to`, ascending.
pub fn period_slice(
    days: &BTreeMap<NaiveDate, DayAggregate>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<&DayAggregate>> {
    if from > to {
        return Err(PlannerError::InvalidInput(format!(
            "period start {} is after end {}",
            from, to
        )));
    }
    Ok(days.range(from..=to).map(|(_, day)| day).collect())
}

/// Start of the `len`-day window ending on `today`.
pub fn window_start(today: NaiveDate, len: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(len.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN)
}

/// Last 7 days including today.
pub fn weekly_slice(days: &BTreeMap<NaiveDate, DayAggregate>, today: NaiveDate) -> Vec<&DayAggregate> {
    days.range(window_start(today, 7)..=today)
        .map(|(_, day)| day)
        .collect()
}

/// Last 30 days including today.
pub fn monthly_slice(days: &BTreeMap<NaiveDate, DayAggregate>, today: NaiveDate) -> Vec<&DayAggregate> {
    days.range(window_start(today, 30)..=today)
        .map(|(_, day)| day)
        .collect()
}

fn is_active(days: &BTreeMap<NaiveDate, DayAggregate>, date: NaiveDate) -> bool {
    days.get(&date).is_some_and(DayAggregate::has_activity)
}

/// Consecutive active days walking back from `today`; 0 if today has no
/// logged activity.
pub fn current_streak(days: &BTreeMap<NaiveDate, DayAggregate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut date = today;
    while is_active(days, date) {
        streak += 1;
        match date.pred_opt() {
            Some(prev) => date = prev,
            None => break,
        }
    }
    streak
}

/// Longest run of consecutive active days anywhere in the history.
pub fn longest_streak(days: &BTreeMap<NaiveDate, DayAggregate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for (date, day) in days {
        if !day.has_activity() {
            run = 0;
            previous = None;
            continue;
        }
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(*date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(*date);
    }
    longest
}

/// Days on which each goal reached at least 90%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GoalCounts {
    pub calories: u32,
    pub protein: u32,
    pub water: u32,
}

fn goal_met(consumed: f64, goal: f64) -> bool {
    goal > 0.0 && consumed >= goal * GOAL_MET_RATIO
}

pub fn goal_met_counts(slice: &[&DayAggregate]) -> GoalCounts {
    slice.iter().fold(GoalCounts::default(), |mut counts, day| {
        if goal_met(day.consumed_calories, day.goals.calories) {
            counts.calories += 1;
        }
        if goal_met(day.consumed_protein, day.goals.protein) {
            counts.protein += 1;
        }
        if goal_met(f64::from(day.water_glasses), f64::from(day.goals.water)) {
            counts.water += 1;
        }
        counts
    })
}

/// One day's row in a period report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRow {
    pub date: NaiveDate,
    pub consumed_calories: f64,
    pub calorie_goal: f64,
    pub consumed_protein: f64,
    pub protein_goal: f64,
    pub water_glasses: u32,
    pub water_goal: u32,
    pub meals_consumed: usize,
    pub meals_scheduled: usize,
    pub tasks_completed: usize,
}

impl From<&DayAggregate> for DayRow {
    fn from(day: &DayAggregate) -> Self {
        Self {
            date: day.date,
            consumed_calories: day.consumed_calories,
            calorie_goal: day.goals.calories,
            consumed_protein: day.consumed_protein,
            protein_goal: day.goals.protein,
            water_glasses: day.water_glasses,
            water_goal: day.goals.water,
            meals_consumed: day.meals.iter().filter(|m| m.consumed).count(),
            meals_scheduled: day.meals.len(),
            tasks_completed: day.completed_tasks(),
        }
    }
}

/// Summary of a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days_logged: usize,
    pub avg_calories: f64,
    pub avg_protein: f64,
    pub avg_water: f64,
    pub goals_met: GoalCounts,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub rows: Vec<DayRow>,
}

/// Build a report for `from..=to`. Averages are over days with logged
/// activity only.
pub fn build_report(
    days: &BTreeMap<NaiveDate, DayAggregate>,
    from: NaiveDate,
    to: NaiveDate,
    today: NaiveDate,
) -> Result<PeriodReport> {
    let slice = period_slice(days, from, to)?;
    let active: Vec<&DayAggregate> = slice.iter().copied().filter(|d| d.has_activity()).collect();

    let average = |f: fn(&DayAggregate) -> f64| {
        if active.is_empty() {
            0.0
        } else {
            active.iter().map(|d| f(d)).sum::<f64>() / active.len() as f64
        }
    };

    Ok(PeriodReport {
        from,
        to,
        days_logged: active.len(),
        avg_calories: average(|d| d.consumed_calories),
        avg_protein: average(|d| d.consumed_protein),
        avg_water: average(|d| f64::from(d.water_glasses)),
        goals_met: goal_met_counts(&slice),
        current_streak: current_streak(days, today),
        longest_streak: longest_streak(days),
        rows: slice.into_iter().map(DayRow::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyGoals;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    fn day(d: u32, calories: f64, protein: f64, water: u32) -> DayAggregate {
        let mut day = DayAggregate::new(
            date(d),
            DailyGoals {
                calories: 2000.0,
                protein: 100.0,
                water: 8,
            },
            &[],
        );
        day.consumed_calories = calories;
        day.consumed_protein = protein;
        day.water_glasses = water;
        day
    }

    fn history(entries: Vec<DayAggregate>) -> BTreeMap<NaiveDate, DayAggregate> {
        entries.into_iter().map(|d| (d.date, d)).collect()
    }

    #[test]
    fn test_period_slice_sorted_and_bounded() {
        let days = history(vec![day(5, 1.0, 0.0, 0), day(1, 1.0, 0.0, 0), day(3, 1.0, 0.0, 0), day(9, 1.0, 0.0, 0)]);
        let slice = period_slice(&days, date(2), date(5)).unwrap();
        let dates: Vec<NaiveDate> = slice.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(3), date(5)]);

        assert!(period_slice(&days, date(5), date(2)).is_err());
    }

    #[test]
    fn test_weekly_slice() {
        let days = history(vec![day(1, 1.0, 0.0, 0), day(3, 1.0, 0.0, 0), day(9, 1.0, 0.0, 0)]);
        let week = weekly_slice(&days, date(9));
        let dates: Vec<NaiveDate> = week.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(3), date(9)]);
        assert_eq!(monthly_slice(&days, date(9)).len(), 3);
    }

    #[test]
    fn test_current_streak_stops_at_gap() {
        let days = history(vec![
            day(4, 500.0, 0.0, 0),
            day(6, 0.0, 20.0, 0),
            day(7, 1800.0, 90.0, 0),
            day(8, 1500.0, 60.0, 0),
        ]);
        assert_eq!(current_streak(&days, date(8)), 3);
        assert_eq!(current_streak(&days, date(9)), 0);
        assert_eq!(current_streak(&days, date(4)), 1);
    }

    #[test]
    fn test_inactive_day_breaks_streak() {
        let days = history(vec![day(6, 500.0, 0.0, 0), day(7, 0.0, 0.0, 4), day(8, 500.0, 0.0, 0)]);
        assert_eq!(current_streak(&days, date(8)), 1);
        assert_eq!(longest_streak(&days), 1);
    }

    #[test]
    fn test_longest_streak() {
        let days = history(vec![
            day(1, 1.0, 0.0, 0),
            day(2, 1.0, 0.0, 0),
            day(3, 1.0, 0.0, 0),
            day(5, 1.0, 0.0, 0),
            day(6, 1.0, 0.0, 0),
        ]);
        assert_eq!(longest_streak(&days), 3);
        assert_eq!(longest_streak(&BTreeMap::new()), 0);
    }

    #[test]
    fn test_goal_met_at_ninety_percent() {
        let days = history(vec![
            day(1, 1800.0, 90.0, 8),
            day(2, 1799.0, 89.9, 7),
            day(3, 2500.0, 150.0, 6),
        ]);
        let slice: Vec<&DayAggregate> = days.values().collect();
        let counts = goal_met_counts(&slice);
        assert_eq!(
            counts,
            GoalCounts {
                calories: 2,
                protein: 2,
                water: 1
            }
        );
    }

    #[test]
    fn test_build_report_averages_active_days() {
        let days = history(vec![day(1, 2000.0, 100.0, 8), day(2, 0.0, 0.0, 2), day(3, 1000.0, 50.0, 4)]);
        let report = build_report(&days, date(1), date(3), date(3)).unwrap();

        assert_eq!(report.days_logged, 2);
        assert_eq!(report.avg_calories, 1500.0);
        assert_eq!(report.avg_protein, 75.0);
        assert_eq!(report.avg_water, 6.0);
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.current_streak, 1);
        assert_eq!(report.goals_met.calories, 1);
    }
}
