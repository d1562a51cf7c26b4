use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::ProfileProvider;

/// One point of the weight/BMI series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub bmi: f64,
    /// True only for the account-creation baseline.
    pub is_anchor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        };
        f.write_str(label)
    }
}

/// weight / height_m². Zero for a non-positive height.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Weight/BMI series: the profile's baseline at account creation first,
/// then every logged weight in date order. The anchor is never replaced by
/// a log entry, even one on the same date.
pub fn weight_trend<P: ProfileProvider + ?Sized>(provider: &P) -> Vec<TrendPoint> {
    let profile = provider.profile();
    let mut logs = profile.weight_log.clone();
    logs.sort_by_key(|e| e.date);

    let anchor = TrendPoint {
        date: profile.created_on,
        weight_kg: profile.weight_kg,
        bmi: bmi(profile.weight_kg, profile.height_cm),
        is_anchor: true,
    };

    std::iter::once(anchor)
        .chain(logs.into_iter().map(|entry| TrendPoint {
            date: entry.date,
            weight_kg: entry.weight_kg,
            bmi: bmi(entry.weight_kg, profile.height_cm),
            is_anchor: false,
        }))
        .collect()
}

/// Net weight change from the anchor to the latest point.
pub fn weight_change(trend: &[TrendPoint]) -> f64 {
    match (trend.first(), trend.last()) {
        (Some(first), Some(last)) => last.weight_kg - first.weight_kg,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, UserProfile, WeightEntry};
    use assert_float_eq::assert_float_absolute_eq;

    fn profile() -> UserProfile {
        UserProfile {
            weight_kg: 72.0,
            height_cm: 170.0,
            age: 30,
            gender: Gender::Female,
            calorie_goal: 2000.0,
            protein_goal: 90.0,
            water_goal: 8,
            created_on: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            weight_log: Vec::new(),
        }
    }

    #[test]
    fn test_bmi() {
        assert_float_absolute_eq!(bmi(72.0, 170.0), 24.913, 0.001);
        assert_eq!(bmi(72.0, 0.0), 0.0);
        assert_eq!(BmiCategory::classify(24.9), BmiCategory::Normal);
        assert_eq!(BmiCategory::classify(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::classify(27.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_anchor_first_then_sorted_logs() {
        let mut p = profile();
        p.weight_log = vec![
            WeightEntry {
                date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                weight_kg: 69.0,
            },
            WeightEntry {
                date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                weight_kg: 70.5,
            },
        ];

        let trend = weight_trend(&p);
        assert_eq!(trend.len(), 3);
        assert!(trend[0].is_anchor);
        assert_eq!(trend[0].weight_kg, 72.0);
        assert_eq!(trend[1].weight_kg, 70.5);
        assert_eq!(trend[2].weight_kg, 69.0);
        assert_float_absolute_eq!(weight_change(&trend), -3.0, 1e-9);
    }

    #[test]
    fn test_empty_log_is_just_anchor() {
        let trend = weight_trend(&profile());
        assert_eq!(trend.len(), 1);
        assert_eq!(weight_change(&trend), 0.0);
    }
}
