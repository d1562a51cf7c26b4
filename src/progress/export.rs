use std::path::Path;

use crate::error::Result;
use crate::progress::reporting::PeriodReport;
use crate::progress::trend::TrendPoint;

/// Write a report's day rows to CSV, one row per day.
pub fn write_report_csv(report: &PeriodReport, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in &report.rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the weight/BMI series to CSV.
pub fn write_trend_csv(trend: &[TrendPoint], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["date", "weight_kg", "bmi", "anchor"])?;
    for point in trend {
        wtr.write_record([
            point.date.to_string(),
            format!("{:.1}", point.weight_kg),
            format!("{:.2}", point.bmi),
            point.is_anchor.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
