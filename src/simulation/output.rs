use std::path::Path;

use crate::error::Result;
use crate::models::MealSlot;
use crate::simulation::evaluation::TargetResult;

/// Print one line per target.
pub fn print_results(results: &[TargetResult]) {
    println!();
    println!(
        "{:>7} {:>5} {:>9} {:>9} {:>18} {:>6} {:>8} {:>8}",
        "target", "runs", "mean_dev", "max_dev", "distinct b/l/d/s", "avg", "warn%", "regen%"
    );
    for result in results {
        let distinct = result
            .distinct_per_slot
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("/");
        println!(
            "{:>7.0} {:>5} {:>9.1} {:>9.1} {:>18} {:>6.1} {:>7.1}% {:>7.1}%",
            result.target,
            result.runs,
            result.mean_abs_deviation,
            result.max_abs_deviation,
            distinct,
            result.mean_distinct(),
            result.warning_rate * 100.0,
            result.regeneration_change_rate * 100.0
        );
    }
    println!();
}

/// Write all results to a CSV file.
pub fn write_csv(results: &[TargetResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec![
        "target".to_string(),
        "runs".to_string(),
        "mean_abs_deviation".to_string(),
        "max_abs_deviation".to_string(),
    ];
    header.extend(MealSlot::ALL.iter().map(|slot| format!("distinct_{}", slot)));
    header.push("warning_rate".to_string());
    header.push("regeneration_change_rate".to_string());
    wtr.write_record(&header)?;

    for result in results {
        let mut record = vec![
            format!("{:.0}", result.target),
            result.runs.to_string(),
            format!("{:.2}", result.mean_abs_deviation),
            format!("{:.2}", result.max_abs_deviation),
        ];
        record.extend(result.distinct_per_slot.iter().map(|n| n.to_string()));
        record.push(format!("{:.3}", result.warning_rate));
        record.push(format!("{:.3}", result.regeneration_change_rate));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
