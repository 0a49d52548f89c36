//! CSV export for simulation step records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::StepRecord;

/// Column header for the trajectory CSV export.
const HEADER: &str = "step,time_h,load_kw,pv_potential_kw,wind_potential_kw,\
                      net_load_kw,gen_kw,storage_kw,energy_stored_kwh,spilled_kw,shed_kw";

/// Exports step records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per step. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[StepRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes step records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[StepRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in records {
        wtr.write_record(&[
            r.step.to_string(),
            format!("{:.2}", r.time_h),
            format!("{:.4}", r.load_kw),
            format!("{:.4}", r.pv_potential_kw),
            format!("{:.4}", r.wind_potential_kw),
            format!("{:.4}", r.net_load_kw),
            format!("{:.4}", r.gen_kw),
            format!("{:.4}", r.storage_kw),
            format!("{:.4}", r.energy_stored_kwh),
            format!("{:.4}", r.spilled_kw),
            format!("{:.4}", r.shed_kw),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
