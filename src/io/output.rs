use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use jiff::civil::Date;

use crate::cli::Metric;
use crate::prelude::*;

/// Example: `./2024-07-15_hourly_data_cost.txt`
pub fn output_file_path(output_dir: &Path, today: Date, metric: Metric) -> PathBuf {
    let file_name = format!("{}_hourly_data_{}.txt", today.strftime("%Y-%m-%d"), metric);

    output_dir.join(file_name)
}

/// Starts the day's file for `metric` from scratch and returns its path.
///
/// Whatever an earlier run on the same day left behind is removed, so the
/// file only ever holds the months of the current run.
pub fn try_reset(output_dir: &Path, today: Date, metric: Metric) -> AppResult<PathBuf> {
    // Ensure the directory exists.
    fs::create_dir_all(output_dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to create {}", output_dir.display()))?;

    let path = output_file_path(output_dir, today, metric);

    if path.try_exists().into_diagnostic()? {
        fs::remove_file(&path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to remove stale {}", path.display()))?;
    }

    fs::File::create(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to create {}", path.display()))?;

    Ok(path)
}

/// Appends one payload and its line separator.
pub fn try_append(path: &Path, payload: &str) -> AppResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to open {}", path.display()))?;

    file.write_all(payload.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
