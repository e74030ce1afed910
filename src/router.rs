use std::path::Path;

use jiff::civil::Date;
use tracing::info;

use crate::app::App;
use crate::calculation::months::{MonthRange, generate_monthly_ranges};
use crate::cli::Metric;
use crate::io::glowmarkt_client::ReadingsSource;
use crate::io::output;
use crate::prelude::*;

const MONTH_SEPARATOR: &str = "================================";

/// Pulls every month since the move-in date into the day's two files.
///
/// Order per month is fixed: cost first, then consumption. The first failure
/// stops the run and leaves whatever was already written on disk.
pub fn pull_history(ctx: &App, source: &impl ReadingsSource, today: Date) -> AppResult<()> {
    // Nothing is touched until the input is known to be good.
    let move_in = ctx.cli.try_parse_move_in_date()?;
    move_in.ensure_not_after(today)?;

    let output_dir = &ctx.cli.output_dir;
    let cost_file = output::try_reset(output_dir, today, Metric::Cost)?;
    let consumption_file = output::try_reset(output_dir, today, Metric::Consumption)?;

    let months = generate_monthly_ranges(move_in.first_day()?, today)?;

    info!(
        months = months.len(),
        cost_file = %cost_file.display(),
        consumption_file = %consumption_file.display(),
        "pulling hourly history"
    );

    for range in &months {
        pull_month(ctx, source, range, Metric::Cost, &cost_file)?;

        println!();

        pull_month(ctx, source, range, Metric::Consumption, &consumption_file)?;

        println!("\n{}\n", MONTH_SEPARATOR);
    }

    info!(months = months.len(), "done");

    Ok(())
}

// private

/// Fetch then append, for one metric of one month.
fn pull_month(
    ctx: &App,
    source: &impl ReadingsSource,
    range: &MonthRange,
    metric: Metric,
    path: &Path,
) -> AppResult<()> {
    let from = range.from_param();
    let to = range.to_param();

    let mut progress = ctx
        .display
        .begin(format!("Retrieving {metric} data for {from} to {to}"));

    let payload = source.fetch(ctx.cli.resource_id(metric), range)?;

    output::try_append(path, &payload)?;

    progress.stop_with_message(&format!(
        "{} data for {from} to {to} written to {}",
        metric.title(),
        path.display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use jiff::civil::date;
    use std::cell::RefCell;
    use std::fs;

    const COST_ID: &str = "cost-resource";
    const CONSUMPTION_ID: &str = "consumption-resource";

    /// Answers every call with the same body and remembers what was asked.
    struct FixedSource {
        payload: &'static str,
        calls: RefCell<Vec<(String, String)>>,
    }

    impl FixedSource {
        fn new(payload: &'static str) -> Self {
            FixedSource {
                payload,
                calls: RefCell::new(vec![]),
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.borrow().clone()
        }
    }

    impl ReadingsSource for FixedSource {
        fn fetch(&self, resource_id: &str, range: &MonthRange) -> AppResult<String> {
            self.calls
                .borrow_mut()
                .push((resource_id.to_owned(), range.from_param()));

            Ok(self.payload.to_owned())
        }
    }

    /// Echoes the resource and month back, so ordering shows up in the files.
    struct EchoSource;

    impl ReadingsSource for EchoSource {
        fn fetch(&self, resource_id: &str, range: &MonthRange) -> AppResult<String> {
            Ok(format!("{resource_id}@{}", range.from_param()))
        }
    }

    /// Succeeds a fixed number of times, then fails like a dropped connection.
    struct FlakySource {
        successes_left: RefCell<usize>,
    }

    impl ReadingsSource for FlakySource {
        fn fetch(&self, _resource_id: &str, _range: &MonthRange) -> AppResult<String> {
            let mut left = self.successes_left.borrow_mut();

            if *left == 0 {
                return Err(miette::miette!("connection reset"));
            }

            *left -= 1;

            Ok("ok".to_owned())
        }
    }

    fn app(output_dir: &Path, move_in_date: &str) -> App {
        let output_dir = output_dir.to_str().unwrap();

        let cli = Cli::try_parse_from([
            "glowpull",
            "--token",
            "token",
            "--move-in-date",
            move_in_date,
            "--output-dir",
            output_dir,
            "--cost-resource-id",
            COST_ID,
            "--consumption-resource-id",
            CONSUMPTION_ID,
            "--application-id",
            "app-id",
            "--api-url",
            "http://localhost",
            "--no-animate",
        ])
        .unwrap();

        App::new(cli)
    }

    fn read(dir: &Path, today: Date, metric: Metric) -> String {
        fs::read_to_string(output::output_file_path(dir, today, metric)).unwrap()
    }

    #[test]
    fn writes_one_line_per_month_for_each_metric() {
        let dir = tempfile::tempdir().unwrap();
        let today = date(2024, 1, 10);
        let source = FixedSource::new(r#"{"data":[]}"#);

        pull_history(&app(dir.path(), "12-2023"), &source, today).unwrap();

        let expected = "{\"data\":[]}\n{\"data\":[]}\n";

        assert_eq!(read(dir.path(), today, Metric::Cost), expected);
        assert_eq!(read(dir.path(), today, Metric::Consumption), expected);
    }

    #[test]
    fn fetches_cost_then_consumption_month_by_month() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixedSource::new("{}");

        pull_history(&app(dir.path(), "05-2024"), &source, date(2024, 7, 15)).unwrap();

        let expected: Vec<(String, String)> = [
            (COST_ID, "2024-05-01T00:00:00"),
            (CONSUMPTION_ID, "2024-05-01T00:00:00"),
            (COST_ID, "2024-06-01T00:00:00"),
            (CONSUMPTION_ID, "2024-06-01T00:00:00"),
            (COST_ID, "2024-07-01T00:00:00"),
            (CONSUMPTION_ID, "2024-07-01T00:00:00"),
        ]
        .iter()
        .map(|(id, from)| (id.to_string(), from.to_string()))
        .collect();

        assert_eq!(source.calls(), expected);
    }

    #[test]
    fn each_file_gets_its_own_resource_in_chronological_order() {
        let dir = tempfile::tempdir().unwrap();
        let today = date(2024, 1, 10);

        pull_history(&app(dir.path(), "12-2023"), &EchoSource, today).unwrap();

        assert_eq!(
            read(dir.path(), today, Metric::Cost),
            "cost-resource@2023-12-01T00:00:00\ncost-resource@2024-01-01T00:00:00\n"
        );
        assert_eq!(
            read(dir.path(), today, Metric::Consumption),
            "consumption-resource@2023-12-01T00:00:00\nconsumption-resource@2024-01-01T00:00:00\n"
        );
    }

    #[test]
    fn a_second_run_on_the_same_day_starts_over() {
        let dir = tempfile::tempdir().unwrap();
        let today = date(2024, 1, 10);

        pull_history(&app(dir.path(), "12-2023"), &FixedSource::new("old"), today).unwrap();
        pull_history(&app(dir.path(), "01-2024"), &FixedSource::new("new"), today).unwrap();

        assert_eq!(read(dir.path(), today, Metric::Cost), "new\n");
        assert_eq!(read(dir.path(), today, Metric::Consumption), "new\n");
    }

    #[test]
    fn malformed_move_in_date_never_reaches_the_network() {
        for move_in_date in ["13-2024", "notadate"] {
            let dir = tempfile::tempdir().unwrap();
            let source = FixedSource::new("{}");

            let result = pull_history(&app(dir.path(), move_in_date), &source, date(2024, 7, 15));

            assert!(result.is_err(), "{move_in_date} should be rejected");
            assert!(source.calls().is_empty());
            assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        }
    }

    #[test]
    fn future_move_in_date_never_reaches_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixedSource::new("{}");

        let result = pull_history(&app(dir.path(), "08-2024"), &source, date(2024, 7, 15));

        assert!(result.is_err());
        assert!(source.calls().is_empty());
    }

    #[test]
    fn failure_stops_the_run_and_keeps_what_was_written() {
        let dir = tempfile::tempdir().unwrap();
        let today = date(2024, 7, 15);

        // May cost, May consumption, June cost, then the connection drops.
        let source = FlakySource {
            successes_left: RefCell::new(3),
        };

        let result = pull_history(&app(dir.path(), "05-2024"), &source, today);

        assert!(result.is_err());
        assert_eq!(read(dir.path(), today, Metric::Cost), "ok\nok\n");
        assert_eq!(read(dir.path(), today, Metric::Consumption), "ok\n");
    }
}
