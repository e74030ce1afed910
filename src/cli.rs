use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use jiff::civil::Date;

use crate::config::glowmarkt::{
    API_BASE_URL, BRIGHT_APPLICATION_ID, ELECTRICITY_CONSUMPTION_RESOURCE_ID,
    ELECTRICITY_COST_RESOURCE_ID,
};
use crate::error::Error;
use crate::prelude::*;

impl Cli {
    /// Convenience constructor to avoid redundant `Parser` imports in main.
    pub fn new() -> Self {
        Cli::parse()
    }

    // The token may come from the flag or the environment, so clap can't enforce it alone.
    pub fn try_get_token(&self) -> AppResult<&String> {
        let token = self.token.as_ref().ok_or(Error::TokenNotFound)?;

        Ok(token)
    }

    /// Parses `--move-in-date` into a month and a year.
    pub fn try_parse_move_in_date(&self) -> AppResult<MoveInDate> {
        let move_in = self.move_in_date.parse::<MoveInDate>()?;

        Ok(move_in)
    }

    /// Which resource to ask for a given metric.
    pub fn resource_id(&self, metric: Metric) -> &str {
        match metric {
            Metric::Cost => &self.cost_resource_id,
            Metric::Consumption => &self.consumption_resource_id,
        }
    }
}

// Structs

#[derive(Parser, Debug)]
#[command(
    name = "glowpull",
    version,
    about = "Creates two files that contain JSON dumps for smart electricity meter readings in hourly intervals"
)]
pub struct Cli {
    /// Your API token for Glowmarkt.
    #[arg(long, env = "GLOWMARKT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Your move-in date in MM-YYYY format.
    #[arg(long)]
    pub move_in_date: String,

    /// Where to put the output files.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Resource to read electricity cost from.
    #[arg(long, default_value = ELECTRICITY_COST_RESOURCE_ID)]
    pub cost_resource_id: String,

    /// Resource to read electricity consumption from.
    #[arg(long, default_value = ELECTRICITY_CONSUMPTION_RESOURCE_ID)]
    pub consumption_resource_id: String,

    /// Stop on a non-2xx answer instead of writing the error body to the file.
    #[arg(long, default_value_t = false)]
    pub strict_status: bool,

    /// Skip animations
    #[arg(long, default_value_t = false)]
    pub no_animate: bool,

    // Only worth touching if Bright ever rotates it.
    #[arg(
        long,
        env = "GLOWMARKT_APPLICATION_ID",
        default_value = BRIGHT_APPLICATION_ID,
        hide = true
    )]
    pub application_id: String,

    // For pointing at a local server.
    #[arg(long, default_value = API_BASE_URL, hide = true)]
    pub api_url: String,
}

/// The two streams we pull for every month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Cost,
    Consumption,
}

impl Metric {
    /// Lowercase name, as used in file names.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Cost => "cost",
            Metric::Consumption => "consumption",
        }
    }

    /// Capitalised name, as used at the start of progress lines.
    pub fn title(&self) -> &'static str {
        match self {
            Metric::Cost => "Cost",
            Metric::Consumption => "Consumption",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First month to pull history for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveInDate {
    pub month: i8,
    pub year: i16,
}

impl MoveInDate {
    /// Day one of the move-in month.
    pub fn first_day(&self) -> AppResult<Date> {
        Date::new(self.year, self.month, 1).into_diagnostic()
    }

    /// Rejects a move-in month that hasn't started yet relative to `today`.
    pub fn ensure_not_after(&self, today: Date) -> AppResult<()> {
        if self.first_day()? > today.first_of_month() {
            let error = Error::MoveInDateInFuture {
                month: self.month,
                year: self.year,
            };

            return Err(error.into());
        }

        Ok(())
    }
}

/// Exactly two integers separated by a hyphen, month first.
impl FromStr for MoveInDate {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMoveInDate(raw.to_owned());

        let (month, year) = raw.split_once('-').ok_or_else(invalid)?;

        let month = month.trim().parse::<i64>().map_err(|_| invalid())?;
        let year = year.trim().parse::<i16>().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) {
            return Err(Error::MonthOutOfRange(month));
        }

        // jiff stops at 9999, and there is no year zero on a meter.
        if !(1..=9999).contains(&year) {
            return Err(invalid());
        }

        Ok(MoveInDate {
            month: month as i8,
            year,
        })
    }
}
