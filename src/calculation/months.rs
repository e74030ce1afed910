use jiff::ToSpan;
use jiff::civil::{Date, DateTime, Time};

use crate::config::glowmarkt::API_TIMESTAMP_FORMAT;
use crate::prelude::*;

/// One calendar month, from its first second to its last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthRange {
    /// Inclusive - midnight on day one.
    pub start: DateTime,

    /// Inclusive - 23:59:59 on the last day.
    pub end: DateTime,
}

impl MonthRange {
    /// The range of the month that contains `day`.
    pub fn starting_at(day: Date) -> AppResult<Self> {
        let start = day.first_of_month().to_datetime(Time::midnight());

        // First moment of the next month, minus one second. This rolls December into January.
        let end = start
            .checked_add(1.month())
            .and_then(|next_month| next_month.checked_sub(1.second()))
            .into_diagnostic()
            .wrap_err("Month boundary is out of the supported calendar range")?;

        Ok(MonthRange { start, end })
    }

    /// `from` query value.
    pub fn from_param(&self) -> String {
        self.start.strftime(API_TIMESTAMP_FORMAT).to_string()
    }

    /// `to` query value.
    pub fn to_param(&self) -> String {
        self.end.strftime(API_TIMESTAMP_FORMAT).to_string()
    }
}

/// Every month from the one containing `first_month` up to and including the one containing
/// `today`, oldest first.
///
/// Returns an empty list if `first_month` is after the current month.
pub fn generate_monthly_ranges(first_month: Date, today: Date) -> AppResult<Vec<MonthRange>> {
    let last_month = today.first_of_month();

    let mut cursor = first_month.first_of_month();
    let mut ranges: Vec<MonthRange> = vec![];

    while cursor <= last_month {
        ranges.push(MonthRange::starting_at(cursor)?);

        cursor = cursor.checked_add(1.month()).into_diagnostic()?;
    }

    Ok(ranges)
}
