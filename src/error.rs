use miette::Diagnostic;
use thiserror::Error;

// Codes follow the same layout:
// glowpull::parse -> cli argument parsing/validation.
// glowpull::config -> environment, credentials.
// glowpull::api -> http/provider errors.

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Invalid move-in date: expected MM-YYYY, got '{0}'")]
    #[diagnostic(
        code(glowpull::parse::move_in_date),
        help("Pass the month and the four digit year separated by a hyphen, like '05-2024'.")
    )]
    InvalidMoveInDate(String),

    #[error("Invalid move-in month: expected a month between 1 and 12, got '{0}'")]
    #[diagnostic(
        code(glowpull::parse::month),
        help("January is '01' and December is '12', for example '12-2023'.")
    )]
    MonthOutOfRange(i64),

    #[error("Move-in date {month:02}-{year} is after the current month.")]
    #[diagnostic(
        code(glowpull::parse::move_in_future),
        help("There is nothing to retrieve yet. Check the year of your move-in date.")
    )]
    MoveInDateInFuture { month: i8, year: i16 },

    #[error("Glowmarkt API token not found.")]
    #[diagnostic(
        code(glowpull::config::token),
        help(
"Pass it with --token or set the GLOWMARKT_TOKEN environment variable.\n\
Try running `echo $GLOWMARKT_TOKEN` to check if it's present or restart your shell."
        )
    )]
    TokenNotFound,

    #[error("Glowmarkt answered {status} for resource {resource_id} ({from} to {to}).")]
    #[diagnostic(
        code(glowpull::api::status),
        help("Check that the token is still valid. Drop --strict-status to write error bodies through.")
    )]
    UnexpectedStatus {
        status: u16,
        resource_id: String,
        from: String,
        to: String,
    },
}
