//! Fixed values for talking to the Glowmarkt API.
//!
//! Everything here can be overridden from the command line except the reading
//! period and function, which define what this tool is for.

/// Where the readings live.
pub const API_BASE_URL: &str = "https://api.glowmarkt.com";

/// The application id of the Bright client app.
///
/// The API rejects requests that don't carry it. Do not change this value.
pub const BRIGHT_APPLICATION_ID: &str = "b0f1b774-a586-4f72-9edd-27ead8aa7a8d";

/// Electricity cost stream of the meter this tool was written for.
pub const ELECTRICITY_COST_RESOURCE_ID: &str = "83cbdbc1-d18f-4fb1-96ac-520cd2eb1876";

/// Electricity consumption stream of the same meter.
pub const ELECTRICITY_CONSUMPTION_RESOURCE_ID: &str = "36f21351-aac6-4109-9f95-2307bc453e1d";

/// One reading per clock hour (ISO 8601 duration).
pub const READINGS_PERIOD: &str = "PT1H";

/// Sum the raw readings inside each period.
pub const READINGS_FUNCTION: &str = "sum";

/// The API expects naive timestamps with second precision.
pub const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
