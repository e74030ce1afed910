mod client;

pub use client::GlowmarktClient;

use crate::calculation::months::MonthRange;
use crate::prelude::*;

/// Anything that can hand back the readings of one resource for one month.
///
/// The run only ever sees this, so it can be driven without a network.
pub trait ReadingsSource {
    /// Returns the response body exactly as received.
    fn fetch(&self, resource_id: &str, range: &MonthRange) -> AppResult<String>;
}
