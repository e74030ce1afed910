use tracing::{debug, warn};
use ureq::Agent;

use super::ReadingsSource;
use crate::calculation::months::MonthRange;
use crate::config::glowmarkt::{READINGS_FUNCTION, READINGS_PERIOD};
use crate::error::Error;
use crate::prelude::*;

/// Blocking client for the readings endpoint.
pub struct GlowmarktClient {
    agent: Agent,
    base_url: String,
    token: String,
    application_id: String,
    strict_status: bool,
}

impl GlowmarktClient {
    pub fn new(base_url: &str, token: &str, application_id: &str, strict_status: bool) -> Self {
        // Error bodies are data too, unless the caller asked otherwise.
        // So we look at the status ourselves instead of letting ureq turn it into an error.
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        GlowmarktClient {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
            application_id: application_id.to_owned(),
            strict_status,
        }
    }
}

impl ReadingsSource for GlowmarktClient {
    fn fetch(&self, resource_id: &str, range: &MonthRange) -> AppResult<String> {
        let from = range.from_param();
        let to = range.to_param();

        let url = readings_url(&self.base_url, resource_id);

        debug!(%url, %from, %to, "requesting readings");

        let mut response = self
            .agent
            .get(&url)
            .header("content-type", "application/json")
            .header("token", &self.token)
            .header("applicationid", &self.application_id)
            // granularity, window.
            .query("period", READINGS_PERIOD)
            .query("function", READINGS_FUNCTION)
            .query("from", &from)
            .query("to", &to)
            .call()
            .into_diagnostic()
            .wrap_err_with(|| format!("Request to {url} failed"))?;

        let status = response.status();

        if !status.is_success() {
            if self.strict_status {
                let error = Error::UnexpectedStatus {
                    status: status.as_u16(),
                    resource_id: resource_id.to_owned(),
                    from,
                    to,
                };

                return Err(error.into());
            }

            warn!(
                status = status.as_u16(),
                resource_id, %from, %to, "non-success answer, writing the body anyway"
            );
        }

        let body = response
            .body_mut()
            .read_to_string()
            .into_diagnostic()
            .wrap_err("Failed to read the readings body")?;

        debug!(bytes = body.len(), "received readings");

        Ok(body)
    }
}

// private

fn readings_url(base_url: &str, resource_id: &str) -> String {
    format!("{base_url}/api/v0-1/resource/{resource_id}/readings")
}
