mod app;
mod calculation;
mod cli;
mod config;
mod display;
mod error;
mod io;
mod prelude;
mod router;

use jiff::Zoned;
use tracing_subscriber::EnvFilter;

use app::App;
use cli::Cli;
use io::glowmarkt_client::GlowmarktClient;
use prelude::*;

fn main() -> AppResult {
    init_tracing();

    let app = App::new(Cli::new());

    // Month boundaries and file names follow the local calendar.
    let today = Zoned::now().date();

    let client = GlowmarktClient::new(
        &app.cli.api_url,
        app.cli.try_get_token()?,
        &app.cli.application_id,
        app.cli.strict_status,
    );

    router::pull_history(&app, &client, today)
}

// private

/// Logs go to stderr, stdout is for progress.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
