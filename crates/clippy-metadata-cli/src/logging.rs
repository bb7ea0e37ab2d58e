use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::Cli;

/// Installs the global subscriber. Logs go to stderr so they never mix
/// with anything written to stdout.
pub fn init_logging(cli: &Cli) {
    let filter = build_filter(cli);
    let subscriber = tracing_subscriber::registry().with(filter);

    if cli.log_json {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .init();
    }
}

fn build_filter(cli: &Cli) -> EnvFilter {
    let level = cli.log_level.as_tracing_level();
    EnvFilter::from_default_env().add_directive(level.into())
}
