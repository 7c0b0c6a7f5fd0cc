//! This module sets up logging for applications embedding the client using `tracing_subscriber`
//! It provides a function to initialize logging in either JSON format or pretty format

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "info,pilosa_client=debug";

/// Sets up logging based on the provided format preference
///
/// # Arguments
///
/// * `pretty` - A boolean that determines if the logging format should be pretty or JSON
///
/// The filter is read from `RUST_LOG`, falling back to `info,pilosa_client=debug`.
/// Panics if a global subscriber has already been installed.
pub fn setup_logging(pretty: bool) {
    match pretty {
        true => setup_logging_pretty(),
        false => setup_logging_json(),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn setup_logging_json() {
    let main_layer = tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_target(false)
        .with_current_span(true)
        .with_span_list(true)
        .with_line_number(true)
        .with_file(true)
        .with_timer(UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(env_filter())
        .with(main_layer)
        .init()
}

fn setup_logging_pretty() {
    let main_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_timer(UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(env_filter())
        .with(main_layer)
        .init()
}
