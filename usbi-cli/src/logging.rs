//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates that belong to this project (for the default filter)
const PROJECT_CRATES: &[&str] = &["usb_inspector", "usbi_detect", "usbi_report", "usbi_stream"];

fn default_filter(debug: bool) -> String {
    let level = if debug { "debug" } else { "warn" };
    PROJECT_CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. Logs go to stderr so they never mix with
/// rendered output on stdout. `RUST_LOG` overrides the default filter.
pub fn init(debug: bool) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(debug).into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(debug)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_every_crate() {
        assert_eq!(
            default_filter(false),
            "usb_inspector=warn,usbi_detect=warn,usbi_report=warn,usbi_stream=warn"
        );
        assert!(default_filter(true).split(',').all(|d| d.ends_with("=debug")));
    }
}
