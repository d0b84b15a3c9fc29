//! Tracing setup
//!
//! Logs go to stderr so they never mix with comparison output. `RUST_LOG`
//! wins over `--verbose` when set.

use tracing_subscriber::{
    filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("fomc_diff=debug,fomc_diff_core=debug")
    } else {
        EnvFilter::new("warn")
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}
