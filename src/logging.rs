//! Logging init: structured `tracing` output on stderr, so reports on stdout stay clean.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,profile_links=info";
const VERBOSE_FILTER: &str = "warn,profile_links=debug";

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Initialize logging to stderr. `RUST_LOG` takes precedence over the flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .try_init();
}
