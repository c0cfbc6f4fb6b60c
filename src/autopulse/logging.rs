//! Log subscriber setup for the binary. The library only emits `tracing` events.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `autopulse=debug`.
pub const LOG_ENV: &str = "AUTOPULSE_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "autopulse=debug"
    } else {
        "autopulse=warn"
    }
}

/// Installs a stderr `fmt` subscriber. `AUTOPULSE_LOG` wins over `verbose`.
///
/// Calling it twice is harmless: the second install is ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_level() {
        assert_eq!(default_directive(false), "autopulse=warn");
        assert_eq!(default_directive(true), "autopulse=debug");
    }
}
