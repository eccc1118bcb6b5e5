// Logging setup. Logs go to stderr so they never mix with the scrollback
// printed on stdout.

use tracing::Level;
use tracing_subscriber::EnvFilter;

const CRATE_TARGET: &str = "hahasaas_cli";

/// Turn the configured level into a filter.
///
/// A bare level (`debug`, `warn`, ...) applies to this crate only, keeping
/// HTTP internals quiet. Anything else is taken as a full `EnvFilter`
/// directive string, e.g. `hahasaas_cli=trace,reqwest=debug`.
pub fn filter_for(level: &str) -> EnvFilter {
    let level = level.trim();
    if level.parse::<Level>().is_ok() {
        return EnvFilter::new(format!("{CRATE_TARGET}={}", level.to_lowercase()));
    }
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(format!("{CRATE_TARGET}=warn")))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped_to_the_crate() {
        assert_eq!(filter_for(" DEBUG ").to_string(), "hahasaas_cli=debug");
    }

    #[test]
    fn directives_pass_through() {
        assert_eq!(filter_for("reqwest=info").to_string(), "reqwest=info");
    }
}
