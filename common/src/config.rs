use std::time::Duration;

use tracing::debug;

/// Environment variable controlling the probe concurrency ceiling.
pub const CONCURRENCY_ENV: &str = "LANFIND_CONCURRENCY";

/// Default cap on simultaneously in-flight probes.
pub const DEFAULT_MAX_PROBES: usize = 32;

/// Default per-probe connect timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on simultaneously in-flight probes.
    ///
    /// Values below 1 are treated as 1 by the scheduler.
    pub max_probes: usize,

    /// How long a single probe waits for a connect before giving up.
    ///
    /// The probe completes either way; the timeout only bounds how long
    /// a silent host can occupy a probe slot.
    pub probe_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_probes: DEFAULT_MAX_PROBES,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl Config {
    /// Builds a config from the process environment.
    ///
    /// Reads `LANFIND_CONCURRENCY`; anything unset or unparsable falls back
    /// to [`DEFAULT_MAX_PROBES`].
    pub fn from_env() -> Self {
        let raw = std::env::var(CONCURRENCY_ENV).ok();
        Self {
            max_probes: max_probes_from(raw.as_deref()),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

fn max_probes_from(raw: Option<&str>) -> usize {
    match raw {
        None => DEFAULT_MAX_PROBES,
        Some(value) => match value.trim().parse::<usize>() {
            Ok(n) if n >= 1 => n,
            _ => {
                debug!("ignoring invalid {CONCURRENCY_ENV}={value:?}");
                DEFAULT_MAX_PROBES
            }
        },
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
