pub mod discover;
pub mod find;
pub mod list;

use std::time::Duration;

use clap::{Parser, Subcommand};
use lanfind_common::config::Config;

#[derive(Parser)]
#[command(name = "lanfind")]
#[command(about = "Find devices on your local network.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Cap on simultaneously in-flight probes
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    /// Per-probe connect timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stream devices as they are discovered
    #[command(alias = "d")]
    Discover { target: Option<String> },
    /// Look up one device by MAC or IP address
    #[command(alias = "f")]
    Find {
        query: String,
        target: Option<String>,
    },
    /// List every discovered device, sorted by address
    #[command(alias = "l")]
    List { target: Option<String> },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Environment config with command-line overrides applied.
    pub fn config(&self) -> Config {
        let mut cfg = Config::from_env();
        if let Some(limit) = self.limit {
            cfg.max_probes = limit;
        }
        if let Some(ms) = self.timeout_ms {
            cfg.probe_timeout = Duration::from_millis(ms);
        }
        cfg
    }
}
