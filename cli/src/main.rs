mod commands;
mod terminal;

use commands::{CommandLine, Commands, discover, find, list};
use lanfind_common::network::range::IpCollection;
use lanfind_common::network::target::{self, Target};
use terminal::logging;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();

    let cfg = commands.config();

    match commands.command {
        Commands::Discover { target } => {
            discover::discover(resolve_targets(target.as_deref()), &cfg).await
        }
        Commands::Find { query, target } => {
            find::find(&query, resolve_targets(target.as_deref()), &cfg).await
        }
        Commands::List { target } => list::list(resolve_targets(target.as_deref()), &cfg).await,
    }
}

/// No explicit target means "every network this host sits on".
fn resolve_targets(target: Option<&str>) -> IpCollection {
    let collection = match target {
        Some(expr) => target::expand(expr),
        None => target::to_collection(Target::Lan),
    };

    if collection.is_empty() {
        warn!("target expression produced no addresses");
    }

    collection
}
