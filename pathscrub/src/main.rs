// pathscrub/src/main.rs
//! pathscrub entry point.

use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};

use pathscrub::cli::{Cli, Commands};
use pathscrub::commands::{filter::run_filter, rules::run_rules};
use pathscrub::logger;

fn main() -> Result<()> {
    let args = Cli::parse();

    let level = if args.quiet {
        Some(LevelFilter::Off)
    } else if args.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);
    info!("pathscrub started. Version: {}", env!("CARGO_PKG_VERSION"));

    match &args.command {
        Commands::Filter(cmd) => run_filter(cmd, args.quiet),
        Commands::Rules(cmd) => run_rules(cmd),
    }
}
