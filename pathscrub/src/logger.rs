// pathscrub/src/logger.rs
//! Logging setup for the CLI. Library crates only use the `log` facade; the
//! binary decides where records go.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::io::Write;

/// Installs `env_logger` on stderr.
///
/// `RUST_LOG` is honoured unless `level_override` is given. Calling this more
/// than once is harmless.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder
        .target(Target::Stderr)
        .format(|buf, record| writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args()));
    let _ = builder.try_init();
}
