//! # BiteBox Entry Point
//!
//! ```text
//! bitebox [path/to/config.toml]
//! ```
//!
//! Reads commands from stdin and writes one JSON line per command to stdout.
//! The actual setup is in lib.rs for better testability.

use std::path::PathBuf;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    bitebox_app::run(config_path).await
}
