//! # BiteBox Session Shell
//!
//! Wires configuration, logging and session state around `bitebox-core`, and
//! exposes the command layer a presentation front end calls into.
//!
//! ## Module Structure
//! ```text
//! bitebox_app/
//! ├── lib.rs       ◄─── You are here (setup & run)
//! ├── main.rs      ◄─── Binary entry point
//! ├── error.rs     ◄─── ApiError, ConfigError
//! ├── console.rs   ◄─── Line-oriented driver over stdin/stdout
//! ├── commands/    ◄─── One function per user action
//! └── state/       ◄─── CartState, CatalogState, OrdersState, ConfigState
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration (file, environment, defaults)
//! 3. Build the session over the sample catalog
//! 4. Run the console until EOF or `quit`

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod console;
pub mod error;
pub mod state;

use state::{ConfigState, Session};

/// Runs a console session.
///
/// `config_path` overrides where `config.toml` is looked up.
pub async fn run(config_path: Option<PathBuf>) -> std::io::Result<()> {
    init_tracing();

    let config = ConfigState::load_or_default(config_path);
    info!(
        store = %config.store_name,
        delivery_fee = %config.format_currency(config.delivery_fee_cents),
        tax_rate_bps = config.tax_rate_bps,
        "Starting BiteBox session"
    );

    let session = Session::new(config);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    console::run_console(&session, stdin, stdout).await
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug`: verbose output
/// - `RUST_LOG=info`: standard output
/// - Default: `info,bitebox=debug`
///
/// Output goes to stderr; stdout carries command results.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bitebox=debug"));

    // A second call (e.g. from an embedding test) must not panic.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
