//! # Kashify Storefront
//!
//! Session host for the Kashify storefront: owns one shopper's catalog view,
//! cart and favorites, and serves the web UI over a JSON-lines bridge.
//!
//! ## Module Organization
//! ```text
//! kashify_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── bridge.rs       ◄─── stdin/stdout JSON-lines protocol
//! ├── events.rs       ◄─── StoreEvent notifications and sinks
//! ├── error.rs        ◄─── API error type for commands
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration (TOML + env)
//! │   └── session.rs  ◄─── Storefront session state
//! └── commands/
//!     ├── mod.rs      ◄─── Command exports
//!     ├── product.rs  ◄─── Grid, filters, favorites
//!     ├── cart.rs     ◄─── Cart manipulation
//!     ├── checkout.rs ◄─── Checkout request
//!     └── config.rs   ◄─── Configuration retrieval
//! ```

pub mod bridge;
pub mod commands;
pub mod error;
pub mod events;
pub mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use events::TracingSink;
use state::{ConfigState, Storefront};

/// Runs the storefront session.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info, kashify crates at debug; RUST_LOG overrides        │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • --config <path> or $KASHIFY_CONFIG must load                      │
/// │     • otherwise the platform config file, falling back to defaults      │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • builtin six products, or catalogPath JSON                         │
/// │                                                                         │
/// │  4. Serve Bridge ─────────────────────────────────────────────────────► │
/// │     • one response line per request line until EOF                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    info!("Starting Kashify storefront");

    let config = match load_config(config_path_arg(std::env::args().skip(1))) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(store_name = %config.store_name, "Configuration loaded");

    let mut store = match Storefront::from_config(config) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to start session: {}", e);
            return ExitCode::FAILURE;
        }
    };
    store.add_sink(Box::new(TracingSink));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    match bridge::serve(&mut store, stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Bridge I/O failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Explicit config files must load; the implicit one may fall back.
fn load_config(path: Option<PathBuf>) -> state::ConfigResult<ConfigState> {
    let explicit = path.is_some() || std::env::var_os(state::CONFIG_PATH_ENV).is_some();
    if explicit {
        ConfigState::load(path)
    } else {
        Ok(ConfigState::load_or_default(None))
    }
}

/// Reads `--config <path>` or `--config=<path>` from the arguments.
fn config_path_arg<I>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kashify=trace` - Show trace for kashify crates only
/// - Default: INFO, kashify crates at DEBUG
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,kashify=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
