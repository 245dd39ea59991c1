//! # State Module
//!
//! Session state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Bridge Loop                                │   │
//! │  │  owns one Storefront, hands &mut to each command                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Storefront                                                      │  │
//! │  │                                                                  │  │
//! │  │  ConfigState ── read-only after startup                          │  │
//! │  │  Catalog ────── read-only after startup                          │  │
//! │  │  Cart ───────── mutated by cart intents                          │  │
//! │  │  selection, favorites, cart panel flag, event outbox             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigError, ConfigResult, ConfigState, CONFIG_PATH_ENV};
pub use session::Storefront;
