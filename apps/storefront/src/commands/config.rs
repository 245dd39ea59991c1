//! # Config Commands
//!
//! Commands for retrieving storefront configuration.

use tracing::debug;

use crate::state::{ConfigState, Storefront};

/// Gets the storefront configuration.
///
/// ## When Used
/// - Startup (header store name and tagline)
/// - Currency formatting on the client
pub fn get_config(store: &Storefront) -> ConfigState {
    debug!("get_config command");
    store.config().clone()
}
