//! # Config Commands
//!
//! Commands for retrieving session configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current configuration.
///
/// ## When Used
/// - Startup banner (store name)
/// - Currency formatting
/// - Showing the delivery fee and tax rate before checkout
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
