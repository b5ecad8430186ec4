//! # Config Commands
//!
//! Read-only access to the store configuration.

use tracing::debug;

use crate::state::{AppState, ConfigState};

/// Gets the current store configuration.
///
/// ## When Used
/// - Startup (store name in the header, currency symbol)
/// - Dashboard (sales target)
/// - Receipt preview
pub fn get_config(state: &AppState) -> ConfigState {
    debug!("get_config command");
    state.config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_returns_session_config() {
        let config = ConfigState {
            store_name: "Warung Bu Tini".into(),
            ..ConfigState::default()
        };
        let state = AppState::new(config.clone());
        assert_eq!(get_config(&state), config);
    }
}
