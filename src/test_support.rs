//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::time::Duration;

use crate::core::config::ResolvedConfig;
use crate::core::data::MockDataSource;
use crate::core::reply::CannedReplyProvider;
use crate::core::state::App;
use crate::core::theme::Theme;

/// Config with fixed values so tests don't depend on the environment.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        theme: Theme::Light,
        reply_delay: Duration::from_millis(1000),
        toast_duration: Duration::from_millis(3000),
        assistant_name: "ORION".to_string(),
        profile: Default::default(),
    }
}

/// Creates a test App backed by the mock data source and canned replies.
pub fn test_app() -> App {
    App::new(
        Arc::new(MockDataSource),
        Arc::new(CannedReplyProvider::default()),
        &test_config(),
    )
}
