//! Shared API client constructor.
//!
//! The platform binary loads a [`store::DashboardConfig`] once and provides it
//! as context; views build their [`ApiClient`] from it.

use api::{ApiClient, ReqwestBackend};
use dioxus::prelude::*;
use store::DashboardConfig;

/// The client every view uses.
pub type DashboardClient = ApiClient<ReqwestBackend>;

pub fn make_client(config: &DashboardConfig) -> DashboardClient {
    ApiClient::new(ReqwestBackend::new(config.api.base_url.clone()))
}

/// The dashboard configuration provided by the app root.
pub fn use_config() -> DashboardConfig {
    use_context::<DashboardConfig>()
}

/// A client for the configured API.
pub fn use_client() -> DashboardClient {
    let config = use_config();
    use_hook(move || make_client(&config))
}
