use std::time::Duration;

use reqwest::Client;

const USER_AGENT: &str = concat!("morroky/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client for every backend call.
pub fn default_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(60))
        .build()
}
