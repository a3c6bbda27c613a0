use std::sync::Arc;

use anyhow::Context;
use morroky_app_core::{App, HistoryPort, MemoryHistory, Route, ScreenId, Services};
use morroky_config::BaasConfig;
use morroky_core::{Merchant, MerchantFilter};
use morroky_infra::{default_http_client, BaasClient};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub input: String,
    pub screen: ScreenId,
    pub canonical: String,
    /// Why the input did not match as written, when it fell back.
    pub fallback: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderReport {
    pub screen: Option<ScreenId>,
    pub location: String,
    pub html: String,
    pub toast: Option<String>,
}

pub fn connect(config: &BaasConfig) -> anyhow::Result<Services> {
    let http = default_http_client().context("Failed to build HTTP client")?;
    Ok(Services::from_baas(Arc::new(BaasClient::new(http, config))))
}

pub fn cmd_route(path: &str) -> RouteReport {
    let route = Route::resolve(path);
    RouteReport {
        input: path.to_string(),
        screen: route.screen(),
        canonical: route.to_path(),
        fallback: Route::parse(path).err().map(|e| e.to_string()),
    }
}

/// Boots the client at `path`, waits for its first fetches and returns what
/// ended up in the root container.
pub async fn cmd_render(services: Services, path: &str, with_toast: bool) -> anyhow::Result<RenderReport> {
    let history = Arc::new(MemoryHistory::new(path));
    let mut app = App::new(services, history).context("Failed to start the client")?;
    app.boot();
    app.settle().await;

    let toast = app.toast().container();
    Ok(RenderReport {
        screen: app.router().current_screen(),
        location: app.history().current_path(),
        html: app.root_html(),
        toast: with_toast.then(|| toast.html()),
    })
}

pub async fn cmd_merchants(services: &Services, filter: MerchantFilter) -> anyhow::Result<Vec<Merchant>> {
    tracing::debug!(query = ?filter.pairs(), "listing merchants");
    services
        .merchants
        .list_merchants(&filter)
        .await
        .context("Failed to list merchants")
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
