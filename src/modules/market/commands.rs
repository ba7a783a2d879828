use super::application::{DashboardSnapshot, MarketService, RefreshOutcome, ScanResult};
use super::domain::ServerInfo;
use crate::log_info;
use crate::modules::listing::domain::BucketFilter;
use crate::shared::errors::AppError;
use serde::{Deserialize, Serialize};
use specta::Type;
use std::sync::Arc;
use tauri::State;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct GetDashboardRequest {
    #[serde(default)]
    pub bucket: BucketFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct RefreshMarketRequest {
    pub item_name: Option<String>,
    pub server: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ScanMarketRequest {
    pub query: String,
    pub server: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct SelectChartItemRequest {
    pub item_name: String,
}

#[tauri::command]
#[specta::specta]
pub async fn get_dashboard(
    request: GetDashboardRequest,
    market_service: State<'_, Arc<MarketService>>,
) -> Result<DashboardSnapshot, String> {
    Ok(market_service.snapshot(request.bucket).await)
}

#[tauri::command]
#[specta::specta]
pub async fn refresh_market(
    request: RefreshMarketRequest,
    market_service: State<'_, Arc<MarketService>>,
) -> Result<RefreshOutcome, String> {
    market_service
        .refresh(request.item_name.as_deref(), request.server.as_deref())
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
#[specta::specta]
pub async fn clear_market_filter(
    market_service: State<'_, Arc<MarketService>>,
) -> Result<RefreshOutcome, String> {
    market_service
        .clear_filter()
        .await
        .map_err(|e| e.to_string())
}

/// Returns the structured error so a failed job's diagnostics reach the UI
#[tauri::command]
#[specta::specta]
pub async fn scan_market(
    request: ScanMarketRequest,
    market_service: State<'_, Arc<MarketService>>,
) -> Result<ScanResult, AppError> {
    log_info!("scan_market command called for '{}'", request.query);
    market_service
        .scrape_and_refresh(&request.query, request.server.as_deref())
        .await
}

#[tauri::command]
#[specta::specta]
pub async fn select_chart_item(
    request: SelectChartItemRequest,
    market_service: State<'_, Arc<MarketService>>,
) -> Result<RefreshOutcome, String> {
    market_service
        .select_chart_item(&request.item_name)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
#[specta::specta]
pub async fn get_servers(
    market_service: State<'_, Arc<MarketService>>,
) -> Result<Vec<ServerInfo>, String> {
    market_service.servers().await.map_err(|e| e.to_string())
}
