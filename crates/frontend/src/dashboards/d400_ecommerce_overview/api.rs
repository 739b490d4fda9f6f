use contracts::dashboards::d400_ecommerce_overview::{
    DashboardResponse, DateFilterRequest, RecordsPage, SessionInfo,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

const API_BASE: &str = "/api/d400";

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!("HTTP error: {} {}", response.status(), body));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Открыть новую сессию (бэкенд загружает датасет)
pub async fn create_session() -> Result<SessionInfo, String> {
    let url = format!("{}/sessions", API_BASE);

    let response = Request::post(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    parse_json(response).await
}

/// Дашборд для текущего фильтра сессии
pub async fn get_dashboard(session_id: Uuid) -> Result<DashboardResponse, String> {
    let url = format!("{}/sessions/{}/dashboard", API_BASE, session_id);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    parse_json(response).await
}

/// Сохранить фильтр и получить пересчитанный дашборд
pub async fn set_filter(
    session_id: Uuid,
    filter: &DateFilterRequest,
) -> Result<DashboardResponse, String> {
    let url = format!("{}/sessions/{}/filter", API_BASE, session_id);

    let response = Request::put(&url)
        .json(filter)
        .map_err(|e| format!("Failed to serialize filter: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    parse_json(response).await
}

/// Страница отфильтрованной таблицы
pub async fn get_records(
    session_id: Uuid,
    offset: usize,
    limit: usize,
) -> Result<RecordsPage, String> {
    let url = format!(
        "{}/sessions/{}/records?offset={}&limit={}",
        API_BASE, session_id, offset, limit
    );

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    parse_json(response).await
}
