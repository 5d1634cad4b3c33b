use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use sv_core::domain::error::AppError;
use sv_core::domain::types::{AnalyzeInput, AnalyzeResponse, RewriteInput, RewriteResponse};
use sv_core::infra::metrics::MetricsSummary;
use sv_core::usecase::app_service::{AppService, MSG_NO_INPUT};

/// ハンドラエラー型（JSON `{"error": ...}` として返す）
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::App(err) = self;
        let status = if err.code.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": err.message }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// 本文を JSON オブジェクトとして受け取る。本文なし・空オブジェクトは入力なし扱い。
fn parse_body<T: DeserializeOwned>(
    service: &AppService,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, AppError> {
    let result = match payload {
        Ok(Json(Value::Object(map))) if !map.is_empty() => {
            serde_json::from_value(Value::Object(map))
                .map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))
        }
        Ok(_) => Err(AppError::invalid_input(MSG_NO_INPUT)),
        Err(rejection) => {
            log::debug!("request body rejected: {rejection}");
            Err(AppError::invalid_input(MSG_NO_INPUT))
        }
    };

    if let Err(e) = &result {
        service.record_error(e.code);
    }
    result
}

// --- Handlers ---

pub async fn analyze(
    State(service): State<Arc<AppService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<AnalyzeResponse> {
    let input: AnalyzeInput = parse_body(&service, payload)?;
    let response = service.analyze(input).await?;
    Ok(Json(response))
}

pub async fn rewrite(
    State(service): State<Arc<AppService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<RewriteResponse> {
    let input: RewriteInput = parse_body(&service, payload)?;
    let response = service.rewrite(input).await?;
    Ok(Json(response))
}

pub async fn health(State(service): State<Arc<AppService>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "provider": service.provider_name(),
    }))
}

pub async fn metrics(State(service): State<Arc<AppService>>) -> Json<MetricsSummary> {
    Json(service.get_metrics())
}

/// 未定義ルート
pub async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        let resp = ApiError::from(AppError::invalid_mode("banana")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::from(AppError::invalid_input(MSG_NO_INPUT)).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_provider_errors_are_server_errors() {
        let resp = ApiError::from(AppError::provider("upstream down")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = ApiError::from(AppError::timeout("slow")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
