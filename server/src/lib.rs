mod handlers;
mod logger;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use sv_core::domain::settings::AppSettings;
use sv_core::infra::completion::openai::OpenAiClient;
use sv_core::infra::completion::{CompletionClient, CompletionError, NoopCompletionClient};
use sv_core::usecase::app_service::AppService;

/// サーバ起動エラー
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// 補完クライアントを構築する（API キーがなければ Noop）
pub fn create_completion_client(
    settings: &AppSettings,
) -> Result<Arc<dyn CompletionClient>, CompletionError> {
    match &settings.api_key {
        Some(key) => {
            let client = OpenAiClient::new(key.clone(), &settings.api_base, settings.timeout_secs)?;
            log::info!(
                "OpenAI completion client selected ({}, model {})",
                client.endpoint(),
                settings.model
            );
            Ok(Arc::new(client))
        }
        None => {
            log::warn!("OPENAI_API_KEY is not set, falling back to Noop completion client");
            Ok(Arc::new(NoopCompletionClient))
        }
    }
}

/// `/api` 配下のルートとトレース・CORS レイヤーを組み立てる
pub fn build_router(service: Arc<AppService>) -> Router {
    let routes_api = Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/rewrite", post(handlers::rewrite))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .with_state(service);

    Router::new()
        .nest("/api", routes_api)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
        .layer(CorsLayer::permissive())
        .fallback(handlers::fallback)
}

/// `.env` と環境変数から設定を読み、HTTP サーバを起動する
pub async fn run() -> Result<(), ServerError> {
    let dotenv_path = dotenv::dotenv();
    logger::init_logger();
    match dotenv_path {
        Ok(path) => log::info!("loaded environment from {}", path.display()),
        Err(e) => log::debug!(".env not loaded: {e}"),
    }

    let settings = AppSettings::from_env();
    let client = create_completion_client(&settings)?;
    let service = Arc::new(AppService::new(client, settings.clone()));
    let router = build_router(service);

    let addr = settings.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => {
            log::info!("Starting HTTP server on http://{addr}");
            listener
        }
        Err(err) => {
            log::error!("Failed to bind to {addr}. {err}");
            return Err(ServerError::from(err));
        }
    };
    axum::serve(listener, router).await?;
    Ok(())
}
