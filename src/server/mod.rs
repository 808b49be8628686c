pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    chat::ChatRelay,
    config::Config,
    llm::OpenAiClient,
    predict::ProcessScorer,
};
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Builds the relay router. `allowed_origin` of `*` accepts any caller.
pub fn router(state: AppState, allowed_origin: &str) -> Result<Router> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let cors = if allowed_origin == "*" {
        cors.allow_origin(Any)
    } else {
        let origin: HeaderValue = allowed_origin
            .parse()
            .map_err(|_| Error::config(format!("Invalid allowed origin: '{}'", allowed_origin)))?;
        cors.allow_origin(origin)
    };

    Ok(Router::new()
        .route("/health", get(handlers::health))
        .route("/api/chat", post(handlers::chat))
        .route("/api/predict", post(handlers::predict))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

pub async fn run(config: Config) -> Result<()> {
    let llm = OpenAiClient::new(&config.llm);
    let chat = ChatRelay::new(Arc::new(llm), &config.llm);
    let scorer = ProcessScorer::new(config.scorer.clone());

    let app_state = AppState {
        chat: Arc::new(chat),
        scorer: Arc::new(scorer),
    };

    let app = router(app_state, &config.server.allowed_origin)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);
    info!(
        "Scorer: {} {:?} in {} ({:?} exchange)",
        config.scorer.command,
        config.scorer.args,
        config.scorer.working_dir.display(),
        config.scorer.exchange
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
