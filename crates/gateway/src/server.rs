use std::{net::SocketAddr, sync::Arc};

use {
    axum::{
        Router, middleware,
        routing::{get, post},
    },
    tower_http::{
        cors::{Any, CorsLayer},
        trace::TraceLayer,
    },
    tracing::info,
};

use gramgate_telegram::Messenger;

use crate::{auth, handlers, state::AppState};

// ── Router construction ──────────────────────────────────────────────────────

/// Build the gateway router (shared between production startup and tests).
///
/// `/health` is public; everything else sits behind the bearer-token
/// middleware, which runs before any body parsing.
pub fn build_gateway_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/me", get(handlers::get_me))
        .route("/send-message", post(handlers::send_message))
        .route("/get-messages", get(handlers::get_messages))
        .route("/get-chats", get(handlers::get_chats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ── Server startup ───────────────────────────────────────────────────────────

/// Bind the listener and serve until the process is stopped.
pub async fn start_gateway(
    bind: &str,
    port: u16,
    api_key: &str,
    messenger: Arc<dyn Messenger>,
) -> anyhow::Result<()> {
    let state = AppState::new(api_key, messenger);
    let app = build_gateway_app(state);

    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "gramgate listening");

    axum::serve(listener, app).await?;
    Ok(())
}
