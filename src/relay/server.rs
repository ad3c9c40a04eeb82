use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use dotenvy::dotenv;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use super::config::RelayConfig;
use super::envelope::Envelope;
use super::upstream::UpstreamClient;

struct AppState {
    upstream: Option<UpstreamClient>,
}

/// Health probe plus the chat relay. The widget is injected into arbitrary
/// pages, so CORS stays wide open.
pub fn router(config: RelayConfig) -> Router {
    let upstream = config
        .api_key
        .as_deref()
        .map(|key| UpstreamClient::new(&config.upstream_url, key));

    Router::new()
        .route("/", get(health))
        .route("/chat", post(chat))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(AppState { upstream }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "AI Proxy Server is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> (StatusCode, Json<Envelope>) {
    let messages = body
        .as_ref()
        .and_then(|Json(body)| body.get("messages"))
        .and_then(Value::as_array);
    let Some(messages) = messages else {
        return reply(
            StatusCode::BAD_REQUEST,
            Envelope::failure("Invalid request format. Expected messages array."),
        );
    };

    let Some(upstream) = state.upstream.as_ref() else {
        tracing::error!("chat request refused: no upstream API key configured");
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            Envelope::failure("OpenRouter API key not configured on server."),
        );
    };

    match upstream.chat(messages).await {
        Ok(chat_reply) => reply(
            StatusCode::OK,
            Envelope::Success {
                message: chat_reply.message,
                usage: chat_reply.usage,
            },
        ),
        Err(err) => reply(err.status(), err.into_envelope()),
    }
}

fn reply(status: StatusCode, envelope: Envelope) -> (StatusCode, Json<Envelope>) {
    (status, Json(envelope))
}

pub async fn start_server() -> anyhow::Result<()> {
    dotenv().ok();
    let config = RelayConfig::from_env();
    let listen_addr = config.listen_addr;
    let reachable_addr = config.reachable_addr.clone();

    let view = dioxus_liveview::LiveViewPool::new();

    let app = router(config)
        .route(
            "/demo",
            get(move || async move {
                Html(format!(
                    r#"
            <!DOCTYPE html>
            <html>
                <head>
                    <title>AI Float</title>
                    <meta name="viewport"
                    content="width=device-width,
                    initial-scale=1,
                    minimum-scale=1,
                    maximum-scale=1,
                    user-scalable=no">
                </head>
                <body> <div id="main"></div> </body>
                {glue}
            </html>
            "#,
                    glue = dioxus_liveview::interpreter_glue(&format!("ws://{reachable_addr}/ws"))
                ))
            }),
        )
        .route(
            "/ws",
            get(move |ws: WebSocketUpgrade| async move {
                ws.on_upgrade(move |socket| async move {
                    _ = view
                        .launch(
                            dioxus_liveview::axum_socket(socket),
                            crate::widget::app::panel,
                        )
                        .await;
                })
            }),
        );

    println!("Listening on http://{listen_addr}");

    axum::Server::bind(&listen_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
