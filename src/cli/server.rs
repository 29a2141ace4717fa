//! HTTP server mode for REST API access to the connector entry points

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::connector::{
    Connector, ConnectorResponse, GetDataRequest, GetSchemaRequest, SetCredentialsRequest,
};
use crate::error::{Error, ErrorCode, Result};

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    connector: Connector,
}

/// Build the router over a connector
pub fn router(connector: Connector) -> Router {
    let state = AppState { connector };

    // Build CORS layer - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/auth-type", get(auth_type))
        .route("/config", get(config))
        .route("/credentials", post(set_credentials).delete(reset_auth))
        .route("/auth/valid", get(auth_valid))
        .route("/schema", post(get_schema))
        .route("/data", post(get_data))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(connector: Connector, port: u16) -> Result<()> {
    let app = router(connector);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// HTTP status for a reported error category
fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MissingConfiguration | ErrorCode::FieldNotFound => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::FetchFailed => StatusCode::BAD_GATEWAY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render an entry point's outcome
fn respond<T: Serialize>(result: Result<T>) -> Response {
    let response = ConnectorResponse::from_result(result);
    let status = match &response {
        ConnectorResponse::Ok(_) => StatusCode::OK,
        ConnectorResponse::Error(report) => status_for(report.error_code),
    };
    (status, Json(response)).into_response()
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn auth_type(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.connector.get_auth_type())
}

async fn config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.connector.get_config())
}

async fn set_credentials(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetCredentialsRequest>,
) -> Response {
    respond(state.connector.set_credentials(&request).await)
}

async fn reset_auth(State(state): State<Arc<AppState>>) -> Response {
    respond(
        state
            .connector
            .reset_auth()
            .await
            .map(|()| json!({ "status": "ok" })),
    )
}

async fn auth_valid(State(state): State<Arc<AppState>>) -> Response {
    respond(
        state
            .connector
            .is_auth_valid()
            .await
            .map(|valid| json!({ "valid": valid })),
    )
}

async fn get_schema(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GetSchemaRequest>,
) -> Response {
    respond(state.connector.get_schema(&request).await)
}

async fn get_data(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GetDataRequest>,
) -> Response {
    respond(state.connector.get_data(&request).await)
}
