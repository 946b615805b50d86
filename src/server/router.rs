use crate::config::WebConfig;
use crate::db::FleetStore;
use crate::error::{Entity, FleetError};
use crate::server::routes::{crew_members, ships, sync};

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
};
use base64::Engine as _;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

/// Shared handler state: the store seam every route goes through.
#[derive(Clone)]
pub struct FleetState {
    pub store: Arc<dyn FleetStore>,
}

impl FleetState {
    pub fn new(store: impl FleetStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

async fn not_found_handler() -> FleetError {
    FleetError::NotFound(Entity::Route)
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;
    let path = uri.path();
    let protocol = format_http_version(version);

    if resp.status().is_server_error() {
        error!(
            "| {status:>3} | {request_id} | {:^7} | {protocol:<8} | {path} | {latency_ms}ms | {user_agent}",
            method.as_str(),
        );
    } else if resp.status().is_client_error() {
        warn!(
            "| {status:>3} | {request_id} | {:^7} | {protocol:<8} | {path} | {latency_ms}ms | {user_agent}",
            method.as_str(),
        );
    } else {
        info!(
            "| {status:>3} | {request_id} | {:^7} | {protocol:<8} | {path} | {latency_ms}ms | {user_agent}",
            method.as_str(),
        );
    }

    resp
}

/// Builds the complete HTTP surface: ship and crew member resources, the
/// reset endpoint, and either the admin UI or a JSON 404 as fallback.
pub fn fleet_router(state: FleetState, web: &WebConfig) -> Router {
    let api = Router::new()
        .merge(ships::router())
        .merge(crew_members::router())
        .merge(sync::router());

    let api = match web.static_dir.as_ref() {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api.fallback(not_found_handler),
    };

    let mut app = api.with_state(state);
    if web.cors {
        app = app.layer(CorsLayer::permissive());
    }
    app.layer(middleware::from_fn(access_log))
}
