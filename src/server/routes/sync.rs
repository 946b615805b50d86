use crate::error::FleetError;
use crate::server::router::FleetState;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use tracing::warn;

use super::{Ack, ack};

pub fn router() -> Router<FleetState> {
    Router::new().route("/sync", get(sync_handler))
}

/// GET /sync
///
/// Destructive: drops every table and recreates the schema empty.
pub async fn sync_handler(State(state): State<FleetState>) -> Result<Ack, FleetError> {
    warn!("dropping and recreating all tables");
    state.store.reset().await?;
    Ok(ack(StatusCode::CREATED, "Database synced"))
}
