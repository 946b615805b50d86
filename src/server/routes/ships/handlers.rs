use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use fleet_schema::{Ship, ShipList};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use super::extract::{CreateParams, ShipPayload};
use crate::db::FleetPatch;
use crate::error::{Entity, FleetError};
use crate::query::ShipQuery;
use crate::server::extract::{JsonBody, parse_id};
use crate::server::router::FleetState;
use crate::server::routes::{Ack, ack};

/// GET /ships
///
/// `count` is the unfiltered table size, whatever filter produced `records`.
pub async fn list_ships(
    State(state): State<FleetState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ShipList>, FleetError> {
    let query = ShipQuery::from_params(&params);
    debug!(?query, "ship list query");

    let records = state.store.list_ships(query).await?;
    let count = state.store.count_ships().await?;
    Ok(Json(ShipList { records, count }))
}

/// GET /ships/{id}
pub async fn get_ship(
    State(state): State<FleetState>,
    Path(id): Path<String>,
) -> Result<Json<Ship>, FleetError> {
    let id = parse_id(&id, Entity::Ship)?;
    Ok(Json(state.store.get_ship(id).await?))
}

/// POST /ships, or POST /ships?bulk=on with an array body.
///
/// A bulk request is inserted as a unit: one invalid record rejects all.
pub async fn create_ships(
    State(state): State<FleetState>,
    Query(params): Query<CreateParams>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Ack, FleetError> {
    if params.is_bulk() {
        let payloads: Vec<ShipPayload> = serde_json::from_value(body)?;
        let ships = payloads
            .into_iter()
            .enumerate()
            .map(|(index, p)| p.into_create().map_err(|e| e.in_record(index)))
            .collect::<Result<Vec<_>, _>>()?;
        state.store.create_ships(ships).await?;
        Ok(ack(StatusCode::CREATED, "Ships created"))
    } else {
        let payload: ShipPayload = serde_json::from_value(body)?;
        state.store.create_ships(vec![payload.into_create()?]).await?;
        Ok(ack(StatusCode::CREATED, "Ship created"))
    }
}

/// PUT /ships/{id}
///
/// Only `name` and `displacement` are writable. The body is decoded after
/// the ship is found, so an unknown id is 404 whatever the body.
pub async fn update_ship(
    State(state): State<FleetState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Ack, FleetError> {
    let id = parse_id(&id, Entity::Ship)?;
    state.store.get_ship(id).await?;
    let payload: ShipPayload = serde_json::from_value(body)?;

    state
        .store
        .patch(FleetPatch::Ship {
            id,
            patch: payload.into_patch(),
        })
        .await?;
    Ok(ack(StatusCode::ACCEPTED, "Ship updated"))
}

/// DELETE /ships/{id}
///
/// The ship's crew members are removed with it.
pub async fn delete_ship(
    State(state): State<FleetState>,
    Path(id): Path<String>,
) -> Result<Ack, FleetError> {
    let id = parse_id(&id, Entity::Ship)?;
    state.store.delete_ship(id).await?;
    Ok(ack(StatusCode::ACCEPTED, "Ship deleted"))
}
