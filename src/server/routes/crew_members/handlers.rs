use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use fleet_schema::CrewMember;
use serde_json::Value;

use super::extract::CrewMemberPayload;
use crate::db::FleetPatch;
use crate::error::{Entity, FleetError};
use crate::server::extract::{JsonBody, parse_id};
use crate::server::router::FleetState;
use crate::server::routes::{Ack, ack};

fn parse_ids(sid: &str, cid: &str) -> Result<(i64, i64), FleetError> {
    Ok((
        parse_id(sid, Entity::Ship)?,
        parse_id(cid, Entity::CrewMember)?,
    ))
}

/// GET /ships/{sid}/crewmembers
pub async fn list_crew_members(
    State(state): State<FleetState>,
    Path(sid): Path<String>,
) -> Result<Json<Vec<CrewMember>>, FleetError> {
    let ship_id = parse_id(&sid, Entity::Ship)?;
    Ok(Json(state.store.list_crew_members(ship_id).await?))
}

/// GET /ships/{sid}/crewmembers/{cid}
pub async fn get_crew_member(
    State(state): State<FleetState>,
    Path((sid, cid)): Path<(String, String)>,
) -> Result<Json<CrewMember>, FleetError> {
    let (ship_id, id) = parse_ids(&sid, &cid)?;
    Ok(Json(state.store.get_crew_member(ship_id, id).await?))
}

/// POST /ships/{sid}/crewmembers
///
/// Bodies are decoded only once the parent ship is found.
pub async fn create_crew_member(
    State(state): State<FleetState>,
    Path(sid): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Ack, FleetError> {
    let ship_id = parse_id(&sid, Entity::Ship)?;
    state.store.get_ship(ship_id).await?;
    let payload: CrewMemberPayload = serde_json::from_value(body)?;

    state
        .store
        .create_crew_member(ship_id, payload.into_create()?)
        .await?;
    Ok(ack(StatusCode::CREATED, "Crewmember created"))
}

/// PUT /ships/{sid}/crewmembers/{cid}
pub async fn update_crew_member(
    State(state): State<FleetState>,
    Path((sid, cid)): Path<(String, String)>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Ack, FleetError> {
    let (ship_id, id) = parse_ids(&sid, &cid)?;
    state.store.get_crew_member(ship_id, id).await?;
    let payload: CrewMemberPayload = serde_json::from_value(body)?;

    state
        .store
        .patch(FleetPatch::CrewMember {
            ship_id,
            id,
            patch: payload.into_patch()?,
        })
        .await?;
    Ok(ack(StatusCode::ACCEPTED, "Crewmember updated"))
}

/// DELETE /ships/{sid}/crewmembers/{cid}
pub async fn delete_crew_member(
    State(state): State<FleetState>,
    Path((sid, cid)): Path<(String, String)>,
) -> Result<Ack, FleetError> {
    let (ship_id, id) = parse_ids(&sid, &cid)?;
    state.store.delete_crew_member(ship_id, id).await?;
    Ok(ack(StatusCode::ACCEPTED, "Crewmember deleted"))
}
