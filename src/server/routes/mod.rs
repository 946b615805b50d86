pub mod crew_members;
pub mod ships;
pub mod sync;

use axum::{Json, http::StatusCode};
use fleet_schema::MessageBody;

pub(crate) type Ack = (StatusCode, Json<MessageBody>);

pub(crate) fn ack(status: StatusCode, message: &str) -> Ack {
    (status, Json(MessageBody::new(message)))
}
