use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::{Entity, FleetError};

/// JSON body extractor whose rejection is a [`FleetError::InvalidPayload`],
/// so malformed bodies share the API error envelope.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = FleetError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Path ids that are not integers can never match a row.
pub(crate) fn parse_id(raw: &str, entity: Entity) -> Result<i64, FleetError> {
    raw.parse::<i64>().map_err(|_| FleetError::NotFound(entity))
}
