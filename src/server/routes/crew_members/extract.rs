use fleet_schema::CrewRole;
use serde::Deserialize;

use crate::db::{CrewMemberCreate, CrewMemberPatch};
use crate::error::ValidationError;

/// Crew member fields as they arrive in a request body.
///
/// The parent ship always comes from the path; `id` and `shipId` in the
/// body are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CrewMemberPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

fn parse_role(raw: String) -> Result<CrewRole, ValidationError> {
    raw.parse::<CrewRole>()
        .map_err(|e| ValidationError::UnknownRole(e.0))
}

impl CrewMemberPayload {
    pub fn into_create(self) -> Result<CrewMemberCreate, ValidationError> {
        let name = self.name.ok_or(ValidationError::Missing { field: "name" })?;
        let role = self.role.ok_or(ValidationError::Missing { field: "role" })?;
        Ok(CrewMemberCreate {
            name,
            role: parse_role(role)?,
        })
    }

    pub fn into_patch(self) -> Result<CrewMemberPatch, ValidationError> {
        Ok(CrewMemberPatch {
            name: self.name,
            role: self.role.map(parse_role).transpose()?,
        })
    }
}
