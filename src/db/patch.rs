//! Create and patch payloads for the store, plus their write-time checks.

use async_trait::async_trait;
use fleet_schema::CrewRole;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::{FleetError, ValidationError};

pub const SHIP_NAME_MIN_LEN: usize = 3;
pub const SHIP_DISPLACEMENT_MIN: i64 = 51;
pub const CREW_NAME_MIN_LEN: usize = 5;

/// Abstraction for applying a patch payload/envelope to the database.
#[async_trait]
pub trait DbPatchable {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<(), FleetError>;
}

/// Names may not contain NUL: SQLite's `length()` stops at the first one.
fn check_name(field: &'static str, value: &str, min: usize) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::NulCharacter { field });
    }
    if value.chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(())
}

fn check_displacement(value: i64) -> Result<(), ValidationError> {
    if value < SHIP_DISPLACEMENT_MIN {
        return Err(ValidationError::BelowMinimum {
            field: "displacement",
            min: SHIP_DISPLACEMENT_MIN,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipCreate {
    pub name: String,
    pub displacement: i64,
}

impl ShipCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name("name", &self.name, SHIP_NAME_MIN_LEN)?;
        check_displacement(self.displacement)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMemberCreate {
    pub name: String,
    pub role: CrewRole,
}

impl CrewMemberCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_name("name", &self.name, CREW_NAME_MIN_LEN)
    }
}

/// Mutable ship fields. `None` => do not change; `Some(v)` => update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipPatch {
    pub name: Option<String>,
    pub displacement: Option<i64>,
}

impl ShipPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_name("name", name, SHIP_NAME_MIN_LEN)?;
        }
        if let Some(displacement) = self.displacement {
            check_displacement(displacement)?;
        }
        Ok(())
    }
}

/// Mutable crew member fields. `None` => do not change; `Some(v)` => update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMemberPatch {
    pub name: Option<String>,
    pub role: Option<CrewRole>,
}

impl CrewMemberPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_name("name", name, CREW_NAME_MIN_LEN)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum FleetPatch {
    Ship {
        id: i64,
        patch: ShipPatch,
    },
    CrewMember {
        ship_id: i64,
        id: i64,
        patch: CrewMemberPatch,
    },
}

impl FleetPatch {
    pub fn id(&self) -> i64 {
        match self {
            FleetPatch::Ship { id, .. } | FleetPatch::CrewMember { id, .. } => *id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            FleetPatch::Ship { patch, .. } => patch.validate(),
            FleetPatch::CrewMember { patch, .. } => patch.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship(name: &str, displacement: i64) -> ShipCreate {
        ShipCreate {
            name: name.to_string(),
            displacement,
        }
    }

    #[test]
    fn displacement_boundary() {
        assert_eq!(
            ship("Nautilus", 50).validate(),
            Err(ValidationError::BelowMinimum {
                field: "displacement",
                min: 51
            })
        );
        assert!(ship("Nautilus", 51).validate().is_ok());
    }

    #[test]
    fn ship_name_length_counts_characters() {
        assert!(ship("Ab", 100).validate().is_err());
        assert!(ship("Abc", 100).validate().is_ok());
        // Two characters, four bytes.
        assert!(ship("Åø", 100).validate().is_err());
    }

    #[test]
    fn names_with_nul_are_rejected() {
        assert_eq!(
            ship("ab\0cd", 100).validate(),
            Err(ValidationError::NulCharacter { field: "name" })
        );
        let patch = CrewMemberPatch {
            name: Some("Ishmael\0".to_string()),
            role: None,
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn crew_name_needs_five_characters() {
        let mut member = CrewMemberCreate {
            name: "Nemo".to_string(),
            role: CrewRole::Captain,
        };
        assert_eq!(
            member.validate(),
            Err(ValidationError::TooShort {
                field: "name",
                min: 5
            })
        );
        member.name = "Nemo!".to_string();
        assert!(member.validate().is_ok());
    }

    #[test]
    fn patches_only_check_supplied_fields() {
        assert!(ShipPatch::default().validate().is_ok());
        let patch = ShipPatch {
            name: Some("X1".to_string()),
            displacement: None,
        };
        assert!(patch.validate().is_err());
        let patch = ShipPatch {
            name: None,
            displacement: Some(51),
        };
        assert!(patch.validate().is_ok());

        let envelope = FleetPatch::CrewMember {
            ship_id: 1,
            id: 2,
            patch: CrewMemberPatch {
                name: Some("Bob".to_string()),
                role: None,
            },
        };
        assert_eq!(envelope.id(), 2);
        assert!(envelope.validate().is_err());
    }
}
