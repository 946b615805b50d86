use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrewRole {
    Captain,
    Boatswain,
    Deckhand,
}

impl CrewRole {
    pub const ALL: [CrewRole; 3] = [CrewRole::Captain, CrewRole::Boatswain, CrewRole::Deckhand];

    pub const fn as_str(self) -> &'static str {
        match self {
            CrewRole::Captain => "CAPTAIN",
            CrewRole::Boatswain => "BOATSWAIN",
            CrewRole::Deckhand => "DECKHAND",
        }
    }
}

impl fmt::Display for CrewRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role string is not one of the enumerated values.
/// Matching is exact: `captain` is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCrewRole(pub String);

impl fmt::Display for UnknownCrewRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown crew role `{}`", self.0)
    }
}

impl std::error::Error for UnknownCrewRole {}

impl FromStr for CrewRole {
    type Err = UnknownCrewRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CrewRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownCrewRole(s.to_string()))
    }
}

impl TryFrom<String> for CrewRole {
    type Error = UnknownCrewRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A crew member, always scoped to exactly one ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    pub role: CrewRole,
    pub ship_id: i64,
}

/// Request body for creating or updating a crew member.
///
/// `role` stays a plain string so a free-text form can be submitted as-is;
/// the server is the one that rejects values outside [`CrewRole`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMemberDraft {
    pub name: String,
    pub role: String,
}
