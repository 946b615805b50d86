use fleet_schema::{CrewMember, CrewRole, Ship};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbShip {
    pub id: i64,
    pub name: String,
    pub displacement: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbCrewMember {
    pub id: i64,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub role: CrewRole,
    pub ship_id: i64,
}

impl From<DbShip> for Ship {
    fn from(d: DbShip) -> Self {
        Ship {
            id: d.id,
            name: d.name,
            displacement: d.displacement,
        }
    }
}

impl From<DbCrewMember> for CrewMember {
    fn from(d: DbCrewMember) -> Self {
        CrewMember {
            id: d.id,
            name: d.name,
            role: d.role,
            ship_id: d.ship_id,
        }
    }
}
