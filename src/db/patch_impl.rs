//! FleetPatch -> DbPatchable implementation.
//!
//! This sits in the `db` module because it contains SQL/table knowledge.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::patch::{CrewMemberPatch, DbPatchable, FleetPatch, ShipPatch};
use crate::db::select::ensure_ship;
use crate::error::{Entity, FleetError};

#[async_trait]
impl DbPatchable for FleetPatch {
    async fn apply_patch(&self, pool: &SqlitePool) -> Result<(), FleetError> {
        self.validate()?;

        match self {
            FleetPatch::Ship { id, patch } => {
                let id = *id;
                let ShipPatch { name, displacement } = patch.clone();

                let name_set = name.is_some();
                let displacement_set = displacement.is_some();

                let res = sqlx::query(
                    r#"
                    UPDATE ships
                    SET
                        name = COALESCE(?, name),
                        displacement = COALESCE(?, displacement)
                    WHERE id = ?
                    "#,
                )
                .bind(name)
                .bind(displacement)
                .bind(id)
                .execute(pool)
                .await?;

                let affected = res.rows_affected();
                debug!(
                    entity = "ship",
                    id,
                    affected,
                    name_set,
                    displacement_set,
                    "db patch applied"
                );

                if affected == 0 {
                    return Err(FleetError::NotFound(Entity::Ship));
                }

                Ok(())
            }

            FleetPatch::CrewMember { ship_id, id, patch } => {
                let (ship_id, id) = (*ship_id, *id);
                ensure_ship(pool, ship_id).await?;

                let CrewMemberPatch { name, role } = patch.clone();

                let name_set = name.is_some();
                let role_set = role.is_some();

                let res = sqlx::query(
                    r#"
                    UPDATE crew_members
                    SET
                        name = COALESCE(?, name),
                        role = COALESCE(?, role)
                    WHERE id = ? AND ship_id = ?
                    "#,
                )
                .bind(name)
                .bind(role.map(|r| r.as_str()))
                .bind(id)
                .bind(ship_id)
                .execute(pool)
                .await?;

                let affected = res.rows_affected();
                debug!(
                    entity = "crew_member",
                    ship_id,
                    id,
                    affected,
                    name_set,
                    role_set,
                    "db patch applied"
                );

                if affected == 0 {
                    return Err(FleetError::NotFound(Entity::CrewMember));
                }

                Ok(())
            }
        }
    }
}
