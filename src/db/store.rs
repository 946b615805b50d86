use async_trait::async_trait;
use fleet_schema::{CrewMember, Ship};

use crate::db::patch::{CrewMemberCreate, FleetPatch, ShipCreate};
use crate::error::FleetError;
use crate::query::ShipQuery;

/// Store-access seam used by the HTTP handlers.
///
/// Every operation that names a parent ship fails with
/// `FleetError::NotFound(Entity::Ship)` before touching the child table when
/// that ship does not exist; child lookups are always scoped to the parent.
#[async_trait]
pub trait FleetStore: Send + Sync {
    /// Filtered/sorted/paginated ship records.
    async fn list_ships(&self, query: ShipQuery) -> Result<Vec<Ship>, FleetError>;

    /// Total number of ships, ignoring any filter.
    async fn count_ships(&self) -> Result<u64, FleetError>;

    async fn get_ship(&self, id: i64) -> Result<Ship, FleetError>;

    /// Validate and insert all ships as one unit; returns ids in input order.
    async fn create_ships(&self, ships: Vec<ShipCreate>) -> Result<Vec<i64>, FleetError>;

    async fn patch(&self, patch: FleetPatch) -> Result<(), FleetError>;

    /// Delete a ship together with its crew.
    async fn delete_ship(&self, id: i64) -> Result<(), FleetError>;

    async fn list_crew_members(&self, ship_id: i64) -> Result<Vec<CrewMember>, FleetError>;

    async fn get_crew_member(&self, ship_id: i64, id: i64) -> Result<CrewMember, FleetError>;

    async fn create_crew_member(
        &self,
        ship_id: i64,
        member: CrewMemberCreate,
    ) -> Result<i64, FleetError>;

    async fn delete_crew_member(&self, ship_id: i64, id: i64) -> Result<(), FleetError>;

    /// Drop and recreate every table.
    async fn reset(&self) -> Result<(), FleetError>;
}
