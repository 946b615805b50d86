use crate::db::models::{DbCrewMember, DbShip};
use crate::db::patch::{CrewMemberCreate, DbPatchable, FleetPatch, ShipCreate};
use crate::db::schema::{SQLITE_DROP, SQLITE_INIT};
use crate::db::select::{ensure_ship, find_crew_member, find_ship, ship_select};
use crate::db::store::FleetStore;
use crate::error::{Entity, FleetError};
use crate::query::ShipQuery;
use async_trait::async_trait;
use fleet_schema::{CrewMember, Ship};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

type Reply<T> = RpcReplyPort<Result<T, FleetError>>;

#[derive(Debug)]
pub enum DbActorMessage {
    /// Ships matching a query descriptor.
    ListShips(ShipQuery, Reply<Vec<DbShip>>),

    /// Total ship rows, unfiltered.
    CountShips(Reply<u64>),

    GetShip(i64, Reply<DbShip>),

    /// Insert ships in one transaction; all or nothing.
    CreateShips(Vec<ShipCreate>, Reply<Vec<i64>>),

    /// Patch a ship or a crew member.
    Patch(FleetPatch, Reply<()>),

    /// Delete a ship; crew rows follow via `ON DELETE CASCADE`.
    DeleteShip(i64, Reply<()>),

    ListCrewMembers(i64, Reply<Vec<DbCrewMember>>),

    /// (ship id, crew member id)
    GetCrewMember(i64, i64, Reply<DbCrewMember>),

    CreateCrewMember(i64, CrewMemberCreate, Reply<i64>),

    /// (ship id, crew member id)
    DeleteCrewMember(i64, i64, Reply<()>),

    /// Drop and recreate the schema.
    Reset(Reply<()>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

fn rpc_failed(op: &str, e: impl std::fmt::Display) -> FleetError {
    FleetError::RactorError(format!("DbActor {op} RPC failed: {e}"))
}

#[async_trait]
impl FleetStore for DbActorHandle {
    async fn list_ships(&self, query: ShipQuery) -> Result<Vec<Ship>, FleetError> {
        let rows = ractor::call!(self.actor, DbActorMessage::ListShips, query)
            .map_err(|e| rpc_failed("ListShips", e))??;
        Ok(rows.into_iter().map(Ship::from).collect())
    }

    async fn count_ships(&self) -> Result<u64, FleetError> {
        ractor::call!(self.actor, DbActorMessage::CountShips)
            .map_err(|e| rpc_failed("CountShips", e))?
    }

    async fn get_ship(&self, id: i64) -> Result<Ship, FleetError> {
        let row = ractor::call!(self.actor, DbActorMessage::GetShip, id)
            .map_err(|e| rpc_failed("GetShip", e))??;
        Ok(row.into())
    }

    async fn create_ships(&self, ships: Vec<ShipCreate>) -> Result<Vec<i64>, FleetError> {
        ractor::call!(self.actor, DbActorMessage::CreateShips, ships)
            .map_err(|e| rpc_failed("CreateShips", e))?
    }

    async fn patch(&self, patch: FleetPatch) -> Result<(), FleetError> {
        ractor::call!(self.actor, DbActorMessage::Patch, patch)
            .map_err(|e| rpc_failed("Patch", e))?
    }

    async fn delete_ship(&self, id: i64) -> Result<(), FleetError> {
        ractor::call!(self.actor, DbActorMessage::DeleteShip, id)
            .map_err(|e| rpc_failed("DeleteShip", e))?
    }

    async fn list_crew_members(&self, ship_id: i64) -> Result<Vec<CrewMember>, FleetError> {
        let rows = ractor::call!(self.actor, DbActorMessage::ListCrewMembers, ship_id)
            .map_err(|e| rpc_failed("ListCrewMembers", e))??;
        Ok(rows.into_iter().map(CrewMember::from).collect())
    }

    async fn get_crew_member(&self, ship_id: i64, id: i64) -> Result<CrewMember, FleetError> {
        let row = ractor::call!(self.actor, DbActorMessage::GetCrewMember, ship_id, id)
            .map_err(|e| rpc_failed("GetCrewMember", e))??;
        Ok(row.into())
    }

    async fn create_crew_member(
        &self,
        ship_id: i64,
        member: CrewMemberCreate,
    ) -> Result<i64, FleetError> {
        ractor::call!(self.actor, DbActorMessage::CreateCrewMember, ship_id, member)
            .map_err(|e| rpc_failed("CreateCrewMember", e))?
    }

    async fn delete_crew_member(&self, ship_id: i64, id: i64) -> Result<(), FleetError> {
        ractor::call!(self.actor, DbActorMessage::DeleteCrewMember, ship_id, id)
            .map_err(|e| rpc_failed("DeleteCrewMember", e))?
    }

    async fn reset(&self) -> Result<(), FleetError> {
        ractor::call!(self.actor, DbActorMessage::Reset).map_err(|e| rpc_failed("Reset", e))?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool, SQLITE_INIT)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        let pool = &state.pool;
        match message {
            DbActorMessage::ListShips(query, reply) => {
                let res = self.list_ships(pool, &query).await;
                let _ = reply.send(res);
            }
            DbActorMessage::CountShips(reply) => {
                let res = self.count_ships(pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::GetShip(id, reply) => {
                let _ = reply.send(find_ship(pool, id).await);
            }
            DbActorMessage::CreateShips(ships, reply) => {
                let res = self.create_ships(pool, ships).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Patch(patch, reply) => {
                let res = patch.apply_patch(pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteShip(id, reply) => {
                let res = self.delete_ship(pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListCrewMembers(ship_id, reply) => {
                let res = self.list_crew_members(pool, ship_id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::GetCrewMember(ship_id, id, reply) => {
                let _ = reply.send(find_crew_member(pool, ship_id, id).await);
            }
            DbActorMessage::CreateCrewMember(ship_id, member, reply) => {
                let res = self.create_crew_member(pool, ship_id, member).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteCrewMember(ship_id, id, reply) => {
                let res = self.delete_crew_member(pool, ship_id, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Reset(reply) => {
                let res = self.reset(pool).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn list_ships(
        &self,
        pool: &SqlitePool,
        query: &ShipQuery,
    ) -> Result<Vec<DbShip>, FleetError> {
        let mut qb = ship_select(query);
        let rows = qb.build_query_as::<DbShip>().fetch_all(pool).await?;
        debug!(
            filters = query.filters.len(),
            ordered = query.order.is_some(),
            paged = query.window.is_some(),
            rows = rows.len(),
            "ships listed"
        );
        Ok(rows)
    }

    async fn count_ships(&self, pool: &SqlitePool) -> Result<u64, FleetError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ships")
            .fetch_one(pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn create_ships(
        &self,
        pool: &SqlitePool,
        ships: Vec<ShipCreate>,
    ) -> Result<Vec<i64>, FleetError> {
        // Reject the whole batch before opening a transaction.
        for (index, ship) in ships.iter().enumerate() {
            ship.validate().map_err(|e| {
                if ships.len() > 1 {
                    e.in_record(index)
                } else {
                    e
                }
            })?;
        }

        let mut tx = pool.begin().await?;
        let mut ids = Vec::with_capacity(ships.len());

        for ship in ships {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO ships (name, displacement)
                VALUES (?, ?)
                RETURNING id
                "#,
            )
            .bind(ship.name)
            .bind(ship.displacement)
            .fetch_one(&mut *tx)
            .await?;
            ids.push(id);
        }

        tx.commit().await?;
        info!(count = ids.len(), "ships created");
        Ok(ids)
    }

    async fn delete_ship(&self, pool: &SqlitePool, id: i64) -> Result<(), FleetError> {
        let res = sqlx::query("DELETE FROM ships WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(FleetError::NotFound(Entity::Ship));
        }
        info!(id, "ship deleted with its crew");
        Ok(())
    }

    async fn list_crew_members(
        &self,
        pool: &SqlitePool,
        ship_id: i64,
    ) -> Result<Vec<DbCrewMember>, FleetError> {
        ensure_ship(pool, ship_id).await?;
        let rows = sqlx::query_as::<_, DbCrewMember>(
            r#"
        SELECT id, name, role, ship_id
        FROM crew_members
        WHERE ship_id = ?
        ORDER BY id
        "#,
        )
        .bind(ship_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn create_crew_member(
        &self,
        pool: &SqlitePool,
        ship_id: i64,
        member: CrewMemberCreate,
    ) -> Result<i64, FleetError> {
        member.validate()?;
        ensure_ship(pool, ship_id).await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO crew_members (name, role, ship_id)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(member.name)
        .bind(member.role.as_str())
        .bind(ship_id)
        .fetch_one(pool)
        .await?;

        info!(ship_id, id, role = %member.role, "crew member created");
        Ok(id)
    }

    async fn delete_crew_member(
        &self,
        pool: &SqlitePool,
        ship_id: i64,
        id: i64,
    ) -> Result<(), FleetError> {
        ensure_ship(pool, ship_id).await?;
        let res = sqlx::query("DELETE FROM crew_members WHERE id = ? AND ship_id = ?")
            .bind(id)
            .bind(ship_id)
            .execute(pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(FleetError::NotFound(Entity::CrewMember));
        }
        Ok(())
    }

    async fn reset(&self, pool: &SqlitePool) -> Result<(), FleetError> {
        apply_schema(pool, SQLITE_DROP).await?;
        apply_schema(pool, SQLITE_INIT).await?;
        info!("database schema recreated");
        Ok(())
    }
}

/// Spawn the database actor and return a cloneable handle.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, FleetError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| FleetError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool, ddl: &str) -> Result<(), FleetError> {
    for stmt in ddl.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
