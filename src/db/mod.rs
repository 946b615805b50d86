//! Database module: models, schema and the actor that owns the SQLite pool.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `patch.rs`: create/patch payloads and their write-time validation
//! - `select.rs`: read-side SQL, including query-descriptor rendering
//! - `store.rs`: the `FleetStore` seam handlers depend on

pub mod actor;
pub mod models;
pub mod patch;
pub mod schema;
pub mod select;
pub mod store;

mod patch_impl;

pub use models::{DbCrewMember, DbShip};
pub use patch::{CrewMemberCreate, CrewMemberPatch, FleetPatch, ShipCreate, ShipPatch};
pub use schema::SQLITE_INIT;
pub use store::FleetStore;

pub use actor::{DbActorHandle, spawn};
