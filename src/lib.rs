pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod query;
pub mod server;

pub use error::{ClientError, FleetError};
pub use server::router::{FleetState, fleet_router};
