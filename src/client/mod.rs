//! Client side of the fleet API: a typed HTTP client plus the state the
//! admin UI keeps around the ship list.

pub mod api;
pub mod controller;
pub mod dialog;
pub mod query_state;
pub mod view;

pub use api::FleetClient;
pub use controller::ShipListController;
pub use dialog::{DialogState, DialogSubmit};
pub use query_state::ShipQueryState;
pub use view::{CrewListView, FetchView, ShipListView, Ticket};
