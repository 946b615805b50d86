use crate::server::router::FleetState;
use axum::{Router, routing::get};

pub mod extract;
pub mod handlers;

pub fn router() -> Router<FleetState> {
    Router::new()
        .route(
            "/ships/{sid}/crewmembers",
            get(handlers::list_crew_members).post(handlers::create_crew_member),
        )
        .route(
            "/ships/{sid}/crewmembers/{cid}",
            get(handlers::get_crew_member)
                .put(handlers::update_crew_member)
                .delete(handlers::delete_crew_member),
        )
}
