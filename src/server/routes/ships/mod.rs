use crate::server::router::FleetState;
use axum::{Router, routing::get};

pub mod extract;
pub mod handlers;

pub fn router() -> Router<FleetState> {
    Router::new()
        .route(
            "/ships",
            get(handlers::list_ships).post(handlers::create_ships),
        )
        .route(
            "/ships/{id}",
            get(handlers::get_ship)
                .put(handlers::update_ship)
                .delete(handlers::delete_ship),
        )
}
