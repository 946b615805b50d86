mod client;
mod fleet;
mod validation;

pub use client::ClientError;
pub use fleet::{Entity, FleetError};
pub use validation::ValidationError;
