pub mod error;
pub mod handlers;
pub mod metrics;
pub mod params;
pub mod payloads;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::configure_routes;
pub use state::ApiState;
