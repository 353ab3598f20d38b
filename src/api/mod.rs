pub mod handlers;
pub mod routes;
pub mod types;

pub use routes::create_router;
pub use types::{ApiError, Envelope, REQUEST_FAILED};
