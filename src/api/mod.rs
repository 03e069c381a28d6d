pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

/// Path the render client fetches the listing from.
pub const MOVIES_PATH: &str = "/api/movies";
