pub mod app;
pub mod fetcher;

pub use app::*;
pub use fetcher::*;
