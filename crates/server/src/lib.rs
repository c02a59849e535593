//! HTTP surface of the Chaeum location page: the bootstrap configuration,
//! per-language fragments, the directions redirect and server-rendered map
//! scenes.

pub mod export;
pub mod logging;
pub mod routes;
pub mod server;

pub use routes::{AppState, create_router};
pub use server::SiteServer;
