mod api_error;
mod catalog_routes;
pub mod config;
mod game_routes;
mod http_layers;
pub mod metrics;
mod preview_routes;
pub mod server;
pub mod state;

pub use api_error::ApiError;
pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
