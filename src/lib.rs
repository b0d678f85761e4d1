pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod session;
pub mod storage;

pub use config::ServerConfig;
pub use routes::router;
pub use server::{AppState, Server};
