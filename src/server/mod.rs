//! Server core functionality
//!
//! This module contains the HTTP server, its shared state, and the
//! background session sweeper.

pub mod core;
pub mod state;

pub use self::core::Server;
pub use state::AppState;
