//! Session management
//!
//! Server-side sessions keyed by an opaque cookie token, with a sliding
//! expiry. Handlers reach the store only through [`SessionManager`].

pub mod manager;
pub mod registry;
pub mod state;
pub mod store;

pub use manager::SessionManager;
pub use registry::InMemorySessionStore;
pub use state::{Session, Viewer};
pub use store::{SessionStore, SessionStoreRef};
