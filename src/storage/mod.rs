//! File-backed storage
//!
//! Handles the signup record document and shared file system helpers.

pub mod filesystem;
pub mod models;
pub mod records;

pub use models::UserRecord;
pub use records::RecordStore;
