//! Request middleware
//!
//! Provides action logging, session resolution, and theme preference.

pub mod logging;
pub mod session;
pub mod theme;

pub use logging::ActionLogger;
pub use session::{AuthenticatedUser, resolve_viewer};
pub use theme::Theme;
