//! Core types shared across the build and serve paths.

mod error;
mod state;

pub use error::{BuildError, WatchError};
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
