//! Actor System for Watch Mode
//!
//! Message-passing concurrency for `watch`:
//!
//! ```text
//! FsActor --RebuildSignal--> BuildActor --Notifier--> preview sessions
//! (watch)                    (render)     (broadcast)
//! ```
//!
//! # Module Structure
//!
//! - `fs` - File system watcher with debouncing
//! - `build` - Rebuild loop and its state machine
//! - `coordinator` - Wires up and runs actors

pub mod build;
pub mod coordinator;
pub mod fs;

pub use coordinator::Coordinator;
