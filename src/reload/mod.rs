//! Live reload plumbing.
//!
//! ```text
//! FsActor --RebuildSignal--> BuildActor --Notifier--> PreviewSession x N --> Browser
//! (watch)    (capacity 1)     (render)    (broadcast)     (websocket)
//! ```
//!
//! # Modules
//!
//! - `message` - JSON messages pushed to browsers
//! - `signal` - Coalescing single-slot rebuild trigger
//! - `notifier` - Fan-out of reload events to preview sessions

pub mod message;
pub mod notifier;
pub mod signal;

pub use message::HotReloadMessage;
pub use notifier::Notifier;
pub use signal::{RebuildReceiver, RebuildSignal, rebuild_channel};
