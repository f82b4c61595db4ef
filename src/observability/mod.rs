//! Observability for shoebox
//!
//! - Structured logging through `tracing` (JSON lines by default)
//! - Typed lifecycle events, emitted as the `event` field
//!
//! ```ignore
//! use shoebox::observability::{log_event, Event};
//!
//! log_event(Event::BootStart);
//! tracing::info!(event = %Event::ShoeCreated, id = %shoe.id, "shoe created");
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{init_logging, LogFormat};

/// Log a fieldless lifecycle event
pub fn log_event(event: Event) {
    if event.is_failure() {
        tracing::error!(event = event.as_str());
    } else {
        tracing::info!(event = event.as_str());
    }
}
