//! Observable events in shoebox
//!
//! Events are explicit and typed; they are logged as the `event` field.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration resolved and validated
    ConfigLoaded,
    /// Persistence backend opened
    StoreOpened,
    /// Listener bound, ready to serve
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// Server drained and stopped
    ShutdownComplete,
    /// Startup failed
    BootFailed,

    // Shoe writes
    ShoeCreated,
    ShoeUpdated,
    ShoeDeleted,

    // Request failures
    /// A request failed with an unexpected internal error
    RequestFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "SHOEBOX_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::Serving => "SHOEBOX_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::BootFailed => "SHOEBOX_STARTUP_FAILED",

            Event::ShoeCreated => "SHOE_CREATED",
            Event::ShoeUpdated => "SHOE_UPDATED",
            Event::ShoeDeleted => "SHOE_DELETED",

            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Failures are logged at error level, everything else at info
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::BootFailed | Event::RequestFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(Event::ShoeCreated.to_string(), "SHOE_CREATED");
        assert_eq!(Event::Serving.to_string(), Event::Serving.as_str());
    }

    #[test]
    fn test_failure_events() {
        assert!(Event::RequestFailed.is_failure());
        assert!(Event::BootFailed.is_failure());
        assert!(!Event::ShoeDeleted.is_failure());
    }
}
