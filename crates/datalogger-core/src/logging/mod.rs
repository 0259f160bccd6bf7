//! Logging abstractions
//!
//! The resolver reports which tier answered through an injected [`Logger`];
//! callers never see these messages as errors.

mod traits;
mod noop;
mod console;
mod memory;
pub mod file_logger;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::{MemoryLogger, LogRecord};

// Re-export file logger functions for convenience
pub use file_logger::{
    log, trace, debug, info, warn, error,
    log_file_path, LogLevel,
};
