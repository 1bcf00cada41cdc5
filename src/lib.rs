#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_possible_truncation, // Safe within realistic value bounds (counts, sizes)
    clippy::cast_sign_loss,           // Safe where values are known non-negative
    clippy::missing_errors_doc,       // Internal API
    clippy::missing_panics_doc,       // Internal API
    clippy::module_name_repetitions,  // e.g. SourceError in source module
    clippy::must_use_candidate        // Annotated selectively on critical APIs
)]

pub mod app;
pub mod parser;
pub mod sender;
pub mod source;

// Re-export main types for easy access
pub use app::{Config, handle_event};
pub use parser::AlbLogRecord;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
