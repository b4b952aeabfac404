//! Directory utilities.
//!
//! # Design
//!
//! - Returns `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

mod ensure;
mod error;

pub use ensure::{DirectoryCreationStrategy, ensure_directory, verify_writable};
pub use error::PathError;
