// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The adapters layer implements these traits for the process environment,
//! dotenv files and the filesystem.

pub mod parser;
pub mod source;

// Re-export commonly used types
pub use parser::ConfigParser;
pub use source::ConfigSource;
