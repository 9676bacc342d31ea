// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing the concrete sources and filesystem access.
//!
//! `EnvVarAdapter` and `DotenvFileAdapter` implement the `ConfigSource` port;
//! `KeyFileLoader` reads key material and prepares working directories.

#[cfg(feature = "dotenv")]
pub mod dotenv_file;
pub mod env_var;
pub mod key_files;

// Re-export adapters based on feature flags
#[cfg(feature = "dotenv")]
pub use dotenv_file::{DotenvFileAdapter, DotenvParser};
pub use env_var::EnvVarAdapter;
pub use key_files::KeyFileLoader;
