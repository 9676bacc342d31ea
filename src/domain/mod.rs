// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and pure logic.
//!
//! Nothing in this module touches the environment or the filesystem; the
//! adapters and the resolver do that and feed the results in here.

pub mod compose;
pub mod config_key;
pub mod config_value;
pub mod constants;
pub mod errors;
pub mod literal;
pub mod paths;
pub mod service;
pub mod settings;

// Re-export commonly used types
pub use compose::BounceTemplate;
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use errors::{ConfigError, Result};
pub use literal::{FromLiteral, Literal};
pub use paths::PathResolver;
pub use service::ConfigurationService;
pub use settings::{Secret, Settings};
