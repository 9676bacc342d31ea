// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup configuration for an email alias service, in hexagonal layout.
//!
//! Settings are read from the process environment and an optional dotenv
//! file, checked, parsed into typed values, and combined into derived values
//! such as bounce address templates and alias domain lists. Key material is
//! read from disk. The result is one immutable [`Settings`](domain::Settings)
//! snapshot.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and pure logic (`ConfigKey`, `ConfigValue`, `Literal`,
//!   `Settings`, the value composers, errors)
//! - **Ports**: Trait definitions that define interfaces (`ConfigSource`, `ConfigParser`)
//! - **Adapters**: Environment variables, dotenv files, key files on disk
//! - **Service**: Source aggregation, typed access and the settings resolver
//!
//! # Features
//!
//! - **Precedence**: Exported environment variables win over the dotenv file
//! - **Safe literals**: List and tuple settings are parsed by a small literal grammar;
//!   nothing is ever evaluated
//! - **Degradation**: A malformed optional setting is logged and replaced by its default,
//!   while a missing required one stops startup
//! - **No global state**: [`initialize`] returns an owned snapshot
//!
//! # Feature Flags
//!
//! - `dotenv`: Enable dotenv file support (default)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aliascfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let settings = aliascfg::initialize()?;
//! println!("mail for {} via {}", settings.email.email_domain, settings.postfix.server);
//!
//! let bounce: &BounceTemplate = &settings.email.bounce;
//! println!("bounces go to {}", bounce.render(1234));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use service::{initialize, initialize_with_root};

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        BounceTemplate, ConfigError, ConfigKey, ConfigValue, ConfigurationService, Literal,
        PathResolver, Result, Secret, Settings,
    };
    pub use crate::ports::{ConfigParser, ConfigSource};
    pub use crate::service::{
        ConfigurationServiceBuilder, DefaultConfigService, EnvAccessor, FallbackPolicy,
        SettingsResolver,
    };

    // Re-export adapters based on feature flags
    pub use crate::adapters::{EnvVarAdapter, KeyFileLoader};
    #[cfg(feature = "dotenv")]
    pub use crate::adapters::{DotenvFileAdapter, DotenvParser};
}
