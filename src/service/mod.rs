// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: source aggregation, typed access and settings resolution.
//!
//! `DefaultConfigService` implements the `ConfigurationService` trait over a
//! stack of sources. `SettingsResolver` reads through it with an
//! `EnvAccessor` and produces the final `Settings`.

pub mod accessor;
pub mod bootstrap;
pub mod default_service;
pub mod resolver;

// Re-export commonly used types
pub use accessor::{EnvAccessor, FallbackPolicy};
pub use bootstrap::{initialize, initialize_with_root};
pub use default_service::{ConfigurationServiceBuilder, DefaultConfigService};
pub use resolver::SettingsResolver;
