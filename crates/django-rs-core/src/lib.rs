//! # django-rs-core
//!
//! Core types for the django-rs serializers: errors, settings, logging, and
//! text helpers. This crate has no dependency on the ORM or serializer
//! crates and provides the foundation for both.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Settings and the global configuration slot
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`utils`] - Text helpers (`capfirst`, `pascal_case`)

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{DjangoError, DjangoResult, ValidationError};
pub use settings::{ChoiceEnumNaming, SerializerSettings, Settings, SETTINGS};
