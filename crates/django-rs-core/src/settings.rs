//! Settings system for the django-rs serializers.
//!
//! This module provides the [`Settings`] struct, which holds all configuration,
//! and [`LazySettings`], a globally-accessible, lazily-initialized settings
//! instance. The design mirrors Django's `django.conf.settings` with sensible
//! defaults.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// How enumeration types synthesized from field `choices` are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceEnumNaming {
    /// Every choice enum is called `FieldEnum`, whatever field it belongs to.
    Fixed,
    /// The enum is named after its model and field: `Order.status_code` ->
    /// `OrderStatusCodeEnum`.
    #[default]
    PerField,
}

impl ChoiceEnumNaming {
    /// Parses a naming policy from its configuration spelling.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "fixed" => Some(Self::Fixed),
            "per_field" => Some(Self::PerField),
            _ => None,
        }
    }
}

/// Options controlling how model fields are mapped to serializer fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializerSettings {
    /// Naming policy for enums synthesized from `choices`.
    pub choice_enum_naming: ChoiceEnumNaming,
    /// Whether to log a warning when a field type has no typed mapping.
    pub warn_unsupported_fields: bool,
}

impl Default for SerializerSettings {
    fn default() -> Self {
        Self {
            choice_enum_naming: ChoiceEnumNaming::default(),
            warn_unsupported_fields: true,
        }
    }
}

/// The complete set of settings.
///
/// Use [`SETTINGS`] to access the global instance.
///
/// # Examples
///
/// ```
/// use django_rs_core::settings::{ChoiceEnumNaming, Settings};
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.serializers.choice_enum_naming, ChoiceEnumNaming::PerField);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,

    // ── Serializers ──────────────────────────────────────────────────

    /// Field mapping options.
    pub serializers: SerializerSettings,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            serializers: SerializerSettings::default(),
            extra: HashMap::new(),
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup to set the
/// settings, then use [`get`](LazySettings::get) to access them.
///
/// # Panics
///
/// [`get`](LazySettings::get) panics if settings have not been configured.
/// [`configure`](LazySettings::configure) panics if called more than once.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns the configured settings, or `None` if not configured yet.
    pub fn try_get(&self) -> Option<&Settings> {
        self.inner.get()
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
///
/// Call `SETTINGS.configure(settings)` once at application startup. Field
/// mappers built with their `Default` impl consult it when configured.
pub static SETTINGS: LazySettings = LazySettings::new();
