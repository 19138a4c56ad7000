//! Logging integration for the django-rs serializers.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-build spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level` (e.g. "debug", "info", "warn",
/// "error"). In debug mode a pretty, human-readable format is used; otherwise
/// a structured JSON format is used. Installing a second subscriber is a
/// silent no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for building a serializer for one model.
///
/// Everything logged while mapping the model's fields (such as warnings about
/// unsupported field types) is attributed to this span.
///
/// # Examples
///
/// ```
/// use django_rs_core::logging::build_span;
///
/// let span = build_span("blog", "Article");
/// let _guard = span.enter();
/// tracing::info!("mapping fields");
/// ```
pub fn build_span(app_label: &str, object_name: &str) -> tracing::Span {
    tracing::debug_span!("serializer_build", app = app_label, model = object_name)
}
