//! Utility functions for the django-rs serializers.
//!
//! - [`text`]: String helpers used when deriving type names from field names.

pub mod text;
