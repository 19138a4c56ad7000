//! Field definitions and types for the ORM.
//!
//! This module provides the [`FieldDef`] struct and [`FieldType`] enum that
//! describe model fields, plus [`FieldDefault`] for literal and callable
//! defaults. These mirror Django's `django.db.models.fields` module.

pub mod defaults;
pub mod types;

pub use defaults::{DefaultFactory, FieldDefault};
pub use types::{FieldDef, FieldType, OnDelete};
