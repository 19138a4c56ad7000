//! # django-rs-db
//!
//! ORM field vocabulary for the django-rs serializers. Provides the
//! [`Model`](model::Model) trait and [`ModelMeta`](model::ModelMeta) for
//! describing models, [`FieldDef`](fields::FieldDef) and
//! [`FieldType`](fields::FieldType) for their fields, and the backend-agnostic
//! [`Value`](value::Value) type.
//!
//! ## Module Overview
//!
//! - [`model`] - The [`Model`](model::Model) trait and [`ModelMeta`](model::ModelMeta)
//! - [`fields`] - Field definitions, types, and defaults
//! - [`value`] - The [`Value`](value::Value) enum
//! - [`validators`] - Length validators

// These clippy lints are intentionally allowed for the ORM crate:
// - struct_excessive_bools: FieldDef mirrors Django's field API which uses many booleans
// - doc_markdown: backtick requirements for documentation items are too strict
// - return_self_not_must_use: builder pattern methods are self-documenting
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

pub mod fields;
pub mod model;
pub mod validators;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use fields::{DefaultFactory, FieldDef, FieldDefault, FieldType, OnDelete};
pub use model::{Model, ModelMeta};
pub use validators::{MaxLengthValidator, MinLengthValidator, Validator};
pub use value::Value;
