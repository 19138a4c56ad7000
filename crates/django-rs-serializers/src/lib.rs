//! # django-rs-serializers
//!
//! Validating serializers generated from django-rs model metadata.
//!
//! A [`ModelSerializerBuilder`] reads a model's [`FieldDef`](django_rs_db::fields::FieldDef)s,
//! maps each one to a typed field with nullability, choice, default, and
//! length rules, and assembles the result into a [`SerializerSchema`] named
//! `<ModelName>Serializer`. The schema validates plain data or live model
//! objects into [`SerializerInstance`]s.
//!
//! ## Module Overview
//!
//! - [`field_map`] - Django field class to scalar type table
//! - [`getters`] - Field selection by include / exclude sets
//! - [`descriptor`] - Normalized field snapshots
//! - [`mapper`] - Field mapping policy
//! - [`schema`] - Target types, field configuration, and schemas
//! - [`builder`] - The model serializer builder
//! - [`serializer`] - Validation and dumping of instances
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::LazyLock;
//! use django_rs_db::fields::{FieldDef, FieldType};
//! use django_rs_db::model::ModelMeta;
//! use django_rs_db::value::Value;
//! use django_rs_serializers::ModelSerializerBuilder;
//!
//! static META: LazyLock<ModelMeta> = LazyLock::new(|| {
//!     ModelMeta::new("blog", "Post", vec![
//!         FieldDef::new("title", FieldType::CharField).max_length(50),
//!         FieldDef::new("status", FieldType::CharField)
//!             .choices([("d", "Draft"), ("p", "Published")])
//!             .default("d"),
//!     ])
//! });
//!
//! let schema = ModelSerializerBuilder::new(&META).build(false).unwrap();
//! let post = schema
//!     .validate(HashMap::from([("title".to_string(), Value::from("Hello"))]))
//!     .unwrap();
//! assert_eq!(post.get("status"), Some(&Value::from("d")));
//! ```

pub mod builder;
pub mod descriptor;
pub mod field_map;
pub mod getters;
pub mod mapper;
pub mod schema;
pub mod serializer;

#[cfg(test)]
mod test_support;

pub use builder::{FieldSelection, ModelSerializerBuilder};
pub use descriptor::FieldDescriptor;
pub use field_map::{ScalarType, DJANGO_FIELD_MAP};
pub use getters::{default_get_fields, FieldsGetter};
pub use mapper::{DefaultFieldMapper, FieldMapper, MappedField, TypeOnlyFieldMapper};
pub use schema::{
    ChoiceEnum, Constraint, DefaultSpec, EnumBase, FieldConfig, SchemaField, SerializerConfig,
    SerializerSchema, TargetType,
};
pub use serializer::SerializerInstance;
