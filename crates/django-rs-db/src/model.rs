//! Model trait and metadata for the ORM.
//!
//! The [`Model`] trait is the abstraction ORM models implement. It exposes the
//! model's static metadata and the current field values of an instance. This
//! mirrors the parts of Django's `django.db.models.Model` that serializers use.
//!
//! [`ModelMeta`] captures the equivalent of Django's `Model._meta`: the app
//! label, the class name, and the ordered list of field definitions.

use crate::fields::FieldDef;
use crate::value::Value;

/// The core trait for all ORM models.
///
/// # Examples
///
/// ```
/// use django_rs_db::model::{Model, ModelMeta};
/// use django_rs_db::fields::{FieldDef, FieldType};
/// use django_rs_db::value::Value;
///
/// struct Article {
///     id: i64,
///     title: String,
/// }
///
/// impl Model for Article {
///     fn meta() -> &'static ModelMeta {
///         use std::sync::LazyLock;
///         static META: LazyLock<ModelMeta> = LazyLock::new(|| {
///             ModelMeta::new(
///                 "blog",
///                 "Article",
///                 vec![
///                     FieldDef::new("id", FieldType::BigAutoField).primary_key(),
///                     FieldDef::new("title", FieldType::CharField).max_length(200),
///                 ],
///             )
///         });
///         &META
///     }
///
///     fn field_values(&self) -> Vec<(&'static str, Value)> {
///         vec![("id", Value::Int(self.id)), ("title", Value::String(self.title.clone()))]
///     }
/// }
///
/// assert_eq!(Article::meta().label(), "blog.Article");
/// ```
pub trait Model: Send + Sync + 'static {
    /// Returns the static metadata for this model type.
    fn meta() -> &'static ModelMeta;

    /// Returns all field name-value pairs for this instance, in field order.
    fn field_values(&self) -> Vec<(&'static str, Value)>;

    /// Returns the value of a single field, if the model has it.
    fn field_value(&self, name: &str) -> Option<Value> {
        self.field_values()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }
}

/// Metadata about a model, equivalent to Django's `Model._meta`.
#[derive(Debug)]
pub struct ModelMeta {
    /// The application label (e.g., "auth", "blog").
    pub app_label: &'static str,
    /// The model class name (e.g., "Article"), Django's `object_name`.
    pub object_name: &'static str,
    /// Field definitions for this model, in declaration order.
    pub fields: Vec<FieldDef>,
}

impl ModelMeta {
    /// Creates metadata for a model.
    pub fn new(app_label: &'static str, object_name: &'static str, fields: Vec<FieldDef>) -> Self {
        Self {
            app_label,
            object_name,
            fields,
        }
    }

    /// Returns the `app_label.ModelName` label.
    pub fn label(&self) -> String {
        format!("{}.{}", self.app_label, self.object_name)
    }

    /// Looks up a field definition by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns all field names in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}
