//! The model serializer builder.
//!
//! [`ModelSerializerBuilder`] stages a model, an optional field selection, a
//! field getter, and a field mapper, then builds a [`SerializerSchema`]. A
//! selection may be made once per builder, through either
//! [`with_fields`](ModelSerializerBuilder::with_fields) or
//! [`without_fields`](ModelSerializerBuilder::without_fields).

use std::collections::BTreeSet;
use std::fmt;

use django_rs_core::logging::build_span;
use django_rs_core::{DjangoError, DjangoResult};
use django_rs_db::model::{Model, ModelMeta};

use crate::getters::{default_get_fields, FieldsGetter};
use crate::mapper::{DefaultFieldMapper, FieldMapper};
use crate::schema::{SchemaField, SerializerConfig, SerializerSchema};

const RESELECT_ERROR: &str = "Cannot include and exclude fields at the same time";

/// Which fields a builder covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldSelection {
    /// No selection made; all fields are used.
    #[default]
    Unselected,
    /// Exactly these field names are used.
    Selected(BTreeSet<String>),
}

impl FieldSelection {
    /// Returns `true` once a selection has been made.
    pub const fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }

    /// Returns the selection as an include filter, `None` meaning all fields.
    pub const fn as_include(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Unselected => None,
            Self::Selected(names) => Some(names),
        }
    }
}

/// Builds a [`SerializerSchema`] for one model.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
/// use django_rs_db::fields::{FieldDef, FieldType};
/// use django_rs_db::model::ModelMeta;
/// use django_rs_serializers::builder::ModelSerializerBuilder;
///
/// static META: LazyLock<ModelMeta> = LazyLock::new(|| {
///     ModelMeta::new("blog", "Post", vec![
///         FieldDef::new("id", FieldType::BigAutoField).primary_key(),
///         FieldDef::new("title", FieldType::CharField).max_length(200),
///         FieldDef::new("body", FieldType::TextField),
///     ])
/// });
///
/// let schema = ModelSerializerBuilder::new(&META)
///     .without_fields(["id"])
///     .unwrap()
///     .build(false)
///     .unwrap();
/// assert_eq!(schema.name, "PostSerializer");
/// assert_eq!(schema.field_names(), ["title", "body"]);
/// ```
pub struct ModelSerializerBuilder {
    model: &'static ModelMeta,
    fields: FieldSelection,
    fields_getter: FieldsGetter,
    field_mapper: Box<dyn FieldMapper>,
}

impl ModelSerializerBuilder {
    /// Creates a builder with the default getter and mapper.
    pub fn new(model: &'static ModelMeta) -> Self {
        Self::from_model_with(model, default_get_fields, DefaultFieldMapper::default())
    }

    /// Creates a builder for the model type `M`.
    pub fn from_model<M: Model>() -> Self {
        Self::new(M::meta())
    }

    /// Creates a builder with a custom getter and mapper.
    pub fn from_model_with(
        model: &'static ModelMeta,
        fields_getter: FieldsGetter,
        field_mapper: impl FieldMapper + 'static,
    ) -> Self {
        Self {
            model,
            fields: FieldSelection::Unselected,
            fields_getter,
            field_mapper: Box::new(field_mapper),
        }
    }

    /// Builds the default serializer for `M` in one call.
    pub fn serializer_for<M: Model>() -> DjangoResult<SerializerSchema> {
        Self::from_model::<M>().build(false)
    }

    /// Returns the model this builder targets.
    pub const fn model(&self) -> &'static ModelMeta {
        self.model
    }

    /// Returns the current field selection.
    pub const fn selection(&self) -> &FieldSelection {
        &self.fields
    }

    /// Restricts the serializer to the named fields.
    ///
    /// Fails if a selection was already made.
    pub fn with_fields<I, S>(mut self, names: I) -> DjangoResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_unselected()?;
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        tracing::debug!(model = %self.model.label(), fields = ?names, "Selected serializer fields");
        self.fields = FieldSelection::Selected(names);
        Ok(self)
    }

    /// Restricts the serializer to every field except the named ones.
    ///
    /// The remaining names are computed now, with the configured getter.
    /// Fails if a selection was already made.
    pub fn without_fields<I, S>(mut self, names: I) -> DjangoResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_unselected()?;
        let excluded: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        let remaining: BTreeSet<String> = (self.fields_getter)(self.model, None, None)?
            .into_iter()
            .map(|f| f.name.to_string())
            .filter(|name| !excluded.contains(name))
            .collect();
        tracing::debug!(model = %self.model.label(), excluded = ?excluded, "Excluded serializer fields");
        self.fields = FieldSelection::Selected(remaining);
        Ok(self)
    }

    /// Builds the serializer schema.
    ///
    /// With `partial`, no field is required. The builder is left unchanged,
    /// so `build` may be called repeatedly.
    pub fn build(&self, partial: bool) -> DjangoResult<SerializerSchema> {
        let span = build_span(self.model.app_label, self.model.object_name);
        let _guard = span.enter();

        let include = self.fields.as_include();
        let model_fields = (self.fields_getter)(self.model, include, None)?;

        let fields: Vec<SchemaField> = model_fields
            .into_iter()
            .map(|field| {
                let mapped = self.field_mapper.map_model_field(self.model, field, partial);
                SchemaField {
                    name: field.name.to_string(),
                    target_type: mapped.target_type,
                    config: mapped.config,
                }
            })
            .collect();

        tracing::debug!(fields = fields.len(), partial, "Built serializer");

        Ok(SerializerSchema {
            name: format!("{}Serializer", self.model.object_name),
            config: SerializerConfig {
                model: self.model,
                include_fields: include.cloned(),
            },
            fields,
        })
    }

    fn ensure_unselected(&self) -> DjangoResult<()> {
        if self.fields.is_selected() {
            return Err(DjangoError::InvalidState(RESELECT_ERROR.to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for ModelSerializerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSerializerBuilder")
            .field("model", &self.model.label())
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_map::ScalarType;
    use crate::mapper::{MappedField, TypeOnlyFieldMapper};
    use crate::schema::{FieldConfig, TargetType};
    use django_rs_db::fields::{FieldDef, FieldType};
    use django_rs_db::value::Value;
    use std::sync::LazyLock;

    static ARTICLE_META: LazyLock<ModelMeta> = LazyLock::new(|| {
        ModelMeta::new(
            "blog",
            "Article",
            vec![
                FieldDef::new("id", FieldType::BigAutoField).primary_key(),
                FieldDef::new("title", FieldType::CharField).max_length(200),
                FieldDef::new("body", FieldType::TextField).blank(),
                FieldDef::new("published", FieldType::BooleanField).default(false),
            ],
        )
    });

    static EMPTY_META: LazyLock<ModelMeta> =
        LazyLock::new(|| ModelMeta::new("blog", "Empty", Vec::new()));

    fn first_field_only<'m>(
        meta: &'m ModelMeta,
        _include: Option<&BTreeSet<String>>,
        _exclude: Option<&BTreeSet<String>>,
    ) -> DjangoResult<Vec<&'m FieldDef>> {
        Ok(meta.fields.iter().take(1).collect())
    }

    #[test]
    fn test_build_all_fields() {
        let schema = ModelSerializerBuilder::new(&ARTICLE_META).build(false).unwrap();
        assert_eq!(schema.name, "ArticleSerializer");
        assert_eq!(schema.field_names(), vec!["id", "title", "body", "published"]);
        assert!(schema.config.include_fields.is_none());
        assert!(std::ptr::eq(schema.model(), &*ARTICLE_META));
    }

    #[test]
    fn test_with_fields() {
        let schema = ModelSerializerBuilder::new(&ARTICLE_META)
            .with_fields(["title", "id"])
            .unwrap()
            .build(false)
            .unwrap();
        assert_eq!(schema.field_names(), vec!["id", "title"]);
        let include = schema.config.include_fields.unwrap();
        assert!(include.contains("id") && include.contains("title"));
    }

    #[test]
    fn test_without_fields_materializes_selection() {
        let builder = ModelSerializerBuilder::new(&ARTICLE_META)
            .without_fields(["body"])
            .unwrap();
        let expected: BTreeSet<String> = ["id", "title", "published"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(builder.selection(), &FieldSelection::Selected(expected));
        let schema = builder.build(false).unwrap();
        assert_eq!(schema.field_names(), vec!["id", "title", "published"]);
    }

    #[test]
    fn test_reselection_is_invalid_state() {
        let err = ModelSerializerBuilder::new(&ARTICLE_META)
            .with_fields(["title"])
            .unwrap()
            .with_fields(["body"])
            .unwrap_err();
        assert!(matches!(
            err,
            DjangoError::InvalidState(ref msg) if msg == RESELECT_ERROR
        ));

        let err = ModelSerializerBuilder::new(&ARTICLE_META)
            .without_fields(["title"])
            .unwrap()
            .with_fields(["body"])
            .unwrap_err();
        assert!(matches!(err, DjangoError::InvalidState(_)));

        let err = ModelSerializerBuilder::new(&ARTICLE_META)
            .with_fields(["title"])
            .unwrap()
            .without_fields(["body"])
            .unwrap_err();
        assert!(matches!(err, DjangoError::InvalidState(_)));
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let schema = ModelSerializerBuilder::new(&ARTICLE_META)
            .with_fields(["title", "missing"])
            .unwrap()
            .build(false)
            .unwrap();
        assert_eq!(schema.field_names(), vec!["title"]);
    }

    #[test]
    fn test_build_is_repeatable() {
        let builder = ModelSerializerBuilder::new(&ARTICLE_META)
            .with_fields(["title"])
            .unwrap();
        let full = builder.build(false).unwrap();
        let partial = builder.build(true).unwrap();
        assert!(full.field("title").unwrap().config.required);
        assert!(!partial.field("title").unwrap().config.required);
        assert!(builder.selection().is_selected());
    }

    #[test]
    fn test_field_specs() {
        let schema = ModelSerializerBuilder::new(&ARTICLE_META).build(false).unwrap();
        let title = schema.field("title").unwrap();
        assert_eq!(title.target_type, TargetType::Scalar(ScalarType::Str));
        assert_eq!(title.config.min_length(), Some(1));
        assert_eq!(title.config.max_length(), Some(200));
        let body = schema.field("body").unwrap();
        assert_eq!(body.config.min_length(), Some(0));
        let published = schema.field("published").unwrap();
        assert_eq!(published.config.default_value(), Some(&Value::Bool(false)));
        assert!(!published.config.required);
    }

    #[test]
    fn test_empty_model() {
        let schema = ModelSerializerBuilder::new(&EMPTY_META).build(false).unwrap();
        assert_eq!(schema.name, "EmptySerializer");
        assert!(schema.is_empty());
    }

    #[test]
    fn test_custom_getter_and_mapper() {
        let builder = ModelSerializerBuilder::from_model_with(
            &ARTICLE_META,
            first_field_only,
            TypeOnlyFieldMapper,
        );
        let schema = builder.build(false).unwrap();
        assert_eq!(schema.field_names(), vec!["id"]);
        assert_eq!(
            schema.fields[0].target_type,
            TargetType::Scalar(ScalarType::Int)
        );
    }

    #[test]
    fn test_closure_mapper() {
        let builder = ModelSerializerBuilder::from_model_with(
            &ARTICLE_META,
            default_get_fields,
            |_: &FieldDef, partial: bool| MappedField {
                target_type: TargetType::Scalar(ScalarType::Any),
                config: FieldConfig {
                    required: !partial,
                    ..FieldConfig::default()
                },
            },
        );
        let schema = builder.build(true).unwrap();
        assert!(schema
            .fields
            .iter()
            .all(|f| f.target_type == TargetType::Scalar(ScalarType::Any) && !f.config.required));
    }

    #[test]
    fn test_debug_output() {
        let builder = ModelSerializerBuilder::new(&ARTICLE_META);
        let debug = format!("{builder:?}");
        assert!(debug.contains("blog.Article"));
        assert!(debug.contains("Unselected"));
    }
}
