//! Normalized snapshots of model fields.
//!
//! A [`FieldDescriptor`] holds exactly the attributes the field mapper reads.
//! Describing a field never calls its default factory; whether a default is
//! callable is known from [`FieldDefault`] itself.

use django_rs_db::fields::{DefaultFactory, FieldDef, FieldDefault, FieldType};
use django_rs_db::model::ModelMeta;
use django_rs_db::value::Value;

/// The mapper's view of one model field.
///
/// # Examples
///
/// ```
/// use django_rs_db::fields::{FieldDef, FieldType};
/// use django_rs_serializers::descriptor::FieldDescriptor;
///
/// let field = FieldDef::new("title", FieldType::CharField).max_length(200);
/// let fd = FieldDescriptor::describe(&field, false);
/// assert!(fd.is_required);
/// assert_eq!(fd.max_length, Some(200));
///
/// let fd = FieldDescriptor::describe(&field, true);
/// assert!(!fd.is_required);
/// ```
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// The field name.
    pub name: &'static str,
    /// Class name of the owning model, when the field was described in one.
    pub model: Option<&'static str>,
    /// The declared field type. Its class name keys the type map.
    pub field_type: FieldType,
    /// Whether the field may hold NULL.
    pub allows_null: bool,
    /// Whether the field may hold the empty string.
    pub allows_blank: bool,
    /// Declared maximum length.
    pub max_length: Option<usize>,
    /// Declared `(value, label)` choices.
    pub choices: Option<Vec<(Value, String)>>,
    /// Declared default, literal or factory.
    pub default: Option<FieldDefault>,
    /// Whether the field was described for a partial (update) serializer.
    pub partial: bool,
    /// Whether input must supply this field.
    pub is_required: bool,
}

impl FieldDescriptor {
    /// Takes a snapshot of `field`. With `partial`, no field is required.
    pub fn describe(field: &FieldDef, partial: bool) -> Self {
        Self {
            name: field.name,
            model: None,
            field_type: field.field_type.clone(),
            allows_null: field.null,
            allows_blank: field.blank,
            max_length: field.max_length,
            choices: field.choices.clone(),
            default: field.default.clone(),
            partial,
            is_required: is_required(field.null, partial, field.has_default()),
        }
    }

    /// Like [`describe`](Self::describe), recording `meta` as the owning model.
    pub fn describe_in(meta: &ModelMeta, field: &FieldDef, partial: bool) -> Self {
        Self::describe(field, partial).in_model(meta.object_name)
    }

    /// Creates a descriptor with Django's field defaults, for building by hand.
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            model: None,
            field_type,
            allows_null: false,
            allows_blank: false,
            max_length: None,
            choices: None,
            default: None,
            partial: false,
            is_required: true,
        }
    }

    /// Records the class name of the owning model.
    #[must_use]
    pub const fn in_model(mut self, object_name: &'static str) -> Self {
        self.model = Some(object_name);
        self
    }

    /// Allows NULL.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.allows_null = true;
        self.refresh()
    }

    /// Allows the empty string.
    #[must_use]
    pub const fn blank(mut self) -> Self {
        self.allows_blank = true;
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the choices as `(value, label)` pairs.
    #[must_use]
    pub fn choices<V, L>(mut self, choices: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<Value>,
        L: Into<String>,
    {
        self.choices = Some(
            choices
                .into_iter()
                .map(|(value, label)| (value.into(), label.into()))
                .collect(),
        );
        self
    }

    /// Sets a literal default.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self.refresh()
    }

    /// Sets a default factory.
    #[must_use]
    pub fn default_factory(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(FieldDefault::Factory(DefaultFactory::new(f)));
        self.refresh()
    }

    /// Marks the descriptor as belonging to a partial serializer.
    #[must_use]
    pub fn partial(mut self) -> Self {
        self.partial = true;
        self.refresh()
    }

    /// Returns the Django class name of the field type.
    pub const fn type_name(&self) -> &'static str {
        self.field_type.type_name()
    }

    /// Returns `true` if at least one choice is declared.
    pub fn has_choices(&self) -> bool {
        self.choices.as_ref().is_some_and(|c| !c.is_empty())
    }

    fn refresh(mut self) -> Self {
        self.is_required = is_required(self.allows_null, self.partial, self.default.is_some());
        self
    }
}

const fn is_required(allows_null: bool, partial: bool, has_default: bool) -> bool {
    !(allows_null || partial || has_default)
}
