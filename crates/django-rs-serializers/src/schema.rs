//! Serializer schemas: target types, per-field configuration, and the schema
//! value a builder produces for a model.

use std::collections::BTreeSet;
use std::fmt;

use django_rs_core::ValidationError;
use django_rs_db::fields::DefaultFactory;
use django_rs_db::model::ModelMeta;
use django_rs_db::validators::{MaxLengthValidator, MinLengthValidator, Validator};
use django_rs_db::value::Value;

use crate::field_map::ScalarType;

/// The value kind a choice enum is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumBase {
    /// Integer-valued members.
    Int,
    /// String-valued members.
    Str,
    /// Members of any other kind.
    Plain,
}

impl EnumBase {
    /// Returns the scalar input is coerced through before a membership check.
    pub const fn scalar(self) -> ScalarType {
        match self {
            Self::Int => ScalarType::Int,
            Self::Str => ScalarType::Str,
            Self::Plain => ScalarType::Any,
        }
    }
}

/// An enumeration synthesized from a field's `choices`.
///
/// Members map the display label to the stored value, in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceEnum {
    /// The enum's type name, e.g. `StatusEnum`.
    pub name: String,
    /// The kind of value the members hold.
    pub base: EnumBase,
    /// `(label, value)` members.
    pub members: Vec<(String, Value)>,
}

impl ChoiceEnum {
    /// Returns the value of the member with the given label.
    pub fn value_of(&self, label: &str) -> Option<&Value> {
        self.members
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    /// Returns the label of the member holding `value`.
    pub fn label_of(&self, value: &Value) -> Option<&str> {
        self.members
            .iter()
            .find(|(_, v)| v == value)
            .map(|(l, _)| l.as_str())
    }

    /// Returns `true` if some member holds `value`.
    pub fn contains_value(&self, value: &Value) -> bool {
        self.label_of(value).is_some()
    }
}

/// The type a serializer field validates against.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetType {
    /// A plain scalar.
    Scalar(ScalarType),
    /// One of a fixed set of values.
    Enum(ChoiceEnum),
    /// The inner type or the absent marker, [`Value::Null`].
    Optional(Box<TargetType>),
}

impl TargetType {
    /// Wraps this type so that it also accepts the absent marker.
    ///
    /// Wrapping an already optional type is a no-op.
    #[must_use]
    pub fn optional(self) -> Self {
        match self {
            Self::Optional(_) => self,
            other => Self::Optional(Box::new(other)),
        }
    }

    /// Returns `true` if the absent marker is accepted.
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns the type with any optional wrapper removed.
    pub fn inner(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner.inner(),
            other => other,
        }
    }

    /// Returns the choice enum, looking through an optional wrapper.
    pub fn as_enum(&self) -> Option<&ChoiceEnum> {
        match self.inner() {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the scalar type, looking through an optional wrapper.
    pub fn as_scalar(&self) -> Option<ScalarType> {
        match self.inner() {
            Self::Scalar(s) => Some(*s),
            _ => None,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Enum(e) => f.write_str(&e.name),
            Self::Optional(inner) => write!(f, "{inner} | None"),
        }
    }
}

/// A length constraint attached to a serializer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// At least this many characters.
    MinLength(usize),
    /// At most this many characters.
    MaxLength(usize),
}

impl Constraint {
    /// Checks `value` against the constraint.
    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match *self {
            Self::MinLength(n) => MinLengthValidator::new(n).validate(value),
            Self::MaxLength(n) => MaxLengthValidator::new(n).validate(value),
        }
    }
}

/// How a missing value is filled in.
#[derive(Debug, Clone, Default)]
pub enum DefaultSpec {
    /// No default; the field is either required or left out.
    #[default]
    Unset,
    /// A literal default.
    Value(Value),
    /// A factory called once per validated instance.
    Factory(DefaultFactory),
}

/// Per-field serializer configuration.
#[derive(Debug, Clone, Default)]
pub struct FieldConfig {
    /// Default used when input omits the field.
    pub default: DefaultSpec,
    /// Whether input must supply the field.
    pub required: bool,
    /// Length constraints, checked in order.
    pub constraints: Vec<Constraint>,
}

impl FieldConfig {
    /// Returns the literal default, if any.
    pub const fn default_value(&self) -> Option<&Value> {
        match &self.default {
            DefaultSpec::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the default factory, if any.
    pub const fn default_factory(&self) -> Option<&DefaultFactory> {
        match &self.default {
            DefaultSpec::Factory(f) => Some(f),
            _ => None,
        }
    }

    /// Returns `true` if a literal default or a factory is set.
    pub const fn has_default(&self) -> bool {
        !matches!(self.default, DefaultSpec::Unset)
    }

    /// Produces the default for one new instance, calling the factory if set.
    pub fn produce_default(&self) -> Option<Value> {
        match &self.default {
            DefaultSpec::Unset => None,
            DefaultSpec::Value(v) => Some(v.clone()),
            DefaultSpec::Factory(f) => Some(f.call()),
        }
    }

    /// Returns the minimum length constraint, if any.
    pub fn min_length(&self) -> Option<usize> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::MinLength(n) => Some(*n),
            Constraint::MaxLength(_) => None,
        })
    }

    /// Returns the maximum length constraint, if any.
    pub fn max_length(&self) -> Option<usize> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::MaxLength(n) => Some(*n),
            Constraint::MinLength(_) => None,
        })
    }
}

/// One field of a serializer schema.
#[derive(Debug, Clone)]
pub struct SchemaField {
    /// Same name as the model field it came from.
    pub name: String,
    /// The type values are validated against.
    pub target_type: TargetType,
    /// Default, required flag, and constraints.
    pub config: FieldConfig,
}

/// Provenance of a schema: the model it was built from and the field
/// selection in force at build time.
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// The source model.
    pub model: &'static ModelMeta,
    /// Selected field names, or `None` for all fields.
    pub include_fields: Option<BTreeSet<String>>,
}

/// A serializer generated from a model.
///
/// Fields appear in model declaration order. Use
/// [`validate`](SerializerSchema::validate) or
/// [`from_model`](SerializerSchema::from_model) to produce instances.
#[derive(Debug, Clone)]
pub struct SerializerSchema {
    /// `<ObjectName>Serializer`.
    pub name: String,
    /// Model and selection the schema was built from.
    pub config: SerializerConfig,
    /// The schema fields.
    pub fields: Vec<SchemaField>,
}

impl SerializerSchema {
    /// Returns the source model metadata.
    pub const fn model(&self) -> &'static ModelMeta {
        self.config.model
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Returns `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
