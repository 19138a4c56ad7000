//! Field type definitions for the ORM.
//!
//! This module defines the field type system used by model definitions. Each
//! [`FieldType`] variant corresponds to a Django model field class, and
//! [`FieldDef`] captures the metadata serializers read from a single field.

use super::defaults::{DefaultFactory, FieldDefault};
use crate::value::Value;

/// The type of a model field.
///
/// Each variant maps to a Django field class; [`FieldType::type_name`] returns
/// that class name. Relational fields (`ForeignKey`, `OneToOneField`,
/// `ManyToManyField`) carry additional metadata about the relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Auto-incrementing 32-bit integer primary key.
    AutoField,
    /// Auto-incrementing 64-bit integer primary key.
    BigAutoField,
    /// Variable-length string with a max length.
    CharField,
    /// Unlimited-length text.
    TextField,
    /// 32-bit signed integer.
    IntegerField,
    /// 64-bit signed integer.
    BigIntegerField,
    /// 16-bit signed integer.
    SmallIntegerField,
    /// 32-bit non-negative integer.
    PositiveIntegerField,
    /// 16-bit non-negative integer.
    PositiveSmallIntegerField,
    /// 64-bit floating-point number.
    FloatField,
    /// Fixed-precision decimal number.
    DecimalField {
        /// Maximum total digits.
        max_digits: u32,
        /// Digits after the decimal point.
        decimal_places: u32,
    },
    /// Boolean (true/false).
    BooleanField,
    /// Date without time.
    DateField,
    /// Date and time.
    DateTimeField,
    /// Time without date.
    TimeField,
    /// Duration / interval.
    DurationField,
    /// UUID field.
    UuidField,
    /// Raw binary data.
    BinaryField,
    /// JSON data.
    JsonField,
    /// Email address (CharField with email validation).
    EmailField,
    /// URL (CharField with URL validation).
    UrlField,
    /// Slug (URL-friendly string).
    SlugField,
    /// IPv4 or IPv6 address.
    IpAddressField,
    /// File system path.
    FilePathField,
    /// Uploaded file, stored as its path.
    FileField,
    /// Uploaded image, stored as its path.
    ImageField,
    /// Many-to-one relationship.
    ForeignKey {
        /// The target model name (e.g. "auth.User").
        to: String,
        /// Behavior when the referenced object is deleted.
        on_delete: OnDelete,
    },
    /// One-to-one relationship (unique foreign key).
    OneToOneField {
        /// The target model name.
        to: String,
        /// Behavior when the referenced object is deleted.
        on_delete: OnDelete,
    },
    /// Many-to-many relationship (via intermediate table).
    ManyToManyField {
        /// The target model name.
        to: String,
    },
}

/// Behavior when a referenced object is deleted (ON DELETE action).
///
/// This mirrors Django's `on_delete` parameter for `ForeignKey` and
/// `OneToOneField`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    /// Delete all related objects (CASCADE).
    Cascade,
    /// Prevent deletion if related objects exist (PROTECT).
    Protect,
    /// Set the foreign key to NULL.
    SetNull,
    /// Take no action (may cause integrity errors).
    DoNothing,
}

impl FieldType {
    /// Returns the Django field class name for this type (e.g. `"CharField"`).
    ///
    /// Serializer field maps are keyed by this name.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::AutoField => "AutoField",
            Self::BigAutoField => "BigAutoField",
            Self::CharField => "CharField",
            Self::TextField => "TextField",
            Self::IntegerField => "IntegerField",
            Self::BigIntegerField => "BigIntegerField",
            Self::SmallIntegerField => "SmallIntegerField",
            Self::PositiveIntegerField => "PositiveIntegerField",
            Self::PositiveSmallIntegerField => "PositiveSmallIntegerField",
            Self::FloatField => "FloatField",
            Self::DecimalField { .. } => "DecimalField",
            Self::BooleanField => "BooleanField",
            Self::DateField => "DateField",
            Self::DateTimeField => "DateTimeField",
            Self::TimeField => "TimeField",
            Self::DurationField => "DurationField",
            Self::UuidField => "UUIDField",
            Self::BinaryField => "BinaryField",
            Self::JsonField => "JSONField",
            Self::EmailField => "EmailField",
            Self::UrlField => "URLField",
            Self::SlugField => "SlugField",
            Self::IpAddressField => "GenericIPAddressField",
            Self::FilePathField => "FilePathField",
            Self::FileField => "FileField",
            Self::ImageField => "ImageField",
            Self::ForeignKey { .. } => "ForeignKey",
            Self::OneToOneField { .. } => "OneToOneField",
            Self::ManyToManyField { .. } => "ManyToManyField",
        }
    }

    /// Returns `true` for field types whose values are text (Django's
    /// `CharField` family plus `TextField`).
    pub const fn is_string_like(&self) -> bool {
        matches!(
            self,
            Self::CharField
                | Self::TextField
                | Self::EmailField
                | Self::UrlField
                | Self::SlugField
                | Self::FilePathField
                | Self::FileField
                | Self::ImageField
        )
    }

    /// Returns `true` if this is a relational field type.
    pub const fn is_relation(&self) -> bool {
        matches!(
            self,
            Self::ForeignKey { .. } | Self::OneToOneField { .. } | Self::ManyToManyField { .. }
        )
    }
}

/// Definition of a model field: its type plus the attributes serializers read.
///
/// Construct with [`FieldDef::new`] and chain the builder methods, the way a
/// Django field is declared with keyword arguments.
///
/// # Examples
///
/// ```
/// use django_rs_db::fields::{FieldDef, FieldType};
///
/// let status = FieldDef::new("status", FieldType::CharField)
///     .max_length(10)
///     .choices([("d", "Draft"), ("p", "Published")])
///     .default("d");
/// assert_eq!(status.max_length, Some(10));
/// assert_eq!(status.choices.as_ref().map(Vec::len), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// The attribute name of this field.
    pub name: &'static str,
    /// The type of this field.
    pub field_type: FieldType,
    /// Whether this field is the primary key.
    pub primary_key: bool,
    /// Whether NULL is allowed.
    pub null: bool,
    /// Whether the empty string is allowed.
    pub blank: bool,
    /// Default value or default-producing function for new instances.
    pub default: Option<FieldDefault>,
    /// Maximum character length (for CharField and similar).
    pub max_length: Option<usize>,
    /// Allowed values as (value, display_label) pairs, in declared order.
    pub choices: Option<Vec<(Value, String)>>,
}

impl FieldDef {
    /// Creates a new `FieldDef` with Django's defaults.
    ///
    /// Only the field name and type are required. All other attributes take
    /// their default values (non-null, non-blank, no default).
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            primary_key: false,
            null: false,
            blank: false,
            default: None,
            max_length: None,
            choices: None,
        }
    }

    /// Marks this field as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Allows NULL values.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.null = true;
        self
    }

    /// Allows the empty string.
    #[must_use]
    pub const fn blank(mut self) -> Self {
        self.blank = true;
        self
    }

    /// Sets the maximum character length.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets a literal default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    /// Sets a function that produces a fresh default for every new instance.
    #[must_use]
    pub fn default_factory(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(FieldDefault::Factory(DefaultFactory::new(f)));
        self
    }

    /// Sets the allowed choices as (value, label) pairs.
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

    /// Returns `true` if a default (literal or callable) is declared.
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }
}
