//! Field mappers: turning model fields into serializer field specs.
//!
//! [`DefaultFieldMapper`] applies the full policy: type lookup, choice enums,
//! nullability, length constraints, and defaults. [`TypeOnlyFieldMapper`]
//! resolves the type and nothing else. Any `Fn(&FieldDef, bool) -> MappedField`
//! closure is a mapper too.
//!
//! Relational fields (`ForeignKey`, `OneToOneField`, `ManyToManyField`) are
//! not followed; they map to `Any` and take whatever value is supplied.

use django_rs_core::settings::{ChoiceEnumNaming, SerializerSettings, Settings, SETTINGS};
use django_rs_core::utils::text::pascal_case;
use django_rs_db::fields::{FieldDef, FieldDefault};
use django_rs_db::model::ModelMeta;
use django_rs_db::value::Value;

use crate::descriptor::FieldDescriptor;
use crate::field_map::{self, ScalarType};
use crate::schema::{ChoiceEnum, Constraint, DefaultSpec, EnumBase, FieldConfig, TargetType};

/// The type and configuration produced for one model field.
#[derive(Debug, Clone)]
pub struct MappedField {
    /// The type values are validated against.
    pub target_type: TargetType,
    /// Default, required flag, and constraints.
    pub config: FieldConfig,
}

/// Converts a model field into a serializer field spec.
///
/// With `partial`, the produced field must not be required.
pub trait FieldMapper: Send + Sync {
    /// Maps one field.
    fn map_field(&self, field: &FieldDef, partial: bool) -> MappedField;

    /// Maps one field of `meta`. Builders call this; the default ignores the model.
    fn map_model_field(&self, _meta: &ModelMeta, field: &FieldDef, partial: bool) -> MappedField {
        self.map_field(field, partial)
    }
}

impl<F> FieldMapper for F
where
    F: Fn(&FieldDef, bool) -> MappedField + Send + Sync,
{
    fn map_field(&self, field: &FieldDef, partial: bool) -> MappedField {
        self(field, partial)
    }
}

/// The standard mapper.
///
/// Built from the global [`SETTINGS`] when they are configured, from
/// [`SerializerSettings::default`] otherwise.
///
/// # Examples
///
/// ```
/// use django_rs_db::fields::{FieldDef, FieldType};
/// use django_rs_serializers::mapper::{DefaultFieldMapper, FieldMapper};
///
/// let field = FieldDef::new("title", FieldType::CharField).max_length(100).nullable();
/// let mapped = DefaultFieldMapper::default().map_field(&field, false);
/// assert_eq!(mapped.target_type.to_string(), "str | None");
/// assert!(!mapped.config.required);
/// assert_eq!(mapped.config.min_length(), Some(1));
/// assert_eq!(mapped.config.max_length(), Some(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultFieldMapper {
    /// How choice enums are named.
    pub naming: ChoiceEnumNaming,
    /// Whether unsupported field types log a warning.
    pub warn_unsupported: bool,
}

impl Default for DefaultFieldMapper {
    fn default() -> Self {
        SETTINGS.try_get().map_or_else(
            || Self::from_serializer_settings(&SerializerSettings::default()),
            Self::from_settings,
        )
    }
}

impl DefaultFieldMapper {
    /// Creates a mapper from the `serializers` section of `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::from_serializer_settings(&settings.serializers)
    }

    /// Creates a mapper from serializer settings.
    pub const fn from_serializer_settings(settings: &SerializerSettings) -> Self {
        Self {
            naming: settings.choice_enum_naming,
            warn_unsupported: settings.warn_unsupported_fields,
        }
    }

    /// Returns a copy using the given enum naming policy.
    #[must_use]
    pub const fn with_naming(mut self, naming: ChoiceEnumNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Resolves the scalar type of a described field.
    pub fn base_type(&self, fd: &FieldDescriptor) -> ScalarType {
        if fd.field_type.is_relation() {
            if self.warn_unsupported {
                tracing::warn!(
                    field = fd.name,
                    field_type = fd.type_name(),
                    "Relational field is treated as opaque, using Any"
                );
            }
            return ScalarType::Any;
        }
        if self.warn_unsupported {
            field_map::resolve(fd.type_name())
        } else {
            field_map::lookup(fd.type_name()).unwrap_or(ScalarType::Any)
        }
    }

    /// Returns the name for the enum synthesized from a field's choices.
    ///
    /// Per-field names are prefixed with the owning model's class name when
    /// it is known, e.g. `ArticleStatusEnum`.
    pub fn enum_name(&self, model: Option<&str>, field_name: &str) -> String {
        match self.naming {
            ChoiceEnumNaming::Fixed => "FieldEnum".to_string(),
            ChoiceEnumNaming::PerField => {
                format!("{}{}Enum", model.unwrap_or_default(), pascal_case(field_name))
            }
        }
    }

    /// Builds the choice enum for a field, if it declares any choices.
    pub fn choice_enum(&self, fd: &FieldDescriptor, base: ScalarType) -> Option<ChoiceEnum> {
        let choices = fd.choices.as_ref().filter(|c| !c.is_empty())?;
        let enum_base = if base.is_integer() {
            EnumBase::Int
        } else if base.is_string() {
            EnumBase::Str
        } else {
            EnumBase::Plain
        };
        Some(ChoiceEnum {
            name: self.enum_name(fd.model, fd.name),
            base: enum_base,
            members: choices
                .iter()
                .map(|(value, label)| (label.clone(), value.clone()))
                .collect(),
        })
    }

    /// Maps a descriptor whose base type is already resolved.
    pub fn map_descriptor(&self, fd: &FieldDescriptor, base: ScalarType) -> MappedField {
        let mut target_type = self
            .choice_enum(fd, base)
            .map_or(TargetType::Scalar(base), TargetType::Enum);

        let mut config = FieldConfig {
            required: fd.is_required,
            ..FieldConfig::default()
        };

        if fd.allows_null {
            target_type = target_type.optional();
            if fd.default.is_none() {
                config.default = DefaultSpec::Value(Value::Null);
            }
        }

        if fd.field_type.is_string_like() {
            config
                .constraints
                .push(Constraint::MinLength(usize::from(!fd.allows_blank)));
            if let Some(max_length) = fd.max_length {
                config.constraints.push(Constraint::MaxLength(max_length));
            }
        }

        match &fd.default {
            Some(FieldDefault::Factory(factory)) => {
                config.default = DefaultSpec::Factory(factory.clone());
            }
            Some(FieldDefault::Value(value)) => {
                config.default = DefaultSpec::Value(value.clone());
            }
            None => {}
        }

        MappedField {
            target_type,
            config,
        }
    }
}

impl FieldMapper for DefaultFieldMapper {
    fn map_field(&self, field: &FieldDef, partial: bool) -> MappedField {
        let fd = FieldDescriptor::describe(field, partial);
        let base = self.base_type(&fd);
        self.map_descriptor(&fd, base)
    }

    fn map_model_field(&self, meta: &ModelMeta, field: &FieldDef, partial: bool) -> MappedField {
        let fd = FieldDescriptor::describe_in(meta, field, partial);
        let base = self.base_type(&fd);
        self.map_descriptor(&fd, base)
    }
}

/// A mapper that only resolves the field's type.
///
/// Nullable fields become optional; every other field is required unless
/// `partial` is set. No defaults or constraints are attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeOnlyFieldMapper;

impl FieldMapper for TypeOnlyFieldMapper {
    fn map_field(&self, field: &FieldDef, partial: bool) -> MappedField {
        let mut target_type = TargetType::Scalar(field_map::resolve(field.field_type.type_name()));
        if field.null {
            target_type = target_type.optional();
        }
        MappedField {
            target_type,
            config: FieldConfig {
                required: !(field.null || partial),
                ..FieldConfig::default()
            },
        }
    }
}
