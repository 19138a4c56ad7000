//! Serializer instances: validating data against a [`SerializerSchema`].
//!
//! Validation runs field by field in schema order. Missing values take the
//! field's default (a factory is called once per instance) or fail as
//! `required`. Provided values are converted to the field's type and then
//! checked against its constraints. All failures are collected into one
//! [`ValidationError`] keyed by field name.

use std::collections::HashMap;

use django_rs_core::{DjangoError, DjangoResult, ValidationError};
use django_rs_db::model::Model;
use django_rs_db::value::Value;

use crate::field_map::ScalarType;
use crate::schema::{SchemaField, SerializerSchema, TargetType};

/// Validated data for one schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializerInstance {
    serializer: String,
    values: Vec<(String, Value)>,
}

impl SerializerInstance {
    /// Returns the name of the schema that produced this instance.
    pub fn serializer_name(&self) -> &str {
        &self.serializer
    }

    /// Returns the value of a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Returns all values in schema order.
    pub fn values(&self) -> &[(String, Value)] {
        &self.values
    }

    /// Returns the values as a name to value map.
    pub fn model_dump(&self) -> HashMap<String, Value> {
        self.values.iter().cloned().collect()
    }

    /// Returns the values as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }

    /// Returns the values rendered as a JSON string.
    pub fn model_dump_json(&self) -> DjangoResult<String> {
        Ok(serde_json::to_string(&self.to_json())?)
    }
}

impl SerializerSchema {
    /// Validates `data` and returns an instance.
    ///
    /// Keys that are not schema fields are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use std::sync::LazyLock;
    /// use django_rs_db::fields::{FieldDef, FieldType};
    /// use django_rs_db::model::ModelMeta;
    /// use django_rs_db::value::Value;
    /// use django_rs_serializers::builder::ModelSerializerBuilder;
    ///
    /// static META: LazyLock<ModelMeta> = LazyLock::new(|| {
    ///     ModelMeta::new("shop", "Item", vec![
    ///         FieldDef::new("name", FieldType::CharField).max_length(5),
    ///         FieldDef::new("qty", FieldType::IntegerField).default(1),
    ///     ])
    /// });
    ///
    /// let schema = ModelSerializerBuilder::new(&META).build(false).unwrap();
    ///
    /// let data = HashMap::from([("name".to_string(), Value::from("pen"))]);
    /// let item = schema.validate(data).unwrap();
    /// assert_eq!(item.get("qty"), Some(&Value::Int(1)));
    ///
    /// let data = HashMap::from([("name".to_string(), Value::from("notebook"))]);
    /// let err = schema.validate(data).unwrap_err();
    /// assert!(err.has_field_error("name", "max_length"));
    /// ```
    pub fn validate(
        &self,
        mut data: HashMap<String, Value>,
    ) -> Result<SerializerInstance, ValidationError> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut errors: HashMap<String, Vec<ValidationError>> = HashMap::new();

        for field in &self.fields {
            match data.remove(&field.name) {
                Some(raw) => match validate_value(field, raw) {
                    Ok(value) => values.push((field.name.clone(), value)),
                    Err(field_errors) => {
                        errors.insert(field.name.clone(), field_errors);
                    }
                },
                None => {
                    if let Some(default) = field.config.produce_default() {
                        values.push((field.name.clone(), default));
                    } else if field.config.required {
                        errors.insert(
                            field.name.clone(),
                            vec![ValidationError::new("This field is required.", "required")],
                        );
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(SerializerInstance {
                serializer: self.name.clone(),
                values,
            })
        } else {
            tracing::debug!(
                serializer = %self.name,
                invalid_fields = errors.len(),
                "Serializer validation failed"
            );
            Err(ValidationError::with_field_errors(errors))
        }
    }

    /// Builds an instance from a live model object.
    ///
    /// `extractor` reads the object's attributes. The object's model must be
    /// the one this schema was built from.
    pub fn from_model<M, F>(&self, obj: &M, extractor: F) -> DjangoResult<SerializerInstance>
    where
        M: Model,
        F: FnOnce(&M) -> HashMap<String, Value>,
    {
        if !std::ptr::eq(M::meta(), self.config.model) {
            return Err(DjangoError::ImproperlyConfigured(format!(
                "{} was built for {}, not {}",
                self.name,
                self.config.model.label(),
                M::meta().label()
            )));
        }
        self.validate(extractor(obj)).map_err(DjangoError::from)
    }

    /// Builds an instance from a model object's own field values.
    pub fn from_instance<M: Model>(&self, obj: &M) -> DjangoResult<SerializerInstance> {
        self.from_model(obj, |o: &M| {
            o.field_values()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect()
        })
    }
}

fn validate_value(field: &SchemaField, raw: Value) -> Result<Value, Vec<ValidationError>> {
    let value = convert(&field.target_type, raw).map_err(|e| vec![e])?;
    let errors: Vec<ValidationError> = field
        .config
        .constraints
        .iter()
        .filter_map(|c| c.check(&value).err())
        .collect();
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}

/// Converts `raw` to `target`, or explains why it does not fit.
fn convert(target: &TargetType, raw: Value) -> Result<Value, ValidationError> {
    match target {
        TargetType::Optional(_) if raw.is_null() => Ok(Value::Null),
        TargetType::Optional(inner) => convert(inner, raw),
        TargetType::Scalar(ScalarType::Any) => Ok(raw),
        _ if raw.is_null() => Err(ValidationError::new(
            "This field may not be null.",
            "invalid",
        )),
        TargetType::Scalar(scalar) => {
            let kind = raw.kind();
            scalar.coerce(raw).ok_or_else(|| {
                ValidationError::new(format!("Expected a valid {scalar}, got {kind}."), "invalid")
                    .with_param("expected", scalar.name())
                    .with_param("kind", kind)
            })
        }
        TargetType::Enum(choice_enum) => {
            let shown = raw.to_string();
            match choice_enum.base.scalar().coerce(raw) {
                Some(value) if choice_enum.contains_value(&value) => Ok(value),
                _ => Err(ValidationError::new(
                    format!("Select a valid choice. {shown} is not one of the available choices."),
                    "invalid_choice",
                )
                .with_param("value", shown)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        ChoiceEnum, Constraint, DefaultSpec, EnumBase, FieldConfig, SerializerConfig,
    };
    use django_rs_db::fields::{DefaultFactory, FieldDef, FieldType};
    use django_rs_db::model::ModelMeta;
    use std::sync::LazyLock;

    static META: LazyLock<ModelMeta> = LazyLock::new(|| {
        ModelMeta::new(
            "test",
            "Widget",
            vec![
                FieldDef::new("name", FieldType::CharField),
                FieldDef::new("size", FieldType::IntegerField),
            ],
        )
    });

    fn field(name: &str, target_type: TargetType, config: FieldConfig) -> SchemaField {
        SchemaField {
            name: name.to_string(),
            target_type,
            config,
        }
    }

    fn required() -> FieldConfig {
        FieldConfig {
            required: true,
            ..FieldConfig::default()
        }
    }

    fn schema(fields: Vec<SchemaField>) -> SerializerSchema {
        SerializerSchema {
            name: "WidgetSerializer".into(),
            config: SerializerConfig {
                model: &META,
                include_fields: None,
            },
            fields,
        }
    }

    fn data(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_required_field_missing() {
        let s = schema(vec![field("name", TargetType::Scalar(ScalarType::Str), required())]);
        let err = s.validate(HashMap::new()).unwrap_err();
        assert_eq!(err.field_codes("name"), vec!["required"]);
    }

    #[test]
    fn test_optional_field_without_default_is_omitted() {
        let s = schema(vec![field(
            "name",
            TargetType::Scalar(ScalarType::Str),
            FieldConfig::default(),
        )]);
        let inst = s.validate(HashMap::new()).unwrap();
        assert!(inst.get("name").is_none());
        assert!(inst.values().is_empty());
    }

    #[test]
    fn test_type_errors() {
        let s = schema(vec![field("size", TargetType::Scalar(ScalarType::Int), required())]);
        let err = s.validate(data(&[("size", Value::from("big"))])).unwrap_err();
        assert!(err.has_field_error("size", "invalid"));
        let inst = s.validate(data(&[("size", Value::from("12"))])).unwrap();
        assert_eq!(inst.get("size"), Some(&Value::Int(12)));
    }

    #[test]
    fn test_null_requires_optional_type() {
        let s = schema(vec![
            field("a", TargetType::Scalar(ScalarType::Str), required()),
            field(
                "b",
                TargetType::Scalar(ScalarType::Str).optional(),
                FieldConfig::default(),
            ),
        ]);
        let err = s
            .validate(data(&[("a", Value::Null), ("b", Value::Null)]))
            .unwrap_err();
        assert!(err.has_field_error("a", "invalid"));
        assert!(err.field_codes("b").is_empty());
    }

    #[test]
    fn test_enum_values() {
        let choice = ChoiceEnum {
            name: "KindEnum".into(),
            base: EnumBase::Str,
            members: vec![("A".into(), Value::from("a"))],
        };
        let s = schema(vec![field("kind", TargetType::Enum(choice), required())]);
        assert!(s.validate(data(&[("kind", Value::from("a"))])).is_ok());
        let err = s.validate(data(&[("kind", Value::from("A"))])).unwrap_err();
        assert!(err.has_field_error("kind", "invalid_choice"));
    }

    #[test]
    fn test_int_enum_coerces_text() {
        let choice = ChoiceEnum {
            name: "PriorityEnum".into(),
            base: EnumBase::Int,
            members: vec![("Low".into(), Value::Int(1)), ("High".into(), Value::Int(2))],
        };
        let s = schema(vec![field("priority", TargetType::Enum(choice), required())]);
        let inst = s.validate(data(&[("priority", Value::from("2"))])).unwrap();
        assert_eq!(inst.get("priority"), Some(&Value::Int(2)));
        for bad in [Value::from("3"), Value::from("high"), Value::Bool(true)] {
            let err = s.validate(data(&[("priority", bad)])).unwrap_err();
            assert!(err.has_field_error("priority", "invalid_choice"));
        }
    }

    #[test]
    fn test_constraints_accumulate() {
        let config = FieldConfig {
            required: true,
            constraints: vec![Constraint::MinLength(1), Constraint::MaxLength(3)],
            ..FieldConfig::default()
        };
        let s = schema(vec![
            field("name", TargetType::Scalar(ScalarType::Str), config.clone()),
            field("code", TargetType::Scalar(ScalarType::Str), config),
        ]);
        let err = s
            .validate(data(&[("name", Value::from("")), ("code", Value::from("abcd"))]))
            .unwrap_err();
        assert_eq!(err.field_codes("name"), vec!["min_length"]);
        assert_eq!(err.field_codes("code"), vec!["max_length"]);
    }

    #[test]
    fn test_defaults() {
        let s = schema(vec![
            field(
                "name",
                TargetType::Scalar(ScalarType::Str),
                FieldConfig {
                    default: DefaultSpec::Value(Value::from("anon")),
                    ..FieldConfig::default()
                },
            ),
            field(
                "size",
                TargetType::Scalar(ScalarType::Int),
                FieldConfig {
                    default: DefaultSpec::Factory(DefaultFactory::new(|| Value::Int(3))),
                    ..FieldConfig::default()
                },
            ),
        ]);
        let inst = s.validate(HashMap::new()).unwrap();
        assert_eq!(inst.get("name"), Some(&Value::from("anon")));
        assert_eq!(inst.get("size"), Some(&Value::Int(3)));
        assert_eq!(inst.serializer_name(), "WidgetSerializer");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let s = schema(vec![field("name", TargetType::Scalar(ScalarType::Str), required())]);
        let inst = s
            .validate(data(&[("name", Value::from("x")), ("extra", Value::Int(1))]))
            .unwrap();
        assert_eq!(inst.values().len(), 1);
    }

    #[test]
    fn test_dump() {
        let s = schema(vec![
            field("name", TargetType::Scalar(ScalarType::Str), required()),
            field("size", TargetType::Scalar(ScalarType::Int), required()),
        ]);
        let inst = s
            .validate(data(&[("name", Value::from("x")), ("size", Value::Int(2))]))
            .unwrap();
        assert_eq!(inst.model_dump(), data(&[("name", Value::from("x")), ("size", Value::Int(2))]));
        assert_eq!(inst.to_json(), serde_json::json!({"name": "x", "size": 2}));
        assert_eq!(inst.model_dump_json().unwrap(), r#"{"name":"x","size":2}"#);
    }

    struct Widget;

    impl Model for Widget {
        fn meta() -> &'static ModelMeta {
            &META
        }

        fn field_values(&self) -> Vec<(&'static str, Value)> {
            vec![("name", Value::from("bolt")), ("size", Value::Int(4))]
        }
    }

    struct Gadget;

    impl Model for Gadget {
        fn meta() -> &'static ModelMeta {
            static GADGET: LazyLock<ModelMeta> =
                LazyLock::new(|| ModelMeta::new("test", "Gadget", Vec::new()));
            &GADGET
        }

        fn field_values(&self) -> Vec<(&'static str, Value)> {
            Vec::new()
        }
    }

    #[test]
    fn test_from_instance() {
        let s = schema(vec![
            field("name", TargetType::Scalar(ScalarType::Str), required()),
            field("size", TargetType::Scalar(ScalarType::Int), required()),
        ]);
        let inst = s.from_instance(&Widget).unwrap();
        assert_eq!(inst.get("name"), Some(&Value::from("bolt")));
        assert_eq!(inst.get("size"), Some(&Value::Int(4)));
    }

    #[test]
    fn test_from_model_rejects_other_model() {
        let s = schema(Vec::new());
        let err = s.from_model(&Gadget, |_| HashMap::new()).unwrap_err();
        assert!(matches!(err, DjangoError::ImproperlyConfigured(_)));
    }

    #[test]
    fn test_from_model_reports_validation_errors() {
        let s = schema(vec![field("size", TargetType::Scalar(ScalarType::Int), required())]);
        let err = s.from_model(&Widget, |_| HashMap::new()).unwrap_err();
        match err {
            DjangoError::ValidationError(e) => assert!(e.has_field_error("size", "required")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
