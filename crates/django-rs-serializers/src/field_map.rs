//! The Django field class to serializer scalar type table.
//!
//! [`DJANGO_FIELD_MAP`] is keyed by the Django field class name returned from
//! [`FieldType::type_name`](django_rs_db::fields::FieldType::type_name).
//! Field types missing from the table resolve to [`ScalarType::Any`], which
//! accepts every value.

use std::fmt;
use std::net::IpAddr;
use std::sync::OnceLock;

use django_rs_db::value::Value;
use regex::Regex;

/// The scalar type a serializer field validates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Whole numbers.
    Int,
    /// Floating-point numbers.
    Float,
    /// Arbitrary-precision decimals, kept as text.
    Decimal,
    /// Text.
    Str,
    /// `true` / `false`.
    Bool,
    /// Raw bytes.
    Bytes,
    /// Calendar date.
    Date,
    /// Date and time, with or without timezone.
    DateTime,
    /// Time interval.
    Duration,
    /// Time of day.
    Time,
    /// UUID.
    Uuid,
    /// IPv4 or IPv6 address.
    IpAddress,
    /// A JSON object, a JSON array, or a string holding any JSON document.
    Json,
    /// No type check at all. Used for unsupported field types.
    Any,
}

impl ScalarType {
    /// Returns the short name shown in error messages and type descriptions.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Duration => "duration",
            Self::Time => "time",
            Self::Uuid => "uuid",
            Self::IpAddress => "ip_address",
            Self::Json => "json",
            Self::Any => "any",
        }
    }

    /// Returns `true` if values of this type are integers, so choice enums
    /// built on it are integer-valued.
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Int)
    }

    /// Returns `true` if values of this type are text, so choice enums built
    /// on it are string-valued.
    pub const fn is_string(self) -> bool {
        matches!(self, Self::Str)
    }

    /// Converts `value` into this type, or returns `None` if it does not fit.
    ///
    /// Values already of the right kind pass through. Text is parsed for
    /// numbers, booleans, temporal types, UUIDs, IP addresses and JSON, the
    /// same lax conversions a form field applies to submitted data.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::float_cmp
    )]
    pub fn coerce(self, value: Value) -> Option<Value> {
        match (self, value) {
            (Self::Any, v) => Some(v),

            (Self::Int, v @ Value::Int(_)) => Some(v),
            (Self::Int, Value::Float(f)) if f.trunc() == f && f.abs() < 9.0e18 => {
                Some(Value::Int(f as i64))
            }
            (Self::Int, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::Int),

            (Self::Float, v @ Value::Float(_)) => Some(v),
            (Self::Float, Value::Int(i)) => Some(Value::Float(i as f64)),
            (Self::Float, Value::String(s)) => s.trim().parse::<f64>().ok().map(Value::Float),

            (Self::Decimal, v @ Value::Decimal(_)) => Some(v),
            (Self::Decimal, Value::Int(i)) => Some(Value::Decimal(i.to_string())),
            (Self::Decimal, Value::Float(f)) if f.is_finite() => {
                Some(Value::Decimal(f.to_string()))
            }
            (Self::Decimal, Value::String(s)) => {
                let s = s.trim();
                decimal_re()
                    .is_match(s)
                    .then(|| Value::Decimal(s.to_string()))
            }

            (Self::Str, v @ Value::String(_)) => Some(v),

            (Self::Bool, v @ Value::Bool(_)) => Some(v),
            (Self::Bool, Value::Int(0)) => Some(Value::Bool(false)),
            (Self::Bool, Value::Int(1)) => Some(Value::Bool(true)),
            (Self::Bool, Value::String(s)) => parse_bool(&s).map(Value::Bool),

            (Self::Bytes, v @ Value::Bytes(_)) => Some(v),
            (Self::Bytes, Value::String(s)) => Some(Value::Bytes(s.into_bytes())),

            (Self::Date, v @ Value::Date(_)) => Some(v),
            (Self::Date, Value::String(s)) => chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .ok()
                .map(Value::Date),

            (Self::DateTime, v @ (Value::DateTime(_) | Value::DateTimeTz(_))) => Some(v),
            (Self::DateTime, Value::String(s)) => parse_datetime(s.trim()),

            (Self::Duration, v @ Value::Duration(_)) => Some(v),
            (Self::Duration, Value::Int(secs)) => {
                chrono::Duration::try_seconds(secs).map(Value::Duration)
            }

            (Self::Time, v @ Value::Time(_)) => Some(v),
            (Self::Time, Value::String(s)) => {
                let s = s.trim();
                chrono::NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
                    .or_else(|_| chrono::NaiveTime::parse_from_str(s, "%H:%M"))
                    .ok()
                    .map(Value::Time)
            }

            (Self::Uuid, v @ Value::Uuid(_)) => Some(v),
            (Self::Uuid, Value::String(s)) => uuid::Uuid::parse_str(s.trim()).ok().map(Value::Uuid),

            (Self::IpAddress, v @ Value::IpAddr(_)) => Some(v),
            (Self::IpAddress, Value::String(s)) => {
                s.trim().parse::<IpAddr>().ok().map(Value::IpAddr)
            }

            (Self::Json, v @ Value::Json(_)) => Some(v),
            (Self::Json, v @ Value::List(_)) => Some(Value::Json(v.to_json())),
            (Self::Json, Value::String(s)) => serde_json::from_str(&s).ok().map(Value::Json),

            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps Django field class names to the scalar type their values validate as.
pub static DJANGO_FIELD_MAP: &[(&str, ScalarType)] = &[
    // Numbers
    ("AutoField", ScalarType::Int),
    ("BigAutoField", ScalarType::Int),
    ("IntegerField", ScalarType::Int),
    ("SmallIntegerField", ScalarType::Int),
    ("BigIntegerField", ScalarType::Int),
    ("PositiveIntegerField", ScalarType::Int),
    ("PositiveSmallIntegerField", ScalarType::Int),
    ("FloatField", ScalarType::Float),
    ("DecimalField", ScalarType::Decimal),
    // Text
    ("CharField", ScalarType::Str),
    ("EmailField", ScalarType::Str),
    ("URLField", ScalarType::Str),
    ("SlugField", ScalarType::Str),
    ("TextField", ScalarType::Str),
    ("FilePathField", ScalarType::Str),
    ("FileField", ScalarType::Str),
    ("ImageField", ScalarType::Str),
    // Everything else
    ("BooleanField", ScalarType::Bool),
    ("BinaryField", ScalarType::Bytes),
    ("DateField", ScalarType::Date),
    ("DateTimeField", ScalarType::DateTime),
    ("DurationField", ScalarType::Duration),
    ("TimeField", ScalarType::Time),
    ("UUIDField", ScalarType::Uuid),
    ("GenericIPAddressField", ScalarType::IpAddress),
    ("JSONField", ScalarType::Json),
];

/// Looks up the scalar type for a Django field class name.
pub fn lookup(type_name: &str) -> Option<ScalarType> {
    DJANGO_FIELD_MAP
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, scalar)| *scalar)
}

/// Resolves the scalar type for a Django field class name, falling back to
/// [`ScalarType::Any`] with a warning when the class is not in the table.
///
/// # Examples
///
/// ```
/// use django_rs_serializers::field_map::{resolve, ScalarType};
///
/// assert_eq!(resolve("CharField"), ScalarType::Str);
/// assert_eq!(resolve("ForeignKey"), ScalarType::Any);
/// ```
pub fn resolve(type_name: &str) -> ScalarType {
    lookup(type_name).unwrap_or_else(|| {
        tracing::warn!(field_type = type_name, "Field type is not supported, using Any");
        ScalarType::Any
    })
}

fn decimal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").unwrap())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_datetime(s: &str) -> Option<Value> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(Value::DateTimeTz(dt.with_timezone(&chrono::Utc)));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(Value::DateTime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;

    #[test]
    fn test_lookup_covers_every_entry() {
        for (name, scalar) in DJANGO_FIELD_MAP {
            assert_eq!(lookup(name), Some(*scalar), "{name}");
        }
    }

    #[test]
    fn test_lookup_integer_family() {
        for name in [
            "AutoField",
            "BigAutoField",
            "IntegerField",
            "SmallIntegerField",
            "BigIntegerField",
            "PositiveIntegerField",
            "PositiveSmallIntegerField",
        ] {
            assert_eq!(lookup(name), Some(ScalarType::Int));
        }
    }

    #[test]
    fn test_lookup_special_types() {
        assert_eq!(lookup("DecimalField"), Some(ScalarType::Decimal));
        assert_eq!(lookup("UUIDField"), Some(ScalarType::Uuid));
        assert_eq!(lookup("GenericIPAddressField"), Some(ScalarType::IpAddress));
        assert_eq!(lookup("JSONField"), Some(ScalarType::Json));
        assert_eq!(lookup("DurationField"), Some(ScalarType::Duration));
    }

    #[test]
    fn test_unknown_types_resolve_to_any() {
        assert_eq!(lookup("ForeignKey"), None);
        assert_eq!(resolve("ForeignKey"), ScalarType::Any);
        assert_eq!(resolve("SomethingNew"), ScalarType::Any);
    }

    #[test]
    fn test_resolve_warns_on_unknown_type() {
        let (resolved, logs) = capture_logs(|| resolve("PointField"));
        assert_eq!(resolved, ScalarType::Any);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Field type is not supported"));
        assert!(logs.contains("PointField"));

        let (_, logs) = capture_logs(|| resolve("CharField"));
        assert!(logs.is_empty());
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(ScalarType::Int.coerce(Value::Int(3)), Some(Value::Int(3)));
        assert_eq!(ScalarType::Int.coerce(Value::from(" 42 ")), Some(Value::Int(42)));
        assert_eq!(ScalarType::Int.coerce(Value::Float(2.0)), Some(Value::Int(2)));
        assert_eq!(ScalarType::Int.coerce(Value::Float(2.5)), None);
        assert_eq!(ScalarType::Int.coerce(Value::from("abc")), None);
        assert_eq!(ScalarType::Int.coerce(Value::Bool(true)), None);
    }

    #[test]
    fn test_coerce_str_is_strict() {
        assert_eq!(ScalarType::Str.coerce(Value::from("x")), Some(Value::from("x")));
        assert_eq!(ScalarType::Str.coerce(Value::Int(1)), None);
    }

    #[test]
    fn test_coerce_bool() {
        assert_eq!(ScalarType::Bool.coerce(Value::from("yes")), Some(Value::Bool(true)));
        assert_eq!(ScalarType::Bool.coerce(Value::Int(0)), Some(Value::Bool(false)));
        assert_eq!(ScalarType::Bool.coerce(Value::Int(2)), None);
    }

    #[test]
    fn test_coerce_decimal() {
        assert_eq!(
            ScalarType::Decimal.coerce(Value::from("12.50")),
            Some(Value::Decimal("12.50".into()))
        );
        assert_eq!(
            ScalarType::Decimal.coerce(Value::Int(3)),
            Some(Value::Decimal("3".into()))
        );
        assert_eq!(ScalarType::Decimal.coerce(Value::from("1.2.3")), None);
        assert_eq!(ScalarType::Decimal.coerce(Value::Float(f64::NAN)), None);
    }

    #[test]
    fn test_coerce_temporal() {
        assert!(matches!(
            ScalarType::Date.coerce(Value::from("2024-01-15")),
            Some(Value::Date(_))
        ));
        assert!(matches!(
            ScalarType::DateTime.coerce(Value::from("2024-01-15T10:30:00Z")),
            Some(Value::DateTimeTz(_))
        ));
        assert!(matches!(
            ScalarType::DateTime.coerce(Value::from("2024-01-15 10:30:00")),
            Some(Value::DateTime(_))
        ));
        assert!(matches!(
            ScalarType::Time.coerce(Value::from("10:30")),
            Some(Value::Time(_))
        ));
        assert!(matches!(
            ScalarType::Duration.coerce(Value::Int(90)),
            Some(Value::Duration(_))
        ));
        assert_eq!(ScalarType::Date.coerce(Value::from("15/01/2024")), None);
    }

    #[test]
    fn test_coerce_uuid_and_ip() {
        assert!(matches!(
            ScalarType::Uuid.coerce(Value::from("550e8400-e29b-41d4-a716-446655440000")),
            Some(Value::Uuid(_))
        ));
        assert!(matches!(
            ScalarType::IpAddress.coerce(Value::from("::1")),
            Some(Value::IpAddr(_))
        ));
        assert_eq!(ScalarType::IpAddress.coerce(Value::from("999.1.1.1")), None);
    }

    #[test]
    fn test_coerce_json() {
        assert_eq!(
            ScalarType::Json.coerce(Value::from(r#"{"a": 1}"#)),
            Some(Value::Json(serde_json::json!({"a": 1})))
        );
        assert_eq!(
            ScalarType::Json.coerce(Value::List(vec![Value::Int(1)])),
            Some(Value::Json(serde_json::json!([1])))
        );
        assert_eq!(ScalarType::Json.coerce(Value::from("{not json")), None);
        assert_eq!(ScalarType::Json.coerce(Value::Int(1)), None);
    }

    #[test]
    fn test_any_accepts_everything() {
        assert_eq!(ScalarType::Any.coerce(Value::Null), Some(Value::Null));
        assert_eq!(ScalarType::Any.coerce(Value::Int(1)), Some(Value::Int(1)));
    }

    #[test]
    fn test_display() {
        assert_eq!(ScalarType::IpAddress.to_string(), "ip_address");
        assert_eq!(ScalarType::Str.to_string(), "str");
    }
}
