//! Field defaults: literal values and zero-argument producers.
//!
//! Django lets `default=` be either a value or a callable. [`FieldDefault`]
//! keeps that distinction in the type so nothing has to probe a default by
//! calling it.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// A zero-argument function producing a fresh default value.
///
/// Cloning a `DefaultFactory` shares the function, not a produced value;
/// every [`call`](DefaultFactory::call) runs the function again.
///
/// # Examples
///
/// ```
/// use django_rs_db::fields::DefaultFactory;
/// use django_rs_db::value::Value;
///
/// let factory = DefaultFactory::new(|| Value::List(Vec::new()));
/// assert_eq!(factory.call(), Value::List(Vec::new()));
/// ```
#[derive(Clone)]
pub struct DefaultFactory(Arc<dyn Fn() -> Value + Send + Sync>);

impl DefaultFactory {
    /// Wraps a function as a default factory.
    pub fn new(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Produces a new default value.
    pub fn call(&self) -> Value {
        (self.0)()
    }

    /// Returns `true` if both handles wrap the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DefaultFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultFactory(..)")
    }
}

/// The default declared on a model field.
#[derive(Debug, Clone)]
pub enum FieldDefault {
    /// A literal value used as-is.
    Value(Value),
    /// A function called each time a default is needed.
    Factory(DefaultFactory),
}

impl FieldDefault {
    /// Returns `true` if the default is produced by a function.
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Factory(_))
    }

    /// Returns the literal default, if this is not a factory.
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Factory(_) => None,
        }
    }

    /// Resolves the default to a concrete value, calling the factory if needed.
    pub fn resolve(&self) -> Value {
        match self {
            Self::Value(v) => v.clone(),
            Self::Factory(f) => f.call(),
        }
    }
}

impl From<Value> for FieldDefault {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<DefaultFactory> for FieldDefault {
    fn from(f: DefaultFactory) -> Self {
        Self::Factory(f)
    }
}
