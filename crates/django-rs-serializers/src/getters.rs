//! Field getters: choosing which model fields a serializer covers.

use std::collections::BTreeSet;

use django_rs_core::{DjangoError, DjangoResult};
use django_rs_db::fields::FieldDef;
use django_rs_db::model::ModelMeta;

/// Signature of a pluggable field getter.
///
/// A getter receives the model metadata plus optional include and exclude
/// name sets and returns the selected fields in declaration order.
pub type FieldsGetter = for<'m> fn(
    &'m ModelMeta,
    Option<&BTreeSet<String>>,
    Option<&BTreeSet<String>>,
) -> DjangoResult<Vec<&'m FieldDef>>;

/// Returns the model's fields, filtered by `include` or `exclude`.
///
/// Declaration order is preserved. Names that do not match a field are
/// ignored. Passing both filters is an error.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use django_rs_db::fields::{FieldDef, FieldType};
/// use django_rs_db::model::ModelMeta;
/// use django_rs_serializers::getters::default_get_fields;
///
/// let meta = ModelMeta::new("shop", "Item", vec![
///     FieldDef::new("id", FieldType::AutoField),
///     FieldDef::new("name", FieldType::CharField),
///     FieldDef::new("price", FieldType::FloatField),
/// ]);
/// let exclude: BTreeSet<String> = ["id".to_string()].into();
/// let fields = default_get_fields(&meta, None, Some(&exclude)).unwrap();
/// let names: Vec<_> = fields.iter().map(|f| f.name).collect();
/// assert_eq!(names, ["name", "price"]);
/// ```
pub fn default_get_fields<'m>(
    meta: &'m ModelMeta,
    include: Option<&BTreeSet<String>>,
    exclude: Option<&BTreeSet<String>>,
) -> DjangoResult<Vec<&'m FieldDef>> {
    match (include, exclude) {
        (Some(_), Some(_)) => Err(DjangoError::InvalidArgument(
            "Cannot include and exclude fields at the same time".to_string(),
        )),
        (Some(include), None) => Ok(meta
            .fields
            .iter()
            .filter(|f| include.contains(f.name))
            .collect()),
        (None, Some(exclude)) => Ok(meta
            .fields
            .iter()
            .filter(|f| !exclude.contains(f.name))
            .collect()),
        (None, None) => Ok(meta.fields.iter().collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use django_rs_db::fields::FieldType;

    fn meta() -> ModelMeta {
        ModelMeta::new(
            "test",
            "Sample",
            vec![
                FieldDef::new("id", FieldType::AutoField).primary_key(),
                FieldDef::new("a", FieldType::CharField),
                FieldDef::new("b", FieldType::IntegerField),
                FieldDef::new("c", FieldType::BooleanField),
            ],
        )
    }

    fn names(fields: &[&FieldDef]) -> Vec<&'static str> {
        fields.iter().map(|f| f.name).collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_all_fields() {
        let meta = meta();
        let fields = default_get_fields(&meta, None, None).unwrap();
        assert_eq!(names(&fields), vec!["id", "a", "b", "c"]);
    }

    #[test]
    fn test_include_keeps_declared_order() {
        let meta = meta();
        let include = set(&["c", "a"]);
        let fields = default_get_fields(&meta, Some(&include), None).unwrap();
        assert_eq!(names(&fields), vec!["a", "c"]);
    }

    #[test]
    fn test_exclude() {
        let meta = meta();
        let exclude = set(&["a"]);
        let fields = default_get_fields(&meta, None, Some(&exclude)).unwrap();
        assert_eq!(names(&fields), vec!["id", "b", "c"]);
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let meta = meta();
        let include = set(&["a", "nope"]);
        let fields = default_get_fields(&meta, Some(&include), None).unwrap();
        assert_eq!(names(&fields), vec!["a"]);

        let exclude = set(&["nope"]);
        let fields = default_get_fields(&meta, None, Some(&exclude)).unwrap();
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_empty_include_selects_nothing() {
        let meta = meta();
        let include = BTreeSet::new();
        let fields = default_get_fields(&meta, Some(&include), None).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_include_and_exclude_is_invalid() {
        let meta = meta();
        let include = set(&["a"]);
        let exclude = set(&["b"]);
        let err = default_get_fields(&meta, Some(&include), Some(&exclude)).unwrap_err();
        match err {
            DjangoError::InvalidArgument(msg) => {
                assert_eq!(msg, "Cannot include and exclude fields at the same time");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_getter_fits_pointer_type() {
        let getter: FieldsGetter = default_get_fields;
        let meta = meta();
        assert_eq!(getter(&meta, None, None).unwrap().len(), 4);
    }
}
