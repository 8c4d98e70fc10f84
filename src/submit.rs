use crate::config::Options;
use crate::error::{FieldSnafu, SerializeSnafu, SubmitError};
use crate::field::FieldKind;
use crate::location::Location;
use crate::query;
use crate::rules::SqlQuery;
use snafu::ResultExt;

/// Normalized values of the configured fields, in declaration order.
///
/// A `None` value stands for an unset field and leaves its query parameter untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: Vec<(String, Option<String>)>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every configured field through `raw` and normalizes it by its kind.
    ///
    /// `raw` returns `None` for fields that are not present on the page.
    pub fn collect(
        options: &Options,
        mut raw: impl FnMut(&str) -> Option<String>,
    ) -> Result<Self, SubmitError> {
        let skip_empty_text = options.advanced().skip_empty_text;
        let mut values = Vec::with_capacity(options.fields().len());
        for field in options.fields() {
            let value = match raw(&field.key) {
                Some(input)
                    if skip_empty_text && field.kind == FieldKind::Text && input.is_empty() =>
                {
                    None
                }
                Some(input) => field.kind.normalize(&input).context(FieldSnafu {
                    key: field.key.as_str(),
                })?,
                None => None,
            };
            values.push((field.key.clone(), value));
        }
        Ok(Self { values })
    }

    /// Sets or replaces the value of `key`.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.values.iter_mut().find(|(it, _)| *it == key) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(it, _)| it == key)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (K, Option<String>)>>(iter: T) -> Self {
        let mut values = FormValues::new();
        for (key, value) in iter {
            values.set(key, value);
        }
        values
    }
}

/// The location to navigate to after folding `values` into the search of `current`.
pub fn next_location(current: &Location, values: &FormValues) -> Location {
    current.with_search(query::upsert_all(current.search(), values.iter()))
}

/// The location to navigate to after storing the query builder result under `key`.
///
/// `Ok(None)` when the builder produced no SQL, in which case no navigation should happen.
pub fn apply_sql_query(
    current: &Location,
    key: &str,
    query: &SqlQuery,
) -> Result<Option<Location>, SubmitError> {
    let value = query.to_query_value().context(SerializeSnafu)?;
    Ok(value.map(|value| current.upsert(key, Some(&value))))
}

#[cfg(test)]
mod tests {
    use super::{FormValues, apply_sql_query, next_location};
    use crate::config::{AdvancedOptions, FieldSpec, Options, UseQuerySyncOptions};
    use crate::error::{FieldValueError, SubmitError};
    use crate::location::Location;
    use crate::rules::SqlQuery;
    use assertr::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn options(skip_empty_text: bool) -> Options {
        Options::new(UseQuerySyncOptions {
            fields: vec![
                FieldSpec::text("name"),
                FieldSpec::text("column"),
                FieldSpec::integer("precision"),
            ],
            advanced: AdvancedOptions {
                skip_empty_text,
                ..AdvancedOptions::default()
            },
        })
        .unwrap()
    }

    fn page(values: &[(&str, &str)]) -> HashMap<String, String> {
        values
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn collects_in_declaration_order() {
        let page = page(&[("precision", "3"), ("name", "runs"), ("column", "")]);
        let values = FormValues::collect(&options(false), |key| page.get(key).cloned()).unwrap();

        let collected: Vec<_> = values.iter().collect();
        assert_that(collected).is_equal_to(vec![
            ("name", Some("runs")),
            ("column", Some("")),
            ("precision", Some("3")),
        ]);
    }

    #[test]
    fn missing_and_skipped_fields_are_unset() {
        let page = page(&[("column", "")]);
        let values = FormValues::collect(&options(true), |key| page.get(key).cloned()).unwrap();

        assert_that(values.len()).is_equal_to(3);
        assert_that(values.iter().all(|(_, value)| value.is_none())).is_true();
    }

    #[test]
    fn rejected_field_names_the_key() {
        let page = page(&[("precision", "high")]);
        let err = FormValues::collect(&options(false), |key| page.get(key).cloned()).unwrap_err();

        assert_that(matches!(
            err,
            SubmitError::Field { ref key, source: FieldValueError::InvalidInteger { .. } } if key == "precision"
        ))
        .is_true();
    }

    #[test]
    fn next_location_folds_values_into_search() {
        let current = Location::new("/explore", "?name=old&fn=avg");
        let values: FormValues = [
            ("name", Some("runs".to_owned())),
            ("column", None),
            ("precision", Some("3".to_owned())),
        ]
        .into_iter()
        .collect();

        let next = next_location(&current, &values);
        assert_that(next.href()).is_equal_to("/explore?name=runs&fn=avg&precision=3".to_owned());
    }

    #[test]
    fn next_location_from_empty_search() {
        let mut values = FormValues::new();
        values.set("a", Some("1".to_owned()));
        values.set("b", Some("2".to_owned()));
        values.set("a", Some("3".to_owned()));

        let next = next_location(&Location::new("/", ""), &values);
        assert_that(next.href()).is_equal_to("/?a=3&b=2".to_owned());
        assert_that(values.get("a")).is_equal_to(Some("3"));
    }

    #[test]
    fn empty_sql_query_does_not_navigate() {
        let next = apply_sql_query(&Location::new("/", "?a=1"), "x", &SqlQuery::default()).unwrap();
        assert_that(next).is_equal_to(None);
    }

    #[test]
    fn sql_query_is_stored_as_pretty_json() {
        let query = SqlQuery::new("price < ?", vec![json!(10)]);
        let next = apply_sql_query(&Location::new("/data", "?a=1"), "x", &query)
            .unwrap()
            .unwrap();
        assert_that(next.href()).is_equal_to(
            "/data?a=1&x={\n  \"sql\": \"price < ?\",\n  \"params\": [\n    10\n  ]\n}".to_owned(),
        );
    }
}
