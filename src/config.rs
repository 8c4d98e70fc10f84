use crate::error::{ConfigError, DuplicateKeySnafu, EmptyKeySnafu, InvalidKeySnafu};
use crate::field::FieldKind;
use crate::rules::SqlQuery;
use snafu::ensure;
use std::collections::HashSet;

/// Characters which would break the `key=value&...` layout of a query string.
const RESERVED_KEY_CHARACTERS: &[char] = &['?', '&', '=', '#'];

/// Describes which form fields are written into the page's query string on submit.
#[derive(Debug, Clone)]
pub struct UseQuerySyncOptions {
    /// The recognized fields. They are written into the query in this order.
    pub fields: Vec<FieldSpec>,

    pub advanced: AdvancedOptions,
}

/// A single recognized form field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldSpec {
    /// Name of the query parameter this field is written to.
    pub key: String,

    pub kind: FieldKind,

    /// Human-readable label, E.g. "Dataset".
    #[serde(default)]
    pub label: Option<String>,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            kind,
            label: None,
        }
    }

    pub fn text(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Text)
    }

    pub fn integer(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Integer)
    }

    pub fn float(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Float)
    }

    pub fn json(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Json)
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        ensure!(!self.key.is_empty(), EmptyKeySnafu);
        if let Some(character) = self
            .key
            .chars()
            .find(|c| c.is_whitespace() || RESERVED_KEY_CHARACTERS.contains(c))
        {
            return InvalidKeySnafu {
                key: self.key.as_str(),
                character,
            }
            .fail();
        }
        Ok(())
    }
}

/// How the page is moved to the updated location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationMode {
    /// Assign `window.location.href`, reloading the page.
    #[default]
    FullPageLoad,

    /// Navigate client-side through the Leptos router.
    /// Requires `use_query_sync` to be called below a `<Router>`.
    Router {
        /// Replace the current history entry instead of pushing a new one.
        replace: bool,
    },
}

#[derive(Debug, Clone)]
pub struct AdvancedOptions {
    /// Defaults to `NavigationMode::FullPageLoad`.
    pub navigation: NavigationMode,

    /// Leave the query untouched for text fields holding an empty string.
    /// Defaults to `false`, writing `key=`.
    pub skip_empty_text: bool,

    /// Query parameter receiving the serialized query builder result.
    /// Defaults to `"x"`.
    pub sql_query_key: String,
}

impl Default for AdvancedOptions {
    fn default() -> Self {
        Self {
            navigation: NavigationMode::default(),
            skip_empty_text: false,
            sql_query_key: SqlQuery::KEY.to_owned(),
        }
    }
}

/// Validated [`UseQuerySyncOptions`].
#[derive(Debug, Clone)]
pub struct Options {
    fields: Vec<FieldSpec>,
    advanced: AdvancedOptions,
}

impl Options {
    pub fn new(options: UseQuerySyncOptions) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(options.fields.len());
        for field in &options.fields {
            field.validate()?;
            // Keys are matched case-insensitively in the query, so `A` and `a` would collide.
            ensure!(
                seen.insert(field.key.to_lowercase()),
                DuplicateKeySnafu {
                    key: field.key.as_str()
                }
            );
        }
        FieldSpec {
            key: options.advanced.sql_query_key.clone(),
            kind: FieldKind::Json,
            label: None,
        }
        .validate()?;

        Ok(Self {
            fields: options.fields,
            advanced: options.advanced,
        })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|it| it.key == key)
    }

    pub fn advanced(&self) -> &AdvancedOptions {
        &self.advanced
    }
}

#[cfg(test)]
mod tests {
    use super::{AdvancedOptions, FieldSpec, NavigationMode, Options, UseQuerySyncOptions};
    use crate::error::ConfigError;
    use assertr::prelude::*;

    fn options(fields: Vec<FieldSpec>) -> UseQuerySyncOptions {
        UseQuerySyncOptions {
            fields,
            advanced: AdvancedOptions::default(),
        }
    }

    #[test]
    fn accepts_distinct_keys() {
        let options = Options::new(options(vec![
            FieldSpec::text("name").with_label("Dataset"),
            FieldSpec::text("column").with_label("Column"),
            FieldSpec::integer("precision"),
        ]))
        .unwrap();

        assert_that(options.fields().len()).is_equal_to(3);
        assert_that(options.field("column").and_then(|it| it.label.clone()))
            .is_equal_to(Some("Column".to_owned()));
        assert_that(options.advanced().navigation).is_equal_to(NavigationMode::FullPageLoad);
        assert_that(options.advanced().sql_query_key.as_str()).is_equal_to("x");
    }

    #[test]
    fn rejects_empty_key() {
        let err = Options::new(options(vec![FieldSpec::text("")])).unwrap_err();
        assert_that(err).is_equal_to(ConfigError::EmptyKey);
    }

    #[test]
    fn rejects_reserved_characters() {
        for (key, character) in [("a&b", '&'), ("a=b", '='), ("?a", '?'), ("a#", '#'), ("a b", ' ')] {
            let err = Options::new(options(vec![FieldSpec::text(key)])).unwrap_err();
            assert_that(err).is_equal_to(ConfigError::InvalidKey {
                key: key.to_owned(),
                character,
            });
        }
    }

    #[test]
    fn rejects_case_insensitive_duplicates() {
        let err = Options::new(options(vec![FieldSpec::text("name"), FieldSpec::float("Name")]))
            .unwrap_err();
        assert_that(err).is_equal_to(ConfigError::DuplicateKey {
            key: "Name".to_owned(),
        });
    }

    #[test]
    fn validates_sql_query_key() {
        let err = Options::new(UseQuerySyncOptions {
            fields: vec![],
            advanced: AdvancedOptions {
                sql_query_key: "x&y".to_owned(),
                ..AdvancedOptions::default()
            },
        })
        .unwrap_err();
        assert_that(err.to_string())
            .is_equal_to("ConfigError: Field key \"x&y\" contains the reserved character '&'".to_owned());
    }
}
