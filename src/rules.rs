use serde::{Deserialize, Serialize};

/// Result of a visual query builder, as produced by its `getSQL` export in `question_mark` mode:
/// a SQL condition with `?` placeholders and the values bound to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SqlQuery {
    pub sql: String,

    #[serde(default)]
    pub params: Vec<serde_json::Value>,
}

impl SqlQuery {
    /// Query parameter the serialized result is stored under, unless configured otherwise.
    pub const KEY: &'static str = "x";

    pub fn new(sql: impl Into<String>, params: Vec<serde_json::Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// An empty builder produces no SQL. Nothing is submitted in that case.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// The value written to the query: the whole result as JSON, pretty-printed with two spaces
    /// of indentation. `None` for an empty query.
    pub fn to_query_value(&self) -> Result<Option<String>, serde_json::Error> {
        if self.is_empty() {
            return Ok(None);
        }
        serde_json::to_string_pretty(self).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::SqlQuery;
    use assertr::prelude::*;
    use serde_json::json;

    #[test]
    fn empty_query_has_no_value() {
        let query = SqlQuery::default();
        assert_that(query.is_empty()).is_true();
        assert_that(query.to_query_value().unwrap()).is_equal_to(None);
    }

    #[test]
    fn pretty_prints_with_two_spaces() {
        let query = SqlQuery::new("price < ? AND category = ?", vec![json!(10.25), json!(2)]);
        let value = query.to_query_value().unwrap();
        assert_that(value).is_equal_to(Some(
            "{\n  \"sql\": \"price < ? AND category = ?\",\n  \"params\": [\n    10.25,\n    2\n  ]\n}"
                .to_owned(),
        ));
    }

    #[test]
    fn deserializes_builder_output_without_params() {
        let query: SqlQuery = serde_json::from_str(r#"{"sql":"name = 'a'"}"#).unwrap();
        assert_that(query).is_equal_to(SqlQuery::new("name = 'a'", vec![]));
    }
}
