use crate::error::{
    FieldValueError, InvalidFloatSnafu, InvalidIntegerSnafu, InvalidJsonSnafu,
    NonFiniteFloatSnafu,
};
use snafu::{ResultExt, ensure};

/// The expected type of a form field's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text, written as typed.
    #[default]
    Text,
    Integer,
    Float,
    /// Any JSON document, written in compact form.
    Json,
}

impl FieldKind {
    /// Converts raw input text into the string form written to the query.
    ///
    /// `Ok(None)` means the field is unset and the query is left alone for it. Typed kinds treat
    /// blank input as unset, text is always set.
    pub fn normalize(self, raw: &str) -> Result<Option<String>, FieldValueError> {
        let input = raw.trim();
        let normalized = match self {
            FieldKind::Text => raw.to_owned(),
            _ if input.is_empty() => return Ok(None),
            FieldKind::Integer => input
                .parse::<i64>()
                .context(InvalidIntegerSnafu { input })?
                .to_string(),
            FieldKind::Float => {
                let value = input
                    .parse::<f64>()
                    .context(InvalidFloatSnafu { input })?;
                ensure!(value.is_finite(), NonFiniteFloatSnafu { input });
                value.to_string()
            }
            FieldKind::Json => serde_json::from_str::<serde_json::Value>(input)
                .context(InvalidJsonSnafu { input })?
                .to_string(),
        };
        Ok(Some(normalized))
    }

    /// The `type` attribute of an `<input>` collecting this kind.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Integer | FieldKind::Float => "number",
            FieldKind::Text | FieldKind::Json => "text",
        }
    }
}
