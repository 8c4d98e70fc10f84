use snafu::Snafu;

/// Rejected field declarations in [`UseQuerySyncOptions`](crate::UseQuerySyncOptions).
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("ConfigError: Field key must not be empty"))]
    EmptyKey,

    #[snafu(display("ConfigError: Field key {key:?} contains the reserved character {character:?}"))]
    InvalidKey { key: String, character: char },

    #[snafu(display("ConfigError: Field key {key:?} is declared more than once"))]
    DuplicateKey { key: String },
}

/// A raw form value that does not match the declared [`FieldKind`](crate::FieldKind).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FieldValueError {
    #[snafu(display("FieldValueError: {input:?} is not an integer"))]
    InvalidInteger {
        input: String,
        source: std::num::ParseIntError,
    },

    #[snafu(display("FieldValueError: {input:?} is not a number"))]
    InvalidFloat {
        input: String,
        source: std::num::ParseFloatError,
    },

    #[snafu(display("FieldValueError: {input:?} is not a finite number"))]
    NonFiniteFloat { input: String },

    #[snafu(display("FieldValueError: {input:?} is not valid JSON: {source}"))]
    InvalidJson {
        input: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SubmitError {
    #[snafu(display("SubmitError: Value of field {key:?} was rejected"))]
    Field {
        key: String,
        source: FieldValueError,
    },

    #[snafu(display("SubmitError: Could not serialize query builder result: {source}"))]
    Serialize { source: serde_json::Error },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum LinkError {
    #[snafu(display("LinkError: Date arithmetic left the supported range"))]
    OutOfRange,

    #[snafu(display("LinkError: Invalid calendar date"))]
    Date { source: time::error::ComponentRange },

    #[snafu(display("LinkError: Could not format date"))]
    Format { source: time::error::Format },
}

/// Errors surfaced through [`QuerySync::last_error`](crate::QuerySync::last_error).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum QuerySyncError {
    #[snafu(display("QuerySyncError: Could not build the next location"))]
    Submit { source: SubmitError },

    #[snafu(display("QuerySyncError: Could not read window.location: {message}"))]
    ReadLocation { message: String },

    #[snafu(display("QuerySyncError: Navigation to {href:?} failed: {message}"))]
    Navigation { href: String, message: String },
}
