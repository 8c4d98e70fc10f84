use crate::config::{FieldSpec, Options};
use crate::error::{QuerySyncError, SubmitError, SubmitSnafu};
use crate::location::Location;
use crate::rules::SqlQuery;
use crate::submit::{self, FormValues};
use leptos::prelude::*;
use snafu::ResultExt;
use std::sync::Arc;

/// The state created by [`use_query_sync`](crate::use_query_sync). Holds one input signal per
/// configured field and knows how to write them into the page's URL.
///
/// Provided as context. Use
/// ```no_run
/// use leptos::prelude::expect_context;
/// use leptos_query_sync::QuerySync;
///
/// let sync = expect_context::<QuerySync>();
/// ```
/// in any component rendered below the component that called `use_query_sync`.
#[derive(Clone, Copy)]
pub struct QuerySync {
    pub(crate) options: StoredValue<Options>,

    pub(crate) inputs: StoredValue<Vec<(String, RwSignal<String>)>>,

    pub(crate) navigate: Callback<String, Result<(), QuerySyncError>>,

    /// Error of the last submit. Reset by every successful submit.
    pub last_error: Signal<Option<Arc<QuerySyncError>>>,

    pub(crate) set_last_error: WriteSignal<Option<Arc<QuerySyncError>>>,
}

/// Reads the browser's current location.
pub fn current_location() -> Result<Location, QuerySyncError> {
    let location = window().location();
    let pathname = location
        .pathname()
        .map_err(|err| QuerySyncError::ReadLocation {
            message: format!("{err:?}"),
        })?;
    let search = location
        .search()
        .map_err(|err| QuerySyncError::ReadLocation {
            message: format!("{err:?}"),
        })?;
    Ok(Location::new(pathname, search))
}

impl QuerySync {
    pub fn fields(&self) -> Vec<FieldSpec> {
        self.options.with_value(|it| it.fields().to_vec())
    }

    /// The input signal of the field written to `key`, if such a field was configured.
    pub fn value(&self, key: &str) -> Option<RwSignal<String>> {
        self.inputs.with_value(|inputs| {
            inputs
                .iter()
                .find(|(it, _)| it == key)
                .map(|(_, signal)| *signal)
        })
    }

    /// Normalized values of all fields, read without tracking.
    pub fn form_values(&self) -> Result<FormValues, SubmitError> {
        let inputs = self.inputs;
        self.options.with_value(|options| {
            FormValues::collect(options, |key| {
                inputs.with_value(|inputs| {
                    inputs
                        .iter()
                        .find(|(it, _)| it == key)
                        .map(|(_, signal)| signal.get_untracked())
                })
            })
        })
    }

    /// The location a submit would navigate to, starting from `current`.
    pub fn next_location(&self, current: &Location) -> Result<Location, QuerySyncError> {
        let values = self.form_values().context(SubmitSnafu)?;
        Ok(submit::next_location(current, &values))
    }

    /// Writes all field values into the current URL and navigates there.
    ///
    /// Failures are recorded in `last_error`.
    pub fn submit(&self) {
        tracing::trace!("Submitting query fields");
        let result = current_location()
            .and_then(|current| self.next_location(&current))
            .and_then(|next| self.navigate_to(&next));
        self.record(result);
    }

    /// Writes the serialized query builder result into the current URL and navigates there.
    /// Does nothing for an empty query.
    pub fn submit_sql(&self, query: &SqlQuery) {
        if query.is_empty() {
            tracing::trace!("Query builder produced no SQL, not navigating");
            return;
        }
        tracing::trace!(sql = %query.sql, "Submitting query builder result");
        let key = self
            .options
            .with_value(|it| it.advanced().sql_query_key.clone());
        let result = current_location()
            .and_then(|current| {
                submit::apply_sql_query(&current, &key, query).context(SubmitSnafu)
            })
            .and_then(|next| match next {
                Some(next) => self.navigate_to(&next),
                None => Ok(()),
            });
        self.record(result);
    }

    fn navigate_to(&self, next: &Location) -> Result<(), QuerySyncError> {
        let href = next.href();
        tracing::debug!(%href, "Navigating to updated location");
        self.navigate.run(href)
    }

    fn record(&self, result: Result<(), QuerySyncError>) {
        match result {
            Ok(()) => {
                if self.last_error.with_untracked(Option::is_some) {
                    self.set_last_error.set(None);
                }
            }
            Err(err) => {
                match &err {
                    QuerySyncError::Submit { .. } => {
                        tracing::warn!(?err, "Rejected query field values");
                    }
                    QuerySyncError::ReadLocation { .. } | QuerySyncError::Navigation { .. } => {
                        tracing::error!(?err, "Could not navigate");
                    }
                }
                self.set_last_error.set(Some(Arc::new(err)));
            }
        }
    }
}
