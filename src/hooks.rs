use crate::config::{NavigationMode, Options, UseQuerySyncOptions};
use crate::error::{ConfigError, QuerySyncError};
use crate::state::QuerySync;
use leptos::context::provide_context;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use std::sync::Arc;

/// Initializes a new `QuerySync` instance from the given field configuration and provides it
/// as context.
///
/// # Panics
/// If the options are invalid. Use [`try_use_query_sync`] to handle that case yourself.
pub fn use_query_sync(options: UseQuerySyncOptions) -> QuerySync {
    match try_use_query_sync(options) {
        Ok(sync) => sync,
        Err(err) => {
            tracing::error!(?err, "Invalid query sync options");
            panic!("Invalid query sync options: {err}");
        }
    }
}

/// Like [`use_query_sync`], returning configuration errors instead of panicking.
pub fn try_use_query_sync(options: UseQuerySyncOptions) -> Result<QuerySync, ConfigError> {
    tracing::trace!("Initializing query sync...");

    let options = Options::new(options)?;

    let inputs = options
        .fields()
        .iter()
        .map(|field| (field.key.clone(), RwSignal::new(String::new())))
        .collect::<Vec<_>>();

    let navigate = match options.advanced().navigation {
        NavigationMode::FullPageLoad => Callback::new(move |href: String| {
            window()
                .location()
                .set_href(&href)
                .map_err(|err| QuerySyncError::Navigation {
                    href,
                    message: format!("{err:?}"),
                })
        }),
        NavigationMode::Router { replace } => {
            // Must be obtained here, the router context is not reachable from event handlers.
            let navigate = use_navigate();
            Callback::new(move |href: String| {
                navigate(
                    &href,
                    NavigateOptions {
                        replace,
                        ..NavigateOptions::default()
                    },
                );
                Ok(())
            })
        }
    };

    let (last_error, set_last_error) = signal::<Option<Arc<QuerySyncError>>>(None);

    let sync = QuerySync {
        options: StoredValue::new(options),
        inputs: StoredValue::new(inputs),
        navigate,
        last_error: last_error.into(),
        set_last_error,
    };

    provide_context(sync);

    Ok(sync)
}
