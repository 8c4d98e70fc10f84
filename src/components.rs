use crate::config::{AdvancedOptions, FieldSpec, UseQuerySyncOptions};
use crate::rules::SqlQuery;
use crate::{QuerySync, use_query_sync};
use leptos::prelude::*;

/// Initializes query sync for the given fields and provides it to child components.
///
/// # Example
/// ```no_run
/// use leptos::prelude::*;
/// use leptos_query_sync::FieldSpec;
/// use leptos_query_sync::components::{QueryFieldInput, QuerySyncProvider, SubmitQueryButton};
///
/// # #[component]
/// # fn Example() -> impl IntoView {
/// view! {
///     <QuerySyncProvider fields=vec![
///         FieldSpec::text("name").with_label("Dataset"),
///         FieldSpec::text("column").with_label("Column"),
///     ]>
///         <QueryFieldInput field="name"/>
///         <QueryFieldInput field="column"/>
///         <SubmitQueryButton/>
///     </QuerySyncProvider>
/// }
/// # }
/// ```
#[allow(clippy::must_use_candidate)]
#[component]
pub fn QuerySyncProvider(
    /// The recognized fields, written into the query in this order.
    fields: Vec<FieldSpec>,

    /// Advanced configuration options.
    #[prop(optional)]
    advanced: Option<AdvancedOptions>,

    children: Children,
) -> impl IntoView {
    let _sync = use_query_sync(UseQuerySyncOptions {
        fields,
        advanced: advanced.unwrap_or_default(),
    });

    view! {
        { children() }
    }
}

/// A text input bound to the configured field `field`.
/// Renders nothing if no such field was configured.
#[allow(clippy::must_use_candidate)]
#[component]
pub fn QueryFieldInput(
    /// Key of the configured field.
    #[prop(into)]
    field: String,

    #[prop(into, optional)]
    placeholder: Option<String>,
) -> impl IntoView {
    let sync = expect_context::<QuerySync>();

    let Some(value) = sync.value(&field) else {
        tracing::warn!(%field, "No query field configured under this key");
        return ().into_any();
    };
    let spec = sync.fields().into_iter().find(|it| it.key == field);
    let input_type = spec.as_ref().map_or("text", |it| it.kind.input_type());
    let placeholder = placeholder.or_else(|| spec.and_then(|it| it.label));

    view! {
        <input
            type=input_type
            name=field
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
    .into_any()
}

/// Button writing all fields into the URL when pressed.
#[allow(clippy::must_use_candidate)]
#[component]
pub fn SubmitQueryButton(
    /// Defaults to "Submit".
    #[prop(into, optional)]
    label: Option<String>,
) -> impl IntoView {
    let sync = expect_context::<QuerySync>();
    let label = label.unwrap_or_else(|| "Submit".to_owned());

    view! {
        <button type="button" on:click=move |_| sync.submit()>
            { label }
        </button>
    }
}

/// Button writing the query builder result provided by `query` into the URL when pressed.
#[allow(clippy::must_use_candidate)]
#[component]
pub fn SubmitSqlQueryButton(
    /// Current result of the query builder.
    #[prop(into)]
    query: Signal<SqlQuery>,

    /// Defaults to "Submit".
    #[prop(into, optional)]
    label: Option<String>,
) -> impl IntoView {
    let sync = expect_context::<QuerySync>();
    let label = label.unwrap_or_else(|| "Submit".to_owned());

    view! {
        <button
            type="button"
            disabled=move || query.with(SqlQuery::is_empty)
            on:click=move |_| query.with_untracked(|query| sync.submit_sql(query))
        >
            { label }
        </button>
    }
}

/// Shows the error of the last failed submit, if any.
#[allow(clippy::must_use_candidate)]
#[component]
pub fn LastQuerySyncError() -> impl IntoView {
    let sync = expect_context::<QuerySync>();

    move || {
        sync.last_error.get().map(|err| {
            view! { <p class="query-sync-error">{ err.to_string() }</p> }
        })
    }
}
