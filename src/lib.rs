//! Write Leptos form fields into the page's URL query string.
//!
//! The core is [`query::upsert`], a pure function setting one `key=value` pair in a raw query
//! string. Everything else folds configured form fields through it and navigates to the result.
//!
//! ```no_run
//! use leptos::prelude::*;
//! use leptos_query_sync::{use_query_sync, FieldSpec, UseQuerySyncOptions};
//! use leptos_query_sync::components::{LastQuerySyncError, QueryFieldInput, SubmitQueryButton};
//!
//! #[component]
//! pub fn Explorer() -> impl IntoView {
//!     let _sync = use_query_sync(UseQuerySyncOptions {
//!         fields: vec![
//!             FieldSpec::text("name").with_label("Dataset"),
//!             FieldSpec::text("column").with_label("Column"),
//!             FieldSpec::integer("precision"),
//!         ],
//!         advanced: Default::default(),
//!     });
//!
//!     // Pressing the button navigates to `<current path>?name=..&column=..&precision=..`,
//!     // keeping all other parameters of the current query.
//!     view! {
//!         <QueryFieldInput field="name"/>
//!         <QueryFieldInput field="column"/>
//!         <QueryFieldInput field="precision"/>
//!         <SubmitQueryButton/>
//!         <LastQuerySyncError/>
//!     }
//! }
//! ```
//!

pub mod components;
mod config;
mod error;
mod field;
mod hooks;
pub mod links;
mod location;
pub mod query;
mod rules;
mod state;
mod submit;

// Library exports (additional to pub modules).
pub use config::*;
pub use error::*;
pub use field::FieldKind;
pub use hooks::*;
pub use location::Location;
pub use rules::SqlQuery;
pub use state::*;
pub use submit::{FormValues, apply_sql_query, next_location};
pub mod url {
    pub use url::Url;
}
