use leptos::*;
use std::rc::Rc;

use crate::{use_fetch, HttpClient, QueryParams, ResponseState};

/// Controls the placeholder shown while a request is outstanding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadingLabel {
    /// No placeholder, the render callback sees `loading: true`
    #[default]
    Hidden,
    /// `Loading ...`
    Generic,
    /// `Loading {label}...`
    Named(String),
}

impl LoadingLabel {
    /// The placeholder text, if one should replace the rendered output.
    pub fn placeholder(&self, loading: bool) -> Option<String> {
        if !loading {
            return None;
        }
        match self {
            LoadingLabel::Hidden => None,
            LoadingLabel::Generic => Some("Loading ...".to_string()),
            LoadingLabel::Named(label) => Some(format!("Loading {label}...")),
        }
    }
}

impl From<bool> for LoadingLabel {
    fn from(show: bool) -> Self {
        if show {
            LoadingLabel::Generic
        } else {
            LoadingLabel::Hidden
        }
    }
}

impl From<String> for LoadingLabel {
    fn from(label: String) -> Self {
        if label.is_empty() {
            LoadingLabel::Hidden
        } else {
            LoadingLabel::Named(label)
        }
    }
}

impl From<&str> for LoadingLabel {
    fn from(label: &str) -> Self {
        label.to_string().into()
    }
}

/// Fetches JSON from `endpoint` and renders it through `render`.
///
/// The request is issued on mount and again each time `search_trigger` takes a
/// new value. Failed requests are logged and leave the last payload in place.
///
/// ```no_run
/// use leptos::*;
/// use leptos_fetcher::*;
/// use std::rc::Rc;
///
/// #[component]
/// fn Users() -> impl IntoView {
///     let client: Rc<dyn HttpClient> = Rc::new(ReqwestClient::new());
///
///     view! {
///         <Fetcher
///             endpoint="https://jsonplaceholder.typicode.com/users"
///             client=client
///             loading_label="users"
///             render=|state: ResponseState| {
///                 format!("{} users", state.as_array().map_or(0, Vec::len))
///             }
///         />
///     }
/// }
/// ```
#[component]
pub fn Fetcher<F, IV>(
    /// Path relative to the client's base URL, or an absolute URL
    #[prop(into)]
    endpoint: MaybeSignal<String>,
    /// Client used for every request of this instance
    client: Rc<dyn HttpClient>,
    /// Turns the current state into a view
    render: F,
    /// Query parameters, read when a request is dispatched
    #[prop(into, optional)]
    query_params: MaybeSignal<QueryParams>,
    /// Placeholder shown instead of `render` while loading
    #[prop(into, optional)]
    loading_label: LoadingLabel,
    /// A new value causes a new request
    #[prop(into, optional)]
    search_trigger: MaybeSignal<String>,
) -> impl IntoView
where
    F: Fn(ResponseState) -> IV + 'static,
    IV: IntoView + 'static,
{
    let state = use_fetch(client, endpoint, query_params, search_trigger);

    move || present(state.get(), &loading_label, &render)
}

fn present<F, IV>(current: ResponseState, loading_label: &LoadingLabel, render: &F) -> View
where
    F: Fn(ResponseState) -> IV,
    IV: IntoView,
{
    match loading_label.placeholder(current.loading) {
        Some(text) => view! { <span>{text}</span> }.into_view(),
        None => view! { <div>{render(current)}</div> }.into_view(),
    }
}
