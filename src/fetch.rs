use leptos::*;
use std::{cell::Cell, rc::Rc};

use crate::{HttpClient, QueryParams, RequestConfig, ResponseState};

/// Runs requests against an [`HttpClient`] and writes the outcome into a
/// [`ResponseState`] signal.
///
/// Clones share the same client, signal and generation counter. Only the most
/// recently started request may write its result; older ones still run to
/// completion but their outcome is dropped.
#[derive(Clone)]
pub struct FetchTask {
    client: Rc<dyn HttpClient>,
    state: RwSignal<ResponseState>,
    generation: Rc<Cell<u64>>,
}

impl FetchTask {
    pub fn new(client: Rc<dyn HttpClient>, state: RwSignal<ResponseState>) -> Self {
        Self {
            client,
            state,
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Performs one GET request and updates the state.
    ///
    /// A failure is logged and only clears `loading`; the last payload stays.
    ///
    /// # Arguments
    ///
    /// * `request` - Endpoint and query parameters of this request
    ///
    /// # Returns
    ///
    /// Nothing. The outcome lands in the state signal, unless a newer request
    /// was started in the meantime.
    pub async fn run(&self, request: RequestConfig) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        log::debug!("Fetching {} (request #{generation})", request.endpoint);
        self.write(ResponseState::begin);

        let result = self
            .client
            .get(&request.endpoint, &request.query_params)
            .await;

        if self.generation.get() != generation {
            log::debug!(
                "Discarding stale response from {} (request #{generation})",
                request.endpoint
            );
            return;
        }

        match result {
            Ok(json) => self.write(|state| state.succeed(json)),
            Err(e) => {
                log::error!("Failed to fetch data from {}: {e:#}", request.endpoint);
                self.write(ResponseState::fail);
            }
        }
    }

    /// Starts [`FetchTask::run`] on the local executor.
    pub fn dispatch(&self, request: RequestConfig) {
        let task = self.clone();
        spawn_local(async move { task.run(request).await });
    }

    fn write(&self, f: impl FnOnce(&mut ResponseState)) {
        // The owning component may have been unmounted while the request was in flight.
        if self.state.try_update(f).is_none() {
            log::debug!("Response state was disposed before the request resolved");
        }
    }
}

/// Calls `on_change` once right away and then whenever `trigger` takes a new value.
///
/// Setting the trigger to the value it already holds does nothing.
pub fn watch_trigger(trigger: MaybeSignal<String>, on_change: impl Fn() + 'static) {
    let trigger = create_memo(move |_| trigger.get());

    create_effect(move |_| {
        trigger.track();
        untrack(&on_change);
    });
}

/// Fetches `endpoint` on mount and again whenever `search_trigger` changes.
///
/// `endpoint` and `query_params` are read without tracking when a request is
/// dispatched: changing them alone does not refetch, but the next request uses
/// their current values.
pub fn use_fetch(
    client: Rc<dyn HttpClient>,
    endpoint: impl Into<MaybeSignal<String>>,
    query_params: impl Into<MaybeSignal<QueryParams>>,
    search_trigger: impl Into<MaybeSignal<String>>,
) -> ReadSignal<ResponseState> {
    let endpoint = endpoint.into();
    let query_params = query_params.into();

    let state = create_rw_signal(ResponseState::default());
    let task = FetchTask::new(client, state);

    watch_trigger(search_trigger.into(), move || {
        match RequestConfig::new(endpoint.get_untracked(), query_params.get_untracked()) {
            Ok(request) => task.dispatch(request),
            Err(e) => log::error!("Not fetching: {e}"),
        }
    });

    state.read_only()
}
