use leptos::*;
use leptos_fetcher::*;
use serde_json::{json, Value};
use std::rc::Rc;

fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <Render /> })
}

#[component]
fn render() -> impl IntoView {
    let (search, set_search) = create_signal(String::new());

    let config = ClientConfig::default()
        .with_base_url("https://jsonplaceholder.typicode.com")
        .with_header("accept", "application/json");
    let client: Rc<dyn HttpClient> = match ReqwestClient::from_config(&config) {
        Ok(client) => Rc::new(client),
        Err(e) => {
            log::error!("Falling back to a plain client: {e}");
            Rc::new(ReqwestClient::new())
        }
    };

    // read when the search changes, so the query always matches the trigger
    let params = Signal::derive(move || {
        QueryParams::from([
            ("title_like".to_string(), json!(search.get())),
            ("_limit".to_string(), json!(10)),
        ])
    });

    view! {
        <main>
            <h1>Posts</h1>
                <p>
                Search post titles on jsonplaceholder
                </p>

            <label>Title:</label>
            <input type="text"
            on:input=move |ev| set_search.set(event_target_value(&ev))
            prop:value=search
            />

            <Fetcher
                endpoint="/posts"
                client=client
                query_params=params
                loading_label="posts"
                search_trigger=search
                render=|state: ResponseState| view! { <Posts state /> }
            />
        </main>
    }
}

#[component]
fn posts(state: ResponseState) -> impl IntoView {
    let titles = state
        .as_array()
        .map(|posts| {
            posts
                .iter()
                .filter_map(|post| post.get("title").and_then(Value::as_str))
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    if titles.is_empty() {
        return view! { <p>"No posts"</p> }.into_view();
    }

    view! {
        <ul>
            {titles.into_iter().map(|title| view! { <li>{title}</li> }).collect_view()}
        </ul>
    }
    .into_view()
}
