//! A Leptos component that GETs JSON from an endpoint and hands the
//! loading/data state to a render callback.
//!
//! The request is issued on mount and re-issued whenever a search trigger
//! changes. The HTTP client is injected through the [`HttpClient`] trait;
//! [`ReqwestClient`] is the stock implementation.

mod client;
mod component;
mod config;
mod fetch;
mod state;

pub use client::{FetchError, HttpClient, ReqwestClient};
pub use component::{Fetcher, FetcherProps, LoadingLabel};
pub use config::{ClientConfig, ConfigError, QueryParams, RequestConfig};
pub use fetch::{use_fetch, watch_trigger, FetchTask};
pub use state::ResponseState;
