//! HTTP client types for the upstream commerce API.
//!
//! This module provides the foundational HTTP layer: authenticated requests,
//! a hard per-attempt timeout, failure classification, retry with
//! exponential backoff, and recording of authentication and timeout
//! failures.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A successful response, with pagination totals
//! - [`ParsedBody`]: Explicit result of parsing a response body
//! - [`ApiError`] / [`ErrorKind`]: A classified failure
//! - [`RetryPolicy`]: Pure retry decision from classification and attempt
//! - [`FailureRecorder`]: Observability sink for auth failures and timeouts
//! - [`rest::RestClient`]: Higher-level REST API client
//!
//! # Retry Behavior
//!
//! - **Network errors, timeouts and 5xx**: retried with a delay of
//!   `base * 2^(attempt - 1)`, at most [`MAX_TRIES`](crate::config::MAX_TRIES)
//!   attempts in total
//! - **401, other 4xx and unparseable bodies**: returned immediately
//!
//! The default attempt count comes from
//! [`StoreConfig::max_tries`](crate::StoreConfig::max_tries) and can be
//! overridden per request with [`HttpRequestBuilder::tries`].

mod classify;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod observability;
pub mod rest;
mod retry;

pub use classify::{
    classify_invalid_success, classify_response, classify_status, classify_timeout,
    classify_transport,
};
pub use errors::{
    ApiError, ErrorKind, HttpError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{CacheHint, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{
    ErrorData, ErrorPayload, HttpResponse, ParsedBody, TOTAL_HEADER, TOTAL_PAGES_HEADER,
};
pub use observability::{FailureEvent, FailureRecorder, MAX_RECORDED_EVENTS};
pub use retry::{RetryDecision, RetryPolicy};

// Re-export REST client types at the clients module level
pub use rest::{RestClient, RestError};
