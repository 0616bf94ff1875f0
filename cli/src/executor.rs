//! Executes request descriptors built by `fetch-core` with reqwest.
//!
//! Every HTTP status comes back as data for the classifier. Only failures
//! that leave no status (connect, DNS, timeout, unusable URL, body read) go
//! through `classify_transport_error`. Nothing is retried.

use std::time::Duration;

use fetch_core::{ApiError, FetchClient, FormState, HttpMethod, HttpRequest, HttpResponse, ResponseOutcome, Transition};

pub struct Executor {
    http: reqwest::Client,
    client: FetchClient,
}

impl Executor {
    pub fn new(client: FetchClient, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, client })
    }

    /// Drive `state` through one trigger/complete cycle.
    ///
    /// Returns the state unchanged if a request is already in flight, and the
    /// builder error if the form cannot be turned into a request.
    pub async fn fetch_once(&self, state: FormState) -> Result<FormState, ApiError> {
        let (state, transition) = state.begin_fetch(&self.client);
        match transition {
            Transition::Started(request) => {
                let outcome = self.execute(&request).await;
                Ok(state.complete(outcome))
            }
            Transition::Busy => Ok(state),
            Transition::Invalid(e) => Err(e),
        }
    }

    pub async fn execute(&self, request: &HttpRequest) -> ResponseOutcome {
        tracing::info!(method = request.method.as_str(), url = %request.url, "fetching");

        let response = match self.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "request failed before a status was received");
                return self.client.classify_transport_error(e);
            }
        };

        tracing::info!(status = response.status, bytes = response.body.len(), "response received");
        self.client.classify(&response)
    }

    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, reqwest::Error> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
        };
        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(HttpResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            body.to_vec(),
        ))
    }
}
