//! Executes the requests the core hands out, over blocking ureq.

use std::time::Duration;

use catalog_core::{ApiError, Completion, HttpMethod, HttpRequest, HttpResponse};
use ureq::Agent;

/// Build an agent that returns 4xx/5xx responses as data instead of `Err`,
/// letting the core interpret the status.
pub fn agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

/// Perform one round-trip. Transport failures become `ApiError::Transport`.
pub fn execute(agent: &Agent, req: HttpRequest) -> Completion {
    tracing::debug!(method = %req.method, path = %req.path, "executing request");

    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => agent
            .patch(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    tracing::debug!(status, "response received");

    Ok(HttpResponse::new(status, body))
}
