//! Scripted `Transport` double for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::client::ClinicClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ClinicApi, Transport};

pub const BASE_URL: &str = "http://localhost:8000";

/// Replays queued outcomes in order and records every request it sees.
/// Running out of outcomes is reported as a network failure.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: RefCell<VecDeque<Result<HttpResponse, String>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, status: u16, body: &str) {
        self.outcomes.borrow_mut().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
    }

    pub fn push_ok(&self, body: &str) {
        self.push(200, body);
    }

    pub fn push_network_error(&self, message: &str) {
        self.outcomes.borrow_mut().push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// Paths of the recorded requests with the base URL stripped.
    pub fn paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| r.path.trim_start_matches(BASE_URL).to_string())
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        match self.outcomes.borrow_mut().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ApiError::Network(message)),
            None => Err(ApiError::Network("no scripted response".to_string())),
        }
    }
}

pub fn api(transport: &ScriptedTransport) -> ClinicApi<&ScriptedTransport> {
    ClinicApi::new(ClinicClient::new(BASE_URL), transport)
}
