//! Executing requests, and the typed API built on top.
//!
//! # Design
//! `Transport` is the only I/O seam in the crate. `UreqTransport` talks to
//! the real server; tests substitute a scripted double. `ClinicApi` pairs a
//! `ClinicClient` with a transport so controllers can issue one call per
//! user action without knowing about request building.
//!
//! Calls are blocking. A UI host runs each user action on a background
//! task; there is no cancellation, de-duplication, or retry.

use tracing::{debug, warn};
use ureq::typestate::WithBody;

use crate::client::ClinicClient;
use crate::config::ClientConfig;
use crate::entity::Entity;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    LoginRequest, LoginResponse, MedCenterInfo, Polyclinic, RecordId, UserInfo,
};

/// Performs one HTTP round-trip. Non-2xx statuses are returned as data;
/// only failures to obtain a response are errors.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout())
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = &self.agent;
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;
        let result = match method {
            HttpMethod::Get => with_headers(agent.get(&path), &headers).call(),
            HttpMethod::Delete => with_headers(agent.delete(&path), &headers).call(),
            HttpMethod::Post => send(with_headers(agent.post(&path), &headers), body),
            HttpMethod::Put => send(with_headers(agent.put(&path), &headers), body),
        };
        let mut response = result.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    builder
}

fn send(
    builder: ureq::RequestBuilder<WithBody>,
    body: Option<String>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

/// Typed clinic API: build, execute, parse.
#[derive(Debug, Clone)]
pub struct ClinicApi<T> {
    client: ClinicClient,
    transport: T,
}

impl ClinicApi<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(ClinicClient::new(config.base_url()), UreqTransport::new(config))
    }
}

impl<T: Transport> ClinicApi<T> {
    pub fn new(client: ClinicClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ClinicClient {
        &self.client
    }

    fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.as_str();
        let path = request.path.clone();
        debug!(method, path = %path, "sending request");
        match self.transport.execute(request) {
            Ok(response) => {
                debug!(method, path = %path, status = response.status, "received response");
                Ok(response)
            }
            Err(e) => {
                warn!(method, path = %path, error = %e, "request failed");
                Err(e)
            }
        }
    }

    pub fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = self.client.build_login(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        self.client.parse_login(self.exchange(request)?)
    }

    pub fn user_info(&self, db_id: &str) -> Result<UserInfo, ApiError> {
        let request = self.client.build_user_info(db_id);
        self.client.parse_user_info(self.exchange(request)?)
    }

    pub fn med_center_info(&self, center_id: &str) -> Result<MedCenterInfo, ApiError> {
        let request = self.client.build_med_center_info(center_id);
        self.client.parse_med_center_info(self.exchange(request)?)
    }

    pub fn polyclinics(&self) -> Result<Vec<Polyclinic>, ApiError> {
        let request = self.client.build_list_polyclinics();
        self.client.parse_list_polyclinics(self.exchange(request)?)
    }

    pub fn list<E: Entity>(&self) -> Result<Vec<E>, ApiError> {
        let request = self.client.build_list::<E>();
        self.client.parse_list(self.exchange(request)?)
    }

    /// Create or update depending on whether `record` was ever persisted.
    pub fn save<E: Entity>(&self, record: &E) -> Result<(), ApiError> {
        let request = self.client.build_save(record)?;
        self.client.parse_mutation(self.exchange(request)?)
    }

    pub fn delete<E: Entity>(&self, id: RecordId) -> Result<(), ApiError> {
        let request = self.client.build_delete::<E>(id);
        self.client.parse_mutation(self.exchange(request)?)
    }
}
