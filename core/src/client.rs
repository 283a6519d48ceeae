//! Stateless HTTP request builder and response parser for the clinic API.
//!
//! # Design
//! `ClinicClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Entity CRUD is generic over `Entity`, so the three
//! managed kinds share one set of methods and differ only in their
//! `Endpoints`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::entity::Entity;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{LoginRequest, LoginResponse, MedCenterInfo, Polyclinic, RecordId, UserInfo};

/// Synchronous, stateless client for the clinic API.
#[derive(Debug, Clone)]
pub struct ClinicClient {
    base_url: String,
}

impl ClinicClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    // --- session ---

    pub fn build_login(&self, input: &LoginRequest) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, "/login", input)
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginResponse, ApiError> {
        parse_json(response)
    }

    pub fn build_user_info(&self, db_id: &str) -> HttpRequest {
        self.get(&format!("/user/{db_id}"))
    }

    pub fn parse_user_info(&self, response: HttpResponse) -> Result<UserInfo, ApiError> {
        parse_json(response)
    }

    pub fn build_med_center_info(&self, center_id: &str) -> HttpRequest {
        self.get(&format!("/med_center/{center_id}"))
    }

    pub fn parse_med_center_info(&self, response: HttpResponse) -> Result<MedCenterInfo, ApiError> {
        parse_json(response)
    }

    pub fn build_list_polyclinics(&self) -> HttpRequest {
        self.get("/polyclinics")
    }

    pub fn parse_list_polyclinics(&self, response: HttpResponse) -> Result<Vec<Polyclinic>, ApiError> {
        parse_json(response)
    }

    // --- entity CRUD ---

    pub fn build_list<E: Entity>(&self) -> HttpRequest {
        self.get(E::ENDPOINTS.list)
    }

    pub fn parse_list<E: Entity>(&self, response: HttpResponse) -> Result<Vec<E>, ApiError> {
        parse_json(response)
    }

    pub fn build_create<E: Entity>(&self, record: &E) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, E::ENDPOINTS.create, record)
    }

    pub fn build_update<E: Entity>(&self, id: RecordId, record: &E) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, &format!("{}/{id}", E::ENDPOINTS.update), record)
    }

    /// Create for an unpersisted record, update scoped to its id otherwise.
    pub fn build_save<E: Entity>(&self, record: &E) -> Result<HttpRequest, ApiError> {
        if record.is_new() {
            self.build_create(record)
        } else {
            self.build_update(record.id(), record)
        }
    }

    pub fn build_delete<E: Entity>(&self, id: RecordId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}{}/{id}", self.base_url, E::ENDPOINTS.delete),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Mutation endpoints answer with an opaque status; only success matters.
    pub fn parse_mutation(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response, 200)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(status_error(response))
}

fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(status_error(response))
}

fn status_error(response: &HttpResponse) -> ApiError {
    if response.status == 404 {
        return ApiError::NotFound;
    }
    ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Doctor, MedicalCenter};

    fn client() -> ClinicClient {
        ClinicClient::new("http://localhost:8000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn center(id: RecordId) -> MedicalCenter {
        MedicalCenter {
            id_center: id,
            center_name: "LODE".to_string(),
            center_description: "Diagnostics".to_string(),
            center_address: "Lenina 1".to_string(),
            center_number: "+375 17 000".to_string(),
        }
    }

    #[test]
    fn build_login_produces_json_post() {
        let req = client()
            .build_login(&LoginRequest {
                email: "a@b.com".to_string(),
                password: "x".to_string(),
            })
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/login");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["email"], "a@b.com");
        assert_eq!(body["password"], "x");
    }

    #[test]
    fn build_list_uses_entity_endpoint() {
        let req = client().build_list::<Doctor>();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/main-doctors");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_save_creates_new_records() {
        let req = client().build_save(&center(0)).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/add-med-center");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id_center"], 0);
        assert_eq!(body["center_name"], "LODE");
    }

    #[test]
    fn build_save_updates_persisted_records_by_id() {
        let req = client().build_save(&center(7)).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8000/update-med-center/7");
    }

    #[test]
    fn build_delete_scopes_to_id() {
        let req = client().build_delete::<MedicalCenter>(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8000/delete-med-center/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_info_requests() {
        assert_eq!(client().build_user_info("12").path, "http://localhost:8000/user/12");
        assert_eq!(
            client().build_med_center_info("4").path,
            "http://localhost:8000/med_center/4"
        );
        assert_eq!(client().build_list_polyclinics().path, "http://localhost:8000/polyclinics");
    }

    #[test]
    fn parse_login_success() {
        let login = client()
            .parse_login(response(
                200,
                r#"{"role":"admin","db_id":"4","full_name":"Ivanov","center_name":"LODE"}"#,
            ))
            .unwrap();
        assert_eq!(login.role, "admin");
        assert_eq!(login.full_name, "Ivanov");
    }

    #[test]
    fn parse_login_unauthorized() {
        let err = client().parse_login(response(401, "bad credentials")).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 401, .. }));
    }

    #[test]
    fn parse_list_success() {
        let centers = client()
            .parse_list::<MedicalCenter>(response(
                200,
                r#"[{"id_center":1,"center_name":"LODE","center_description":"","center_address":"","center_number":""}]"#,
            ))
            .unwrap();
        assert_eq!(centers.len(), 1);
        assert_eq!(centers[0].center_name, "LODE");
    }

    #[test]
    fn parse_list_bad_json() {
        let err = client()
            .parse_list::<MedicalCenter>(response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_mutation_accepts_any_2xx() {
        assert!(client().parse_mutation(response(200, "{}")).is_ok());
        assert!(client().parse_mutation(response(201, "")).is_ok());
        assert!(client().parse_mutation(response(204, "")).is_ok());
    }

    #[test]
    fn parse_mutation_not_found() {
        let err = client().parse_mutation(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_mutation_server_error() {
        let err = client().parse_mutation(response(500, "boom")).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
        assert_eq!(err.failure(), crate::error::Failure::Server);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ClinicClient::new("http://10.0.2.2:8000/");
        assert_eq!(client.build_list::<MedicalCenter>().path, "http://10.0.2.2:8000/med-centers");
    }
}
