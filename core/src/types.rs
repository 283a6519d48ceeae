//! Wire DTOs for the clinic API.
//!
//! # Design
//! These types mirror the server's JSON schema field-for-field, including
//! its naming (`id_center`, `center_number`, ...). They are defined
//! independently from the mock-server crate; integration tests catch schema
//! drift between the two.

use serde::{Deserialize, Serialize};

/// Numeric record identifier as assigned by the server.
pub type RecordId = i64;

/// Identifier carried by a record that has never been persisted.
pub const NEW_RECORD_ID: RecordId = 0;

/// A medical center managed by the super-admin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalCenter {
    pub id_center: RecordId,
    pub center_name: String,
    pub center_description: String,
    pub center_address: String,
    pub center_number: String,
}

/// A center administrator. `center_name` is a cached copy of the parent
/// center's display name, kept alongside `med_center_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Administrator {
    pub id: RecordId,
    pub full_name: String,
    pub email: String,
    pub center_name: String,
    pub password: String,
    pub address: String,
    pub med_center_id: RecordId,
}

/// A center's main doctor. The server may send `null` for the name, email
/// and password columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: RecordId,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub center_name: String,
    pub password: Option<String>,
    pub address: String,
    pub med_center_id: RecordId,
}

/// Dropdown option for a parent medical center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polyclinic {
    pub id_center: RecordId,
    pub center_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub role: String,
    pub db_id: String,
    pub full_name: String,
    pub center_name: String,
}

/// Profile lookup by the `db_id` returned from login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub full_name: String,
    pub med_center_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedCenterInfo {
    pub center_name: String,
}
