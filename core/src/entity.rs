//! The `Entity` trait: what the generic CRUD-list component needs to know
//! about one record kind.
//!
//! # Design
//! Every managed kind (medical centers, administrators, main doctors) goes
//! through the same store, search, dialog and delete code. The differences
//! are captured here as data: the endpoint set, the editable fields in form
//! order, the fields that search matches against, and whether the record
//! binds to a parent medical center chosen from the polyclinics dropdown.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DialogError;
use crate::types::{Administrator, Doctor, MedicalCenter, Polyclinic, RecordId, NEW_RECORD_ID};

/// Paths used for one entity kind. `update` and `delete` are prefixes; the
/// record id is appended as the last segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub list: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
    /// Human-readable singular noun used in notifications.
    pub noun: &'static str,
    /// Plural noun used in list-level notifications.
    pub plural: &'static str,
}

/// One editable text field of a record, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
}

const fn field(name: &'static str, label: &'static str) -> Field {
    Field { name, label }
}

pub trait Entity: Clone + Debug + PartialEq + Serialize + DeserializeOwned {
    const ENDPOINTS: Endpoints;

    /// Fields a dialog exposes through `set_field`. Anything else on the
    /// record is carried through a save untouched.
    const FIELDS: &'static [Field];

    /// Whether the record references a parent medical center.
    const HAS_PARENT_CENTER: bool = false;

    /// A record with `id == NEW_RECORD_ID` and empty fields.
    fn blank() -> Self;

    fn id(&self) -> RecordId;

    fn set_id(&mut self, id: RecordId);

    /// Name shown in notifications ("Doctor Petrov added").
    fn display_name(&self) -> &str;

    /// Fields matched by the search filter, in display order.
    fn search_fields(&self) -> Vec<&str>;

    fn field(&self, name: &str) -> Option<&str>;

    fn set_field(&mut self, name: &str, value: String) -> Result<(), DialogError>;

    fn parent_center(&self) -> Option<RecordId> {
        None
    }

    /// Cached display name of the parent center, if the kind has one.
    fn parent_center_name(&self) -> Option<&str> {
        None
    }

    /// Binds the record to `center`, updating the id and the cached name.
    /// Returns `false` for kinds without a parent.
    fn assign_parent_center(&mut self, _center: &Polyclinic) -> bool {
        false
    }

    fn is_new(&self) -> bool {
        self.id() == NEW_RECORD_ID
    }
}

fn unknown(name: &str) -> DialogError {
    DialogError::UnknownField(name.to_string())
}

impl Entity for MedicalCenter {
    const ENDPOINTS: Endpoints = Endpoints {
        list: "/med-centers",
        create: "/add-med-center",
        update: "/update-med-center",
        delete: "/delete-med-center",
        noun: "Medical center",
        plural: "medical centers",
    };

    const FIELDS: &'static [Field] = &[
        field("center_name", "Name"),
        field("center_description", "Description"),
        field("center_address", "Address"),
        field("center_number", "Phone number"),
    ];

    fn blank() -> Self {
        Self::default()
    }

    fn id(&self) -> RecordId {
        self.id_center
    }

    fn set_id(&mut self, id: RecordId) {
        self.id_center = id;
    }

    fn display_name(&self) -> &str {
        &self.center_name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.center_name.as_str(),
            self.center_address.as_str(),
            self.center_description.as_str(),
            self.center_number.as_str(),
        ]
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "center_name" => Some(self.center_name.as_str()),
            "center_description" => Some(self.center_description.as_str()),
            "center_address" => Some(self.center_address.as_str()),
            "center_number" => Some(self.center_number.as_str()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> Result<(), DialogError> {
        match name {
            "center_name" => self.center_name = value,
            "center_description" => self.center_description = value,
            "center_address" => self.center_address = value,
            "center_number" => self.center_number = value,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }
}

impl Entity for Administrator {
    const ENDPOINTS: Endpoints = Endpoints {
        list: "/admins",
        create: "/add-admin",
        update: "/update-admin",
        delete: "/delete-admin",
        noun: "Administrator",
        plural: "administrators",
    };

    const FIELDS: &'static [Field] = &[
        field("full_name", "Full name"),
        field("email", "Email"),
        field("password", "Password"),
        field("address", "Address"),
    ];

    const HAS_PARENT_CENTER: bool = true;

    fn blank() -> Self {
        Self::default()
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.full_name.as_str(),
            self.email.as_str(),
            self.center_name.as_str(),
        ]
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "full_name" => Some(self.full_name.as_str()),
            "email" => Some(self.email.as_str()),
            "password" => Some(self.password.as_str()),
            "address" => Some(self.address.as_str()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> Result<(), DialogError> {
        match name {
            "full_name" => self.full_name = value,
            "email" => self.email = value,
            "password" => self.password = value,
            "address" => self.address = value,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }

    fn parent_center(&self) -> Option<RecordId> {
        Some(self.med_center_id)
    }

    fn parent_center_name(&self) -> Option<&str> {
        Some(self.center_name.as_str())
    }

    fn assign_parent_center(&mut self, center: &Polyclinic) -> bool {
        self.med_center_id = center.id_center;
        self.center_name = center.center_name.clone();
        true
    }
}

impl Entity for Doctor {
    const ENDPOINTS: Endpoints = Endpoints {
        list: "/main-doctors",
        create: "/add-doctor",
        update: "/update-doctor",
        delete: "/delete-doctor",
        noun: "Doctor",
        plural: "doctors",
    };

    const FIELDS: &'static [Field] = &[
        field("full_name", "Full name"),
        field("email", "Email"),
        field("password", "Password"),
        field("address", "Address"),
    ];

    const HAS_PARENT_CENTER: bool = true;

    fn blank() -> Self {
        Self::default()
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("")
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.full_name.as_deref().unwrap_or(""),
            self.email.as_deref().unwrap_or(""),
            self.center_name.as_str(),
        ]
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "full_name" => Some(self.full_name.as_deref().unwrap_or("")),
            "email" => Some(self.email.as_deref().unwrap_or("")),
            "password" => Some(self.password.as_deref().unwrap_or("")),
            "address" => Some(self.address.as_str()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> Result<(), DialogError> {
        match name {
            "full_name" => self.full_name = Some(value),
            "email" => self.email = Some(value),
            "password" => self.password = Some(value),
            "address" => self.address = value,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }

    fn parent_center(&self) -> Option<RecordId> {
        Some(self.med_center_id)
    }

    fn parent_center_name(&self) -> Option<&str> {
        Some(self.center_name.as_str())
    }

    fn assign_parent_center(&mut self, center: &Polyclinic) -> bool {
        self.med_center_id = center.id_center;
        self.center_name = center.center_name.clone();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_records_are_new() {
        assert!(MedicalCenter::blank().is_new());
        assert!(Administrator::blank().is_new());
        assert!(Doctor::blank().is_new());
    }

    #[test]
    fn every_declared_field_is_settable_and_readable() {
        let mut doctor = Doctor::blank();
        for f in Doctor::FIELDS {
            doctor.set_field(f.name, format!("v-{}", f.name)).unwrap();
            assert_eq!(doctor.field(f.name), Some(format!("v-{}", f.name).as_str()));
        }
        let mut center = MedicalCenter::blank();
        for f in MedicalCenter::FIELDS {
            center.set_field(f.name, "x".to_string()).unwrap();
            assert_eq!(center.field(f.name), Some("x"));
        }
    }

    #[test]
    fn parent_binding_is_not_a_plain_field() {
        let mut admin = Administrator::blank();
        let err = admin.set_field("med_center_id", "3".to_string()).unwrap_err();
        assert_eq!(err, DialogError::UnknownField("med_center_id".to_string()));
    }

    #[test]
    fn assign_parent_center_updates_id_and_cached_name() {
        let mut doctor = Doctor::blank();
        let center = Polyclinic {
            id_center: 2,
            center_name: "LODE".to_string(),
        };
        assert!(doctor.assign_parent_center(&center));
        assert_eq!(doctor.med_center_id, 2);
        assert_eq!(doctor.center_name, "LODE");

        let mut clinic = MedicalCenter::blank();
        assert!(!clinic.assign_parent_center(&center));
    }

    #[test]
    fn doctor_with_null_columns_searches_as_empty() {
        let doctor: Doctor = serde_json::from_str(
            r#"{"id":1,"full_name":null,"email":null,"center_name":"LODE","password":null,"address":"","med_center_id":2}"#,
        )
        .unwrap();
        assert_eq!(doctor.search_fields(), vec!["", "", "LODE"]);
        assert_eq!(doctor.display_name(), "");
    }
}
