//! Client core for the clinic-management platform.
//!
//! # Overview
//! Typed access to the clinic REST API plus the screen-level controllers
//! shared by every management screen: a per-screen record store, a
//! client-side search filter, an add/edit dialog, a delete confirmation
//! prompt, and the login session that decides which screens a user sees.
//!
//! # Design
//! - `ClinicClient` is stateless; it builds `HttpRequest` values and parses
//!   `HttpResponse` values. A `Transport` executes them, so the core can be
//!   driven by `UreqTransport` in production and by doubles in tests.
//! - Medical centers, administrators and doctors share one generic
//!   implementation through the `Entity` trait.
//! - API failures never escape a user action; controllers turn them into a
//!   `Notification` and leave the screen usable.

pub mod client;
pub mod config;
pub mod delete;
pub mod dialog;
pub mod entity;
pub mod error;
pub mod http;
pub mod notification;
pub mod screen;
pub mod search;
pub mod session;
pub mod store;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::ClinicClient;
pub use config::ClientConfig;
pub use delete::{DeleteConfirmation, DeleteState};
pub use dialog::{CrudDialog, DialogState, Draft};
pub use entity::{Endpoints, Entity, Field};
pub use error::{ApiError, ConfigError, DialogError, Failure, SessionError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notification::{Notification, NotificationKind, Outcome};
pub use screen::CrudScreen;
pub use search::{filter, ListView};
pub use session::{
    login, login_notification, validate_email, Destination, Role, Screen, Session,
};
pub use store::EntityStore;
pub use transport::{ClinicApi, Transport, UreqTransport};
pub use types::{
    Administrator, Doctor, LoginRequest, LoginResponse, MedCenterInfo, MedicalCenter, Polyclinic,
    RecordId, UserInfo, NEW_RECORD_ID,
};
