//! Login and role dispatch.
//!
//! # Design
//! Login is a one-shot exchange; no token or expiry is kept. The role string
//! picks the destination and an unrecognized role is an error, never a
//! default route. Screens that need the numeric id of the signed-in admin's
//! center re-derive it from the center name through the polyclinics list
//! (`resolve_center`), since login only returns the name.

use std::str::FromStr;

use tracing::{info, warn};

use crate::error::SessionError;
use crate::notification::Notification;
use crate::transport::{ClinicApi, Transport};
use crate::types::{LoginResponse, Polyclinic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    SuperAdmin,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "sudo-admin",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sudo-admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            other => Err(SessionError::UnknownRole(other.to_string())),
        }
    }
}

/// Navigation targets offered from a role's home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    MedicalCenters,
    Administrators,
    MainDoctors,
    Reports,
    Doctors,
    Logout,
}

const SUPER_ADMIN_SCREENS: &[Screen] = &[
    Screen::Home,
    Screen::MedicalCenters,
    Screen::Administrators,
    Screen::MainDoctors,
    Screen::Reports,
    Screen::Logout,
];

const ADMIN_SCREENS: &[Screen] = &[Screen::Home, Screen::Doctors, Screen::Logout];

/// Where a successful login lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    SuperAdminHome,
    AdminHome { full_name: String, center_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub role: Role,
    pub db_id: String,
    pub display_name: String,
    pub center_name: String,
}

impl Session {
    pub fn from_login(response: LoginResponse) -> Result<Self, SessionError> {
        let role = response.role.parse()?;
        Ok(Self {
            role,
            db_id: response.db_id,
            display_name: response.full_name,
            center_name: response.center_name,
        })
    }

    pub fn destination(&self) -> Destination {
        match self.role {
            Role::SuperAdmin => Destination::SuperAdminHome,
            Role::Admin => Destination::AdminHome {
                full_name: self.display_name.clone(),
                center_name: self.center_name.clone(),
            },
        }
    }

    pub fn navigation(&self) -> &'static [Screen] {
        match self.role {
            Role::SuperAdmin => SUPER_ADMIN_SCREENS,
            Role::Admin => ADMIN_SCREENS,
        }
    }

    /// Looks the session's center up by name. Called on every screen entry
    /// that needs it; the result is not cached on the session.
    pub fn resolve_center<T: Transport>(&self, api: &ClinicApi<T>) -> Result<Polyclinic, SessionError> {
        api.polyclinics()?
            .into_iter()
            .find(|c| c.center_name == self.center_name)
            .ok_or_else(|| SessionError::CenterNotFound(self.center_name.clone()))
    }
}

/// Checks the shape of a login email: `local@domain.tld`, where the local
/// part uses letters, digits and `+._%-`, and every domain label uses
/// letters, digits and `-` without a leading `-`.
pub fn validate_email(email: &str) -> Result<(), SessionError> {
    if email.trim().is_empty() {
        return Err(SessionError::InvalidEmail("email cannot be empty".into()));
    }
    let invalid = || SessionError::InvalidEmail("invalid email format".into());

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let local_ok = !local.is_empty()
        && local.len() <= 256
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "+._%-".contains(c));
    if !local_ok {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let domain_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            label.len() <= 64
                && label.starts_with(|c: char| c.is_ascii_alphanumeric())
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    if !domain_ok {
        return Err(invalid());
    }
    Ok(())
}

/// Validates `email`, then performs the login exchange. Nothing is sent
/// when the email is rejected.
pub fn login<T: Transport>(
    api: &ClinicApi<T>,
    email: &str,
    password: &str,
) -> Result<Session, SessionError> {
    validate_email(email)?;
    let response = api.login(email, password)?;
    match Session::from_login(response) {
        Ok(session) => {
            info!(role = session.role.as_str(), db_id = %session.db_id, "signed in");
            Ok(session)
        }
        Err(e) => {
            warn!(error = %e, "login returned a role with no destination");
            Err(e)
        }
    }
}

/// User-visible outcome of a login attempt.
pub fn login_notification(result: &Result<Session, SessionError>) -> Notification {
    match result {
        Ok(session) => Notification::success(format!("Signed in as {}", session.display_name)),
        Err(SessionError::Api(e)) => Notification::from_error("Sign-in failed", e),
        Err(e) => Notification::failure(e.failure(), e.to_string()),
    }
}
