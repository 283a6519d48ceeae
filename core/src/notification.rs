//! Transient user-visible messages shown after a user action.

use crate::error::{ApiError, Failure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(failure: Failure, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure(failure),
            message: message.into(),
        }
    }

    /// Failure notice whose wording depends on how `error` failed.
    pub fn from_error(context: &str, error: &ApiError) -> Self {
        let failure = error.failure();
        let message = match failure {
            Failure::Network => format!("{context}: network error, check your connection"),
            _ => format!("{context}: {error}"),
        };
        Self::failure(failure, message)
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Notices produced by one mutating action: the action's own result, plus a
/// failed reload of the list that followed a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Notification,
    pub reload_failure: Option<Notification>,
}

impl Outcome {
    pub fn new(notice: Notification) -> Self {
        Self {
            notice,
            reload_failure: None,
        }
    }

    pub fn with_reload_failure(mut self, reload_failure: Option<Notification>) -> Self {
        self.reload_failure = reload_failure;
        self
    }

    /// Whether the action itself succeeded. A failed reload does not undo it.
    pub fn is_success(&self) -> bool {
        self.notice.is_success()
    }

    /// Every notice to show, in display order.
    pub fn notices(&self) -> impl Iterator<Item = &Notification> {
        std::iter::once(&self.notice).chain(self.reload_failure.iter())
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.notice.message)?;
        if let Some(failure) = &self.reload_failure {
            write!(f, "; {}", failure.message)?;
        }
        Ok(())
    }
}
