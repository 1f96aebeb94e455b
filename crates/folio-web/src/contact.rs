#![forbid(unsafe_code)]

//! Contact form state machine.
//!
//! The form moves `Idle -> Loading -> Success | Error` and drops back to
//! `Idle` once [`STATUS_RESET_AFTER`] has passed on the host clock. Fields
//! are cleared only after a successful send; a failed send keeps them so
//! the visitor can retry.
//!
//! Delivery goes through an [`EmailTransport`], so the same machine drives
//! the in-browser flow and the server-side relay.

use std::fmt;

use serde::Serialize;
use web_time::Duration;

/// How long a success or error status is shown before returning to idle.
pub const STATUS_RESET_AFTER: Duration = Duration::from_millis(4000);

/// Message shown while the form is in the error state.
pub const ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// The four user-editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    /// Whether every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .all(|value| value.is_empty())
    }

    /// Value of one field.
    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    /// First empty field. Every field is required; like an HTML `required`
    /// input, whitespace counts as a value.
    #[must_use]
    pub fn first_missing(&self) -> Option<ContactField> {
        ContactField::ALL
            .into_iter()
            .find(|&field| self.get(field).is_empty())
    }

    /// Template parameters for the mail provider.
    #[must_use]
    pub fn to_message(&self) -> ContactMessage {
        ContactMessage {
            user_name: self.name.clone(),
            user_email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            from_name: self.name.clone(),
        }
    }
}

/// Field selector for [`ContactForm::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Form input name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

/// Template parameters sent to the mail provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub user_name: String,
    pub user_email: String,
    pub subject: String,
    pub message: String,
    /// Mirrors `user_name`; the mail template addresses the sender by it.
    pub from_name: String,
}

/// Submission status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl FormStatus {
    /// Submit button label for this status.
    #[must_use]
    pub const fn button_label(self) -> &'static str {
        match self {
            Self::Loading => "Sending...",
            Self::Success => "Message Sent!",
            Self::Idle | Self::Error => "Send Message",
        }
    }

    /// Inline error text, shown only in the error state.
    #[must_use]
    pub const fn error_message(self) -> Option<&'static str> {
        match self {
            Self::Error => Some(ERROR_MESSAGE),
            _ => None,
        }
    }

    /// Submitting is only possible from idle.
    #[must_use]
    pub const fn accepts_submit(self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Mail delivery failure reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    detail: String,
}

impl TransportError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mail transport failed: {}", self.detail)
    }
}

impl std::error::Error for TransportError {}

/// Delivers a [`ContactMessage`].
pub trait EmailTransport {
    fn send(&self, message: &ContactMessage) -> Result<(), TransportError>;
}

impl<T: EmailTransport + ?Sized> EmailTransport for &T {
    fn send(&self, message: &ContactMessage) -> Result<(), TransportError> {
        (**self).send(message)
    }
}

/// Misuse of the form state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactError {
    /// A submit arrived while the form was not idle.
    NotIdle { status: FormStatus },
    /// A completion arrived with no submit in flight.
    NotSubmitting { status: FormStatus },
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotIdle { status } => write!(f, "cannot submit while form is {status:?}"),
            Self::NotSubmitting { status } => {
                write!(f, "no submission in flight (form is {status:?})")
            }
        }
    }
}

impl std::error::Error for ContactError {}

/// Contact form state.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    fields: ContactFields,
    status: FormStatus,
    completed_at: Option<Duration>,
    last_error: Option<TransportError>,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn fields(&self) -> &ContactFields {
        &self.fields
    }

    #[must_use]
    pub const fn status(&self) -> FormStatus {
        self.status
    }

    /// Failure from the most recent submission, kept until the next submit.
    #[must_use]
    pub const fn last_error(&self) -> Option<&TransportError> {
        self.last_error.as_ref()
    }

    /// Whether the submit button is disabled.
    #[must_use]
    pub const fn is_submit_disabled(&self) -> bool {
        !self.status.accepts_submit()
    }

    /// Replace one field's value.
    pub fn update(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.fields.name,
            ContactField::Email => &mut self.fields.email,
            ContactField::Subject => &mut self.fields.subject,
            ContactField::Message => &mut self.fields.message,
        };
        *slot = value.into();
    }

    /// Enter `Loading` and return the message to deliver.
    pub fn begin_submit(&mut self) -> Result<ContactMessage, ContactError> {
        if !self.status.accepts_submit() {
            return Err(ContactError::NotIdle {
                status: self.status,
            });
        }
        self.status = FormStatus::Loading;
        self.completed_at = None;
        self.last_error = None;
        Ok(self.fields.to_message())
    }

    /// Record the transport result at host time `now`.
    pub fn complete(
        &mut self,
        result: Result<(), TransportError>,
        now: Duration,
    ) -> Result<FormStatus, ContactError> {
        if self.status != FormStatus::Loading {
            return Err(ContactError::NotSubmitting {
                status: self.status,
            });
        }
        self.status = match result {
            Ok(()) => {
                self.fields = ContactFields::default();
                #[cfg(feature = "tracing")]
                tracing::info!("contact message sent");
                FormStatus::Success
            }
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::error!(%error, "contact message failed");
                self.last_error = Some(error);
                FormStatus::Error
            }
        };
        self.completed_at = Some(now);
        Ok(self.status)
    }

    /// Submit through `transport` synchronously, completing at `now`.
    pub fn submit_with<T: EmailTransport + ?Sized>(
        &mut self,
        transport: &T,
        now: Duration,
    ) -> Result<FormStatus, ContactError> {
        let message = self.begin_submit()?;
        self.complete(transport.send(&message), now)
    }

    /// Advance the host clock; success and error revert to idle after
    /// [`STATUS_RESET_AFTER`]. Returns `true` when the status changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(completed_at) = self.completed_at else {
            return false;
        };
        if now.saturating_sub(completed_at) < STATUS_RESET_AFTER {
            return false;
        }
        self.status = FormStatus::Idle;
        self.completed_at = None;
        true
    }
}
