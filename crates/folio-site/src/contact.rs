//! Contact relay: validates the posted form and forwards it to EmailJS.

use std::time::Duration;

use folio_web::contact::{
    ContactField, ContactForm, ContactMessage, ERROR_MESSAGE, EmailTransport, FormStatus,
    TransportError,
};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::EmailJsConfig;
use crate::error::Result;

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// JSON reply for the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactReply {
    #[serde(skip)]
    pub http_status: u16,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<&'static str>,
}

impl ContactReply {
    fn sent() -> Self {
        Self {
            http_status: 200,
            status: "success",
            message: None,
            missing: None,
        }
    }

    fn failed() -> Self {
        Self {
            http_status: 502,
            status: "error",
            message: Some(ERROR_MESSAGE),
            missing: None,
        }
    }

    fn missing(field: ContactField) -> Self {
        Self {
            http_status: 400,
            status: "invalid",
            message: None,
            missing: Some(field.as_str()),
        }
    }
}

/// Run one submission through the form state machine.
pub fn relay<T: EmailTransport + ?Sized>(
    transport: &T,
    request: ContactRequest,
    now: Duration,
) -> ContactReply {
    let mut form = ContactForm::new();
    form.update(ContactField::Name, request.name);
    form.update(ContactField::Email, request.email);
    form.update(ContactField::Subject, request.subject);
    form.update(ContactField::Message, request.message);

    if let Some(field) = form.fields().first_missing() {
        tracing::info!(field = field.as_str(), "contact request missing field");
        return ContactReply::missing(field);
    }

    match form.submit_with(transport, now) {
        Ok(FormStatus::Success) => ContactReply::sent(),
        Ok(_) => ContactReply::failed(),
        Err(error) => {
            tracing::error!(%error, "contact form rejected submission");
            ContactReply::failed()
        }
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactMessage,
}

/// [`EmailTransport`] over the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsTransport {
    client: Client,
    config: EmailJsConfig,
}

impl EmailJsTransport {
    pub fn new(config: EmailJsConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, config })
    }

    fn payload<'a>(&'a self, message: &'a ContactMessage) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: message,
        }
    }
}

impl EmailTransport for EmailJsTransport {
    fn send(&self, message: &ContactMessage) -> std::result::Result<(), TransportError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .json(&self.payload(message))
            .send()
            .map_err(|error| TransportError::new(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let detail = response.text().unwrap_or_default();
        Err(TransportError::new(format!(
            "EmailJS returned {}: {}",
            status.as_u16(),
            detail.trim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    struct StubTransport {
        calls: Cell<usize>,
        fail: bool,
    }

    impl StubTransport {
        fn new(fail: bool) -> Self {
            Self {
                calls: Cell::new(0),
                fail,
            }
        }
    }

    impl EmailTransport for StubTransport {
        fn send(&self, _message: &ContactMessage) -> std::result::Result<(), TransportError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(TransportError::new("rejected"))
            } else {
                Ok(())
            }
        }
    }

    fn request() -> ContactRequest {
        ContactRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hi".into(),
            message: "Hello there".into(),
        }
    }

    #[test]
    fn successful_relay_replies_success() {
        let transport = StubTransport::new(false);
        let reply = relay(&transport, request(), Duration::ZERO);
        assert_eq!(reply.http_status, 200);
        assert_eq!(
            serde_json::to_value(&reply).expect("json"),
            json!({"status": "success"})
        );
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn transport_failure_replies_bad_gateway() {
        let transport = StubTransport::new(true);
        let reply = relay(&transport, request(), Duration::ZERO);
        assert_eq!(reply.http_status, 502);
        assert_eq!(
            serde_json::to_value(&reply).expect("json"),
            json!({"status": "error", "message": ERROR_MESSAGE})
        );
    }

    #[test]
    fn empty_field_is_rejected_before_sending() {
        let transport = StubTransport::new(false);
        let reply = relay(
            &transport,
            ContactRequest {
                email: String::new(),
                ..request()
            },
            Duration::ZERO,
        );
        assert_eq!(reply.http_status, 400);
        assert_eq!(reply.missing, Some("email"));
        assert_eq!(transport.calls.get(), 0);
    }

    #[test]
    fn whitespace_field_is_relayed_like_a_required_input() {
        let transport = StubTransport::new(false);
        let reply = relay(
            &transport,
            ContactRequest {
                subject: "   ".into(),
                ..request()
            },
            Duration::ZERO,
        );
        assert_eq!(reply.http_status, 200);
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn payload_uses_public_key_as_user_id() {
        let transport = EmailJsTransport::new(EmailJsConfig {
            service_id: "service_abc".into(),
            template_id: "template_xyz".into(),
            public_key: "pk_123".into(),
            api_url: "http://127.0.0.1:9/send".into(),
        })
        .expect("client");
        let message = folio_web::contact::ContactFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
        }
        .to_message();

        assert_eq!(
            serde_json::to_value(transport.payload(&message)).expect("json"),
            json!({
                "service_id": "service_abc",
                "template_id": "template_xyz",
                "user_id": "pk_123",
                "template_params": {
                    "user_name": "Ada",
                    "user_email": "ada@example.com",
                    "subject": "Hi",
                    "message": "Hello",
                    "from_name": "Ada",
                }
            })
        );
    }

    #[test]
    fn missing_fields_in_json_default_to_empty() {
        let parsed: ContactRequest =
            serde_json::from_str(r#"{"name":"Ada"}"#).expect("partial body");
        assert_eq!(parsed.email, "");
    }
}
