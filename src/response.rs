use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::processor::ErrorKind;

/// Uniform body returned by every invocation.
///
/// Serializes as `{"message": .., "code": .., "success": ..}` in that order. `code` is always
/// present and empty unless the caller supplied one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub message: String,
    pub code: String,
    pub success: bool,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: String::new(),
            success: true,
        }
    }

    pub fn error(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            success: false,
        }
    }

    pub fn to_payload(&self) -> String {
        self.render(serde_json::to_string)
            .unwrap_or_else(|fallback| fallback.payload)
    }

    /// Serializes with `serialize`. On failure the error carries a fallback body, which is
    /// still a well-formed envelope and always reports `success: false`.
    pub fn render<F>(&self, serialize: F) -> Result<String, Fallback>
    where
        F: FnOnce(&Envelope) -> Result<String, serde_json::Error>,
    {
        serialize(self).map_err(|err| {
            let kind = ErrorKind::SerializationFailure;
            error!(?kind, error = %err, "failed to serialize response envelope");
            let message = if self.success {
                format!("{err} BUT {} (NO COMMIT)", self.message)
            } else {
                format!("{err} AND {}", self.message)
            };
            let payload = json!({
                "message": message,
                "code": self.code,
                "success": false,
            })
            .to_string();
            Fallback { kind, payload }
        })
    }
}

/// Body produced when an envelope could not be serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub kind: ErrorKind,
    pub payload: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    /// Status code understood by the host.
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Error => 500,
        }
    }
}

/// What the host receives for one invocation: a status and the serialized envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub payload: String,
}

impl Response {
    pub fn success(message: impl Into<String>) -> Self {
        Self::from_envelope(&Envelope::success(message), serde_json::to_string)
    }

    pub fn error(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::from_envelope(&Envelope::error(message, code), serde_json::to_string)
    }

    /// A success envelope that fails to serialize is answered as an error.
    pub fn from_envelope<F>(envelope: &Envelope, serialize: F) -> Self
    where
        F: FnOnce(&Envelope) -> Result<String, serde_json::Error>,
    {
        match envelope.render(serialize) {
            Ok(payload) => Self {
                status: if envelope.success {
                    Status::Ok
                } else {
                    Status::Error
                },
                payload,
            },
            Err(fallback) => Self {
                status: Status::Error,
                payload: fallback.payload,
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn envelope(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.payload)
    }
}
