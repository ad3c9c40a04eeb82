use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Relay reply as in-process code sees it: a real sum type. The wire keeps
/// the `success`-discriminated JSON object the widget understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireEnvelope", try_from = "WireEnvelope")]
pub enum Envelope {
    Success { message: String, usage: Value },
    Failure { error: String, details: Option<String> },
}

impl Envelope {
    pub fn failure(error: impl Into<String>) -> Envelope {
        Envelope::Failure {
            error: error.into(),
            details: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireEnvelope {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    usage: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl From<Envelope> for WireEnvelope {
    fn from(envelope: Envelope) -> WireEnvelope {
        match envelope {
            Envelope::Success { message, usage } => WireEnvelope {
                success: true,
                message: Some(message),
                usage: Some(usage),
                error: None,
                details: None,
            },
            Envelope::Failure { error, details } => WireEnvelope {
                success: false,
                message: None,
                usage: None,
                error: Some(error),
                details,
            },
        }
    }
}

impl TryFrom<WireEnvelope> for Envelope {
    type Error = String;

    fn try_from(wire: WireEnvelope) -> Result<Envelope, String> {
        if wire.success {
            let message = wire
                .message
                .ok_or_else(|| "success envelope without a message".to_string())?;
            Ok(Envelope::Success {
                message,
                usage: wire.usage.unwrap_or_else(|| json!({})),
            })
        } else {
            Ok(Envelope::Failure {
                error: wire
                    .error
                    .unwrap_or_else(|| "Failed to get response from AI assistant.".to_string()),
                details: wire.details,
            })
        }
    }
}
