use serde::{Deserialize, Serialize};

use crate::{
    domain::{EventId, DELETE_ACTION},
    error::CommandError,
};

/// Body returned to the chat platform for every command request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl CommandResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ephemeral_text: None,
            attachments: None,
        }
    }

    pub fn ephemeral(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            ephemeral_text: Some(text.clone()),
            text,
            attachments: None,
        }
    }

    pub fn with_attachments(text: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            text: text.into(),
            ephemeral_text: None,
            attachments: Some(attachments),
        }
    }

    pub fn error(err: &CommandError) -> Self {
        Self::text(format!("Error: {err}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub pretext: String,
    pub text: String,
    pub actions: Vec<AttachmentAction>,
}

/// Interactive button; the platform posts `integration.context` back to
/// `integration.url` when it is pressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentAction {
    pub id: String,
    pub name: String,
    pub integration: Integration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Integration {
    pub url: String,
    pub context: ActionContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionContext {
    pub action: String,
    pub id: EventId,
}

impl ActionContext {
    pub fn delete(id: EventId) -> Self {
        Self {
            action: DELETE_ACTION.to_string(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_text_response_omits_optional_fields() {
        let value = serde_json::to_value(CommandResponse::text("hello")).expect("json");
        assert_eq!(value, json!({ "text": "hello" }));
    }

    #[test]
    fn action_context_serializes_id_as_number() {
        let action = AttachmentAction {
            id: "delete".into(),
            name: "Delete".into(),
            integration: Integration {
                url: "http://localhost:8001".into(),
                context: ActionContext::delete(EventId(3)),
            },
        };
        let value = serde_json::to_value(action).expect("json");
        assert_eq!(value["integration"]["context"], json!({ "action": "delete", "id": 3 }));
    }
}
