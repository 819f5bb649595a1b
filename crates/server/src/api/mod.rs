use serde_json::Value;
use shared::{
    domain::{scheduled_events, EventId, Operation, DELETE_ACTION, SLASH_COMMAND},
    error::CommandError,
    protocol::{ActionContext, Attachment, AttachmentAction, CommandResponse, Integration},
};

use crate::extract::{CommandPayload, FormFields, FormValue};

pub const LIST_HEADING: &str = "### Scheduled Events";
pub const GENERIC_DELETE_ACK: &str = "Deleted the scheduled message.";

#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Where the chat client posts delete-button callbacks.
    pub integration_url: String,
}

pub fn monitor_route() -> &'static str {
    "/monitor"
}

pub fn schedule_route() -> &'static str {
    "/schedule"
}

pub fn dispatch(
    ctx: &CommandContext,
    payload: &CommandPayload,
) -> Result<CommandResponse, CommandError> {
    match payload {
        CommandPayload::Form(fields) => route_form_command(ctx, fields),
        CommandPayload::Json(body) => {
            let id = validate_json_command(body)?;
            Ok(handle_delete(Some(id)))
        }
    }
}

pub fn validate_form_command(fields: &FormFields) -> Result<&FormFields, CommandError> {
    let command = fields
        .get("command")
        .ok_or(CommandError::MissingField("command"))?;
    if command.as_text() != SLASH_COMMAND {
        return Err(CommandError::InvalidCommand(command.as_text().to_string()));
    }
    Ok(fields)
}

pub fn route_form_command(
    ctx: &CommandContext,
    fields: &FormFields,
) -> Result<CommandResponse, CommandError> {
    let fields = validate_form_command(fields)?;
    let text = fields
        .get("text")
        .map(FormValue::as_text)
        .unwrap_or_default();
    match Operation::parse(text) {
        Some(Operation::List) => Ok(handle_list(ctx)),
        Some(Operation::Delete) => Ok(handle_delete(None)),
        None => Err(CommandError::UnknownOperation {
            available: Operation::AVAILABLE,
        }),
    }
}

/// Checks run in a fixed order and the first failure is reported.
pub fn validate_json_command(body: &Value) -> Result<EventId, CommandError> {
    let context = body
        .get("context")
        .ok_or(CommandError::MissingField("context"))?;
    let context = context.as_object().ok_or(CommandError::TypeMismatch {
        field: "context",
        expected: "an object",
    })?;

    let action = context
        .get("action")
        .ok_or(CommandError::MissingField("action"))?;
    if action.as_str() != Some(DELETE_ACTION) {
        return Err(CommandError::InvalidAction(display_value(action)));
    }

    let id = context.get("id").ok_or(CommandError::MissingField("id"))?;
    parse_event_id(id)
}

fn parse_event_id(value: &Value) -> Result<EventId, CommandError> {
    let parsed = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(id) if id > 0 => Ok(EventId(id)),
        _ => Err(CommandError::InvalidId(display_value(value))),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub fn handle_list(ctx: &CommandContext) -> CommandResponse {
    let attachments = scheduled_events()
        .iter()
        .map(|event| build_attachment(&ctx.integration_url, event.label, event.title, event.id))
        .collect();
    CommandResponse::with_attachments(LIST_HEADING, attachments)
}

/// Acknowledges a delete. The schedule itself is never modified.
pub fn handle_delete(id: Option<EventId>) -> CommandResponse {
    match id {
        Some(id) => CommandResponse::ephemeral(format!("Deleted scheduled message {id}.")),
        None => CommandResponse::text(GENERIC_DELETE_ACK),
    }
}

pub fn build_attachment(
    integration_url: &str,
    pretext: &str,
    text: &str,
    id: EventId,
) -> Attachment {
    Attachment {
        pretext: pretext.to_string(),
        text: text.to_string(),
        actions: vec![AttachmentAction {
            id: DELETE_ACTION.to_string(),
            name: "Delete".to_string(),
            integration: Integration {
                url: integration_url.to_string(),
                context: ActionContext::delete(id),
            },
        }],
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
