use super::*;
use serde_json::json;
use shared::error::ErrorCode;

fn ctx() -> CommandContext {
    CommandContext {
        integration_url: "http://localhost:8001".into(),
    }
}

fn form(pairs: &[(&str, &str)]) -> FormFields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), FormValue::Text(v.to_string())))
        .collect()
}

#[test]
fn form_without_command_is_missing_field() {
    let err = validate_form_command(&form(&[("text", "list")])).expect_err("should fail");
    assert_eq!(err, CommandError::MissingField("command"));
}

#[test]
fn form_with_other_command_names_it() {
    let err = validate_form_command(&form(&[("command", "/remind")])).expect_err("should fail");
    assert_eq!(err.code(), ErrorCode::InvalidCommand);
    assert!(err.to_string().contains("/remind"));
}

#[test]
fn valid_form_is_returned_unchanged() {
    let fields = form(&[("command", "/schedule"), ("text", "anything"), ("user_id", "u1")]);
    let validated = validate_form_command(&fields).expect("valid");
    assert_eq!(validated, &fields);
}

#[test]
fn text_is_trimmed_before_routing() {
    let response =
        route_form_command(&ctx(), &form(&[("command", "/schedule"), ("text", "  list\n")]))
            .expect("list");
    assert_eq!(response.text, LIST_HEADING);
}

#[test]
fn empty_or_unknown_operation_is_rejected() {
    for fields in [
        form(&[("command", "/schedule")]),
        form(&[("command", "/schedule"), ("text", "")]),
        form(&[("command", "/schedule"), ("text", "add lunch")]),
    ] {
        let err = route_form_command(&ctx(), &fields).expect_err("should fail");
        assert_eq!(
            format!("Error: {err}"),
            "Error: Unknown operation. Available operations: list, delete"
        );
    }
}

#[test]
fn form_delete_is_generic_acknowledgement() {
    let response = route_form_command(
        &ctx(),
        &form(&[("command", "/schedule"), ("text", "delete"), ("id", "2")]),
    )
    .expect("delete");
    assert_eq!(response, CommandResponse::text(GENERIC_DELETE_ACK));
}

#[test]
fn list_builds_one_attachment_per_event() {
    let response = handle_list(&ctx());
    let attachments = response.attachments.expect("attachments");
    assert_eq!(attachments.len(), 3);

    let ids: Vec<i64> = attachments
        .iter()
        .map(|a| a.actions[0].integration.context.id.0)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(attachments[1].pretext, "2024-02-21 2:30 PM");
    assert_eq!(attachments[1].text, "Project Review");
    assert!(attachments
        .iter()
        .all(|a| a.actions.len() == 1 && a.actions[0].integration.context.action == "delete"));
}

#[test]
fn attachment_embeds_callback_target() {
    let attachment = build_attachment("http://hooks.local/cb", "tomorrow", "Standup", EventId(9));
    let action = &attachment.actions[0];
    assert_eq!(action.id, "delete");
    assert_eq!(action.name, "Delete");
    assert_eq!(action.integration.url, "http://hooks.local/cb");
    assert_eq!(action.integration.context, ActionContext::delete(EventId(9)));
}

#[test]
fn json_validation_reports_first_failure() {
    let cases = [
        (json!({}), ErrorCode::MissingField),
        (json!([1, 2]), ErrorCode::MissingField),
        (json!({ "context": "delete" }), ErrorCode::TypeMismatch),
        (json!({ "context": { "id": "x" } }), ErrorCode::MissingField),
        (
            json!({ "context": { "action": "archive", "id": "x" } }),
            ErrorCode::InvalidAction,
        ),
        (json!({ "context": { "action": "delete" } }), ErrorCode::MissingField),
        (
            json!({ "context": { "action": "delete", "id": "abc" } }),
            ErrorCode::InvalidId,
        ),
    ];
    for (body, expected) in cases {
        let err = validate_json_command(&body).expect_err("should fail");
        assert_eq!(err.code(), expected, "body: {body}");
    }
}

#[test]
fn json_missing_fields_are_named() {
    let err = validate_json_command(&json!({ "context": {} })).expect_err("should fail");
    assert_eq!(err.to_string(), "No action provided");
    let err = validate_json_command(&json!({ "context": { "action": "delete" } }))
        .expect_err("should fail");
    assert_eq!(err.to_string(), "No id provided");
}

#[test]
fn json_ids_must_be_positive_integers() {
    for id in [json!(0), json!(-4), json!("0"), json!(1.5), json!(true), json!(null)] {
        let body = json!({ "context": { "action": "delete", "id": id } });
        let err = validate_json_command(&body).expect_err("should fail");
        assert_eq!(err.code(), ErrorCode::InvalidId, "id: {id}");
    }

    let body = json!({ "context": { "action": "delete", "id": " 7 " } });
    assert_eq!(validate_json_command(&body).expect("valid"), EventId(7));
    let body = json!({ "context": { "action": "delete", "id": 2 } });
    assert_eq!(validate_json_command(&body).expect("valid"), EventId(2));
}

#[test]
fn json_delete_acknowledges_id_ephemerally() {
    let payload = CommandPayload::Json(json!({ "context": { "action": "delete", "id": 2 } }));
    let response = dispatch(&ctx(), &payload).expect("delete");
    assert_eq!(response.text, "Deleted scheduled message 2.");
    assert_eq!(response.ephemeral_text.as_deref(), Some("Deleted scheduled message 2."));
    assert!(response.attachments.is_none());

    let after = handle_list(&ctx());
    assert_eq!(after.attachments.map(|a| a.len()), Some(3));
}

#[test]
fn file_command_is_invalid() {
    let mut fields = FormFields::new();
    fields.insert(
        "command".into(),
        FormValue::File {
            filename: Some("schedule.txt".into()),
            content_type: Some("text/plain".into()),
            bytes: "/schedule".into(),
        },
    );
    let err = validate_form_command(&fields).expect_err("should fail");
    assert_eq!(err, CommandError::InvalidCommand("schedule.txt".into()));
}
