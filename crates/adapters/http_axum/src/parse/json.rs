//! `application/json` decoding.
//!
//! A create looks like `{"type": ["h-entry"], "properties": {"content": ["…"]}}`.
//! Updates carry `url` plus `replace` / `add` / `delete`; delete and undelete
//! carry `action` and `url`.

use serde_json::{Map, Value};

use micropub_domain::error::BadRequestError;
use micropub_domain::request::{Properties, UpdateCommand};

use super::ParsedBody;

/// Decode a JSON body.
///
/// # Errors
///
/// Returns [`BadRequestError::InvalidJson`] for unparsable documents and
/// [`BadRequestError::InvalidField`] when a known key has the wrong shape.
pub fn parse(body: &[u8]) -> Result<ParsedBody, BadRequestError> {
    let Value::Object(mut document) = serde_json::from_slice::<Value>(body)? else {
        return Err(invalid("body", "a JSON object"));
    };

    let mut parsed = ParsedBody {
        access_token: take_string(&mut document, "access_token")?,
        ..ParsedBody::default()
    };
    let draft = &mut parsed.draft;
    draft.action = take_string(&mut document, "action")?;
    draft.url = take_string(&mut document, "url")?;

    if let Some(kind) = document.remove("type") {
        draft.kind = Some(parse_type(kind)?);
    }
    if let Some(properties) = document.remove("properties") {
        draft.properties = parse_properties("properties", properties)?;
    }
    for command in [UpdateCommand::Replace, UpdateCommand::Add] {
        if let Some(value) = document.remove(command.as_str()) {
            *draft.commands.entry(command) = parse_properties(command.as_str(), value)?;
        }
    }
    if let Some(value) = document.remove(UpdateCommand::Delete.as_str()) {
        *draft.commands.entry(UpdateCommand::Delete) = parse_deletion(value)?;
    }

    Ok(parsed)
}

fn invalid(field: impl Into<String>, expected: &'static str) -> BadRequestError {
    BadRequestError::InvalidField {
        field: field.into(),
        expected,
    }
}

/// Remove `key` and return it as a non-empty string.
fn take_string(
    document: &mut Map<String, Value>,
    key: &'static str,
) -> Result<Option<String>, BadRequestError> {
    match document.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value).filter(|v| !v.is_empty())),
        Some(_) => Err(invalid(key, "a string")),
    }
}

/// `["h-entry"]` → `h-entry`.
fn parse_type(value: Value) -> Result<String, BadRequestError> {
    match value {
        Value::Array(items) => match items.into_iter().next() {
            Some(Value::String(kind)) if !kind.is_empty() => Ok(kind),
            _ => Err(invalid("type", "a non-empty array of strings")),
        },
        _ => Err(invalid("type", "a non-empty array of strings")),
    }
}

/// An object whose every value is an array.
fn parse_properties(field: &str, value: Value) -> Result<Properties, BadRequestError> {
    let Value::Object(map) = value else {
        return Err(invalid(field, "an object"));
    };
    map.into_iter()
        .map(|(name, values)| match values {
            Value::Array(values) => Ok((name, values)),
            _ => Err(invalid(format!("{field}.{name}"), "an array")),
        })
        .collect()
}

/// Either a list of property names to remove, or an object of values to
/// remove.
fn parse_deletion(value: Value) -> Result<Properties, BadRequestError> {
    match value {
        Value::Array(names) => names
            .into_iter()
            .map(|name| match name {
                Value::String(name) => Ok((name, Vec::new())),
                _ => Err(invalid("delete", "an array of property names")),
            })
            .collect(),
        other @ Value::Object(_) => parse_properties("delete", other),
        _ => Err(invalid("delete", "an array or an object")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use micropub_domain::draft::RequestDraft;
    use micropub_domain::request::Commands;

    use super::*;

    fn parse_value(value: &Value) -> Result<ParsedBody, BadRequestError> {
        parse(&serde_json::to_vec(value).unwrap())
    }

    #[test]
    fn should_decode_create_preserving_order_and_structure() {
        let parsed = parse_value(&json!({
            "type": ["h-entry"],
            "properties": {
                "content": [{"html": "<p>hi</p>"}],
                "category": ["foo", "bar"],
            },
        }))
        .unwrap();

        let mut properties = Properties::new();
        properties.push("content", json!({"html": "<p>hi</p>"}));
        properties.push("category", "foo");
        properties.push("category", "bar");
        assert_eq!(
            parsed.draft,
            RequestDraft {
                kind: Some("h-entry".to_string()),
                properties,
                ..RequestDraft::default()
            }
        );
    }

    #[test]
    fn should_decode_update_commands() {
        let parsed = parse_value(&json!({
            "action": "update",
            "url": "https://example.org/1",
            "replace": {"content": ["new"]},
            "add": {"category": ["baz"]},
            "delete": ["syndication"],
        }))
        .unwrap();

        let mut commands = Commands::new();
        commands.entry(UpdateCommand::Replace).push("content", "new");
        commands.entry(UpdateCommand::Add).push("category", "baz");
        commands
            .entry(UpdateCommand::Delete)
            .insert("syndication", vec![]);
        assert_eq!(parsed.draft.action.as_deref(), Some("update"));
        assert_eq!(parsed.draft.url.as_deref(), Some("https://example.org/1"));
        assert_eq!(parsed.draft.commands, commands);
    }

    #[test]
    fn should_decode_value_deletion_object() {
        let parsed = parse_value(&json!({
            "url": "https://example.org/1",
            "delete": {"category": ["foo"]},
        }))
        .unwrap();

        assert_eq!(
            parsed
                .draft
                .commands
                .get(UpdateCommand::Delete)
                .unwrap()
                .get("category")
                .unwrap(),
            &[json!("foo")]
        );
    }

    #[test]
    fn should_take_access_token_from_body() {
        let parsed = parse_value(&json!({
            "action": "delete",
            "url": "https://example.org/1",
            "access_token": "secret",
        }))
        .unwrap();
        assert_eq!(parsed.access_token.as_deref(), Some("secret"));
    }

    #[test]
    fn should_reject_malformed_documents() {
        assert!(matches!(parse(b"{"), Err(BadRequestError::InvalidJson(_))));
        assert!(matches!(
            parse_value(&json!(["h-entry"])),
            Err(BadRequestError::InvalidField { .. })
        ));
    }

    #[test]
    fn should_reject_wrongly_shaped_fields() {
        for document in [
            json!({"type": "h-entry", "properties": {}}),
            json!({"type": [], "properties": {}}),
            json!({"type": ["h-entry"], "properties": {"content": "hello"}}),
            json!({"type": ["h-entry"], "properties": ["content"]}),
            json!({"action": 1, "url": "https://example.org/1"}),
            json!({"url": "https://example.org/1", "delete": "category"}),
            json!({"url": "https://example.org/1", "delete": [1]}),
        ] {
            assert!(
                matches!(
                    parse_value(&document),
                    Err(BadRequestError::InvalidField { .. })
                ),
                "expected rejection of {document}"
            );
        }
    }
}
