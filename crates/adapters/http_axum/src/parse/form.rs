//! `application/x-www-form-urlencoded` decoding.
//!
//! Field conventions:
//! - `h=entry` sets the type to `h-entry`; `action`, `url` and
//!   `access_token` are reserved and never become properties
//! - `name[]` repeated collects into one ordered property; a repeated plain
//!   `name` appends as well
//! - `replace[p]`, `add[p]`, `delete[p]` (each optionally followed by `[]`)
//!   carry update values; `delete[]=p` or `delete=p` removes `p` entirely

use std::borrow::Cow;
use std::iter;

use percent_encoding::percent_decode;

use micropub_domain::error::BadRequestError;
use micropub_domain::request::UpdateCommand;

use super::{ParsedBody, strip_array_suffix};

/// Decode a form-urlencoded body.
///
/// Keys and values are percent-decoded strictly: an escape sequence that
/// does not decode to UTF-8 fails the whole body.
///
/// # Errors
///
/// Returns [`BadRequestError::MalformedBody`] for non-UTF-8 bodies and
/// [`BadRequestError::InvalidField`] for malformed update keys.
pub fn parse(body: &[u8]) -> Result<ParsedBody, BadRequestError> {
    let mut parsed = ParsedBody::default();
    for pair in body.split(|&b| b == b'&').filter(|pair| !pair.is_empty()) {
        let (key, value) = match pair.iter().position(|&b| b == b'=') {
            Some(index) => (&pair[..index], &pair[index + 1..]),
            None => (pair, &[][..]),
        };
        collect(&mut parsed, &decode(key)?, decode(value)?)?;
    }
    Ok(parsed)
}

/// `+` is a space, then percent escapes; the result must be UTF-8.
fn decode(raw: &[u8]) -> Result<String, BadRequestError> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|err| BadRequestError::MalformedBody(err.into()))
}

/// Fold one text field into `parsed`. Shared with the multipart decoder.
pub(crate) fn collect(
    parsed: &mut ParsedBody,
    key: &str,
    value: String,
) -> Result<(), BadRequestError> {
    let draft = &mut parsed.draft;
    match key {
        "access_token" => parsed.access_token = non_empty(value),
        "h" => draft.kind = non_empty(value).map(|h| format!("h-{h}")),
        "action" => draft.action = non_empty(value),
        "url" => draft.url = non_empty(value),
        _ => match command_field(key)? {
            Some((command, Some(property))) => draft.commands.entry(command).push(property, value),
            Some((command, None)) => {
                if !value.is_empty() {
                    draft.commands.entry(command).extend(value, iter::empty());
                }
            }
            None => draft.properties.push(strip_array_suffix(key), value),
        },
    }
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

/// Recognize an update key. `Some((command, None))` is a whole-property
/// deletion whose value names the property.
fn command_field(key: &str) -> Result<Option<(UpdateCommand, Option<&str>)>, BadRequestError> {
    let (base, rest) = match key.split_once('[') {
        Some((base, rest)) => (base, Some(rest)),
        None => (key, None),
    };
    let Some(command) = UpdateCommand::from_key(base) else {
        return Ok(None);
    };
    let invalid = || BadRequestError::InvalidField {
        field: key.to_string(),
        expected: "of the form `command[property]` or `delete[]`",
    };

    match rest {
        None | Some("]") if command == UpdateCommand::Delete => Ok(Some((command, None))),
        None | Some("]") => Err(invalid()),
        Some(rest) => {
            let property = rest
                .strip_suffix("][]")
                .or_else(|| rest.strip_suffix(']'))
                .filter(|p| !p.is_empty() && !p.contains(['[', ']']))
                .ok_or_else(invalid)?;
            Ok(Some((command, Some(property))))
        }
    }
}
