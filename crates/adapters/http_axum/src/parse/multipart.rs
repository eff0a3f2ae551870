//! `multipart/form-data` decoding.
//!
//! Text parts follow the form-urlencoded conventions. Parts carrying a file
//! name are files: on the Micropub endpoint they become attachments of the
//! property they were sent as, on the media endpoint the `file` part is the
//! upload.

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};

use micropub_domain::error::BadRequestError;
use micropub_domain::media::{Attachment, MediaFile};

use super::{ParsedBody, form, strip_array_suffix};

/// A decoded media endpoint body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub file: MediaFile,
    pub access_token: Option<String>,
}

fn malformed(err: MultipartError) -> BadRequestError {
    BadRequestError::MalformedBody(err.body_text().into())
}

/// Decode a multipart Micropub body.
///
/// File inputs left empty by the client (no file name, no bytes) are
/// skipped.
///
/// # Errors
///
/// Returns [`BadRequestError::MalformedBody`] when the stream is broken and
/// any error the form field rules raise.
pub async fn parse(mut multipart: Multipart) -> Result<ParsedBody, BadRequestError> {
    let mut parsed = ParsedBody::default();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let file = read_file(field, filename).await?;
                if file.filename.is_none() && file.is_empty() {
                    continue;
                }
                parsed.draft.attachments.push(Attachment {
                    property: strip_array_suffix(&name).to_string(),
                    file,
                });
            }
            None => {
                let value = read_text(field).await?;
                form::collect(&mut parsed, &name, value)?;
            }
        }
    }
    Ok(parsed)
}

/// Decode a media endpoint body: one `file` part, plus an optional
/// `access_token`. Other parts are ignored.
///
/// # Errors
///
/// Returns [`BadRequestError::MissingFile`] without a `file` part,
/// [`BadRequestError::EmptyFile`] when it has no bytes, or
/// [`BadRequestError::MalformedBody`] when the stream is broken.
pub async fn parse_media(mut multipart: Multipart) -> Result<MediaUpload, BadRequestError> {
    let mut file = None;
    let mut access_token = None;
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_string);
        let filename = field.file_name().map(str::to_string);
        match (name.as_deref(), filename) {
            (Some("file"), Some(filename)) => file = Some(read_file(field, filename).await?),
            (Some("access_token"), None) => {
                access_token = Some(read_text(field).await?).filter(|t| !t.is_empty());
            }
            _ => {}
        }
    }

    let file = file.ok_or(BadRequestError::MissingFile)?;
    if file.is_empty() {
        return Err(BadRequestError::EmptyFile);
    }
    Ok(MediaUpload { file, access_token })
}

/// Text part contents, which must be valid UTF-8.
async fn read_text(field: Field<'_>) -> Result<String, BadRequestError> {
    let bytes = field.bytes().await.map_err(malformed)?;
    String::from_utf8(bytes.to_vec()).map_err(|err| BadRequestError::MalformedBody(err.into()))
}

async fn read_file(field: Field<'_>, filename: String) -> Result<MediaFile, BadRequestError> {
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(malformed)?;

    let mut file = MediaFile::new(bytes.to_vec());
    if !filename.is_empty() {
        file = file.with_filename(filename);
    }
    if let Some(content_type) = content_type {
        file = file.with_content_type(content_type);
    }
    Ok(file)
}
