use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart,
    },
    http::StatusCode,
};
use bytes::{Bytes, BytesMut};
use mime::Mime;
use serde_json::Value;

use crate::{
    app::{errors::DefaultApiError, models::api_error::ApiError},
    validation::payload::Payload,
};

use super::models::file_properties::FileProperties;

/// Collects text parts as string fields and parts carrying a file name as files.
/// A file is buffered up to `max_file_bytes` and read to its end past that, so
/// its full size is known without holding it in memory.
pub async fn get_payload(
    mut multipart: Multipart,
    max_file_bytes: u64,
) -> Result<Payload, ApiError> {
    let mut payload = Payload::default();

    while let Some(mut field) = multipart.next_field().await.map_err(rejected)? {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let mime_type = field
                    .content_type()
                    .and_then(|content_type| content_type.parse::<Mime>().ok())
                    .unwrap_or(mime::APPLICATION_OCTET_STREAM);
                let (data, size) = read_file(&mut field, max_file_bytes)
                    .await
                    .map_err(rejected)?;

                // browsers send an empty part for an untouched file input
                if file_name.is_empty() && size == 0 {
                    continue;
                }

                payload.insert_file(FileProperties {
                    field_name,
                    file_name,
                    mime_type,
                    data,
                    size,
                });
            }
            None => {
                let text = field.text().await.map_err(rejected)?;
                payload.insert_field(field_name, Value::String(text));
            }
        }
    }

    Ok(payload)
}

async fn read_file(
    field: &mut Field<'_>,
    max_bytes: u64,
) -> Result<(Bytes, u64), MultipartError> {
    let cap = usize::try_from(max_bytes).unwrap_or(usize::MAX);
    let mut data = BytesMut::new();
    let mut size = 0;

    while let Some(chunk) = field.chunk().await? {
        size += chunk.len() as u64;

        let room = cap.saturating_sub(data.len());
        data.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }

    Ok((data.freeze(), size))
}

fn rejected(e: MultipartError) -> ApiError {
    tracing::debug!(%e, "rejected multipart body");

    match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => DefaultApiError::PayloadTooLarge.value(),
        _ => DefaultApiError::MalformedBody.value(),
    }
}
