use mime::Mime;

use crate::validation::payload::Payload;

fn is_accepted_image_type(mime_type: &Mime) -> bool {
    mime_type.type_() == mime::IMAGE
        && (mime_type.subtype() == mime::JPEG || mime_type.subtype() == mime::PNG)
}

/// Whether the file uploaded as `field_name` is a JPEG or PNG image. Passes
/// when nothing was uploaded under that name.
pub fn is_image(payload: &Payload, field_name: &str) -> bool {
    match payload.file(field_name) {
        Some(file) => {
            is_accepted_image_type(&file.mime_type) && imagesize::blob_size(&file.data).is_ok()
        }
        None => true,
    }
}

/// Passes when nothing was uploaded under `field_name`.
pub fn is_within_max_size(payload: &Payload, field_name: &str, max_bytes: u64) -> bool {
    match payload.file(field_name) {
        Some(file) => file.size <= max_bytes,
        None => true,
    }
}
