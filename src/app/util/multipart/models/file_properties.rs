use bytes::Bytes;
use mime::Mime;

#[derive(Debug)]
pub struct FileProperties {
    pub field_name: String,
    pub file_name: String,
    pub mime_type: Mime,
    /// Leading bytes of the upload, at most the buffer cap it was read with.
    pub data: Bytes,
    /// Bytes received for this part, including those past the buffer cap.
    pub size: u64,
}
