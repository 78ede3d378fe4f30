use crate::{domain::requests::ImageUpload, errors::ServiceError};
use base64::{Engine, engine::general_purpose::STANDARD};

pub const IMAGE_MISSING: &str = "Getting error while reading the user image";
pub const IMAGE_TOO_LARGE: &str = "Image size should be below 50kb";
pub const IMAGE_UNREADABLE: &str = "Error reading uploaded image from stream";

/// Base64 text for a successfully read upload, or the matching rejection.
pub fn encode_image(upload: &ImageUpload) -> Result<String, ServiceError> {
    match upload {
        ImageUpload::Bytes(bytes) => Ok(STANDARD.encode(bytes)),
        ImageUpload::Missing => Err(ServiceError::Validation(IMAGE_MISSING.into())),
        ImageUpload::TooLarge => Err(ServiceError::Validation(IMAGE_TOO_LARGE.into())),
        ImageUpload::Unreadable => Err(ServiceError::Validation(IMAGE_UNREADABLE.into())),
    }
}
