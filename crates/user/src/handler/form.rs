use axum::extract::{
    Multipart,
    multipart::{Field, MultipartRejection},
};
use shared::domain::requests::{
    CreateUserRequest, ImageUpload, MAX_IMAGE_BYTES, UpdateUserRequest,
};
use tracing::warn;
use utoipa::ToSchema;

/// Ceiling on a whole create or update body.
pub const MAX_MULTIPART_BYTES: usize = 10 * 1024 * 1024;

/// Fields of the create and update forms. Anything absent is left empty and
/// the validators report it.
#[derive(Debug, Default)]
pub struct UserForm {
    pub full_name: String,
    pub email: String,
    pub phone_no: String,
    pub image: ImageUpload,
}

/// Shape of the multipart body, for the OpenAPI document only.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UserFormSchema {
    #[schema(example = "Jane Doe")]
    full_name: String,
    #[schema(example = "jane@example.com")]
    email: String,
    #[schema(example = "+1 555 123 4567")]
    phone_no: String,
    /// At most 50,000 bytes.
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
}

impl UserForm {
    /// Reads every part of the body in one pass. A body that is not
    /// multipart at all yields an empty form. When a name repeats, the first
    /// part wins.
    pub async fn from_multipart(multipart: Result<Multipart, MultipartRejection>) -> Self {
        let mut full_name = None;
        let mut email = None;
        let mut phone_no = None;
        let mut image = None;

        let mut multipart = match multipart {
            Ok(multipart) => multipart,
            Err(rejection) => {
                warn!("📭 Request is not a readable multipart form: {rejection}");
                return Self::default();
            }
        };

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    warn!("📭 Stopped reading multipart form: {e}");
                    break;
                }
            };

            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            // A part with an empty filename is what a browser sends for an
            // untouched file input. It is a plain value, not an upload.
            let is_file = field.file_name().is_some_and(|n| !n.is_empty());

            match name.as_str() {
                "fullName" if !is_file && full_name.is_none() => {
                    full_name = Some(read_text(field).await)
                }
                "email" if !is_file && email.is_none() => email = Some(read_text(field).await),
                "phoneNo" if !is_file && phone_no.is_none() => {
                    phone_no = Some(read_text(field).await)
                }
                "image" if is_file && image.is_none() => image = Some(read_image(field).await),
                _ => {}
            }
        }

        Self {
            full_name: full_name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            phone_no: phone_no.unwrap_or_default(),
            image: image.unwrap_or_default(),
        }
    }

    pub fn into_create_request(self) -> CreateUserRequest {
        CreateUserRequest {
            full_name: self.full_name,
            email: self.email,
            phone_no: self.phone_no,
            image: self.image,
        }
    }

    pub fn into_update_request(self, id: u64) -> UpdateUserRequest {
        UpdateUserRequest {
            id,
            full_name: self.full_name,
            email: self.email,
            phone_no: self.phone_no,
            image: self.image,
        }
    }
}

async fn read_text(field: Field<'_>) -> String {
    field.text().await.unwrap_or_else(|e| {
        warn!("📭 Failed to read form field: {e}");
        String::new()
    })
}

/// Stops as soon as the running total passes [`MAX_IMAGE_BYTES`], so an
/// oversized file is never buffered in full.
async fn read_image(mut field: Field<'_>) -> ImageUpload {
    let mut bytes = Vec::new();

    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
                    warn!("🖼️ Image exceeds {MAX_IMAGE_BYTES} bytes");
                    return ImageUpload::TooLarge;
                }
                bytes.extend_from_slice(&chunk);
            }
            Ok(None) => return ImageUpload::Bytes(bytes),
            Err(e) => {
                warn!("🖼️ Failed to read image stream: {e}");
                return ImageUpload::Unreadable;
            }
        }
    }
}

/// Path segments that are not a plain unsigned integer read as `0`.
pub fn parse_path_number(raw: &str) -> u64 {
    raw.trim().parse::<u64>().unwrap_or(0)
}
