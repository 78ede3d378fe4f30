/// Largest accepted image file, in bytes.
pub const MAX_IMAGE_BYTES: usize = 50_000;

/// Outcome of pulling the `image` part out of a multipart form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageUpload {
    #[default]
    Missing,
    TooLarge,
    Unreadable,
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub full_name: String,
    pub email: String,
    pub phone_no: String,
    pub image: ImageUpload,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub phone_no: String,
    pub image: ImageUpload,
}
