mod user;

pub use self::user::{CreateUserRequest, ImageUpload, MAX_IMAGE_BYTES, UpdateUserRequest};
