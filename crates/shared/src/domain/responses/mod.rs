mod api;
mod user;

pub use self::api::ApiResponse;
pub use self::user::UserResponse;
