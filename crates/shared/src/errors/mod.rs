mod errors;
mod http;
mod repository;
mod service;

pub use self::errors::ErrorResponse;
pub use self::http::AppErrorHttp;
pub use self::repository::{RepositoryError, UniqueField};
pub use self::service::ServiceError;
