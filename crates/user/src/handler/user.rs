use crate::{
    handler::form::{UserForm, UserFormSchema, parse_path_number},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Multipart, Path, multipart::MultipartRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::{
    abstract_trait::user::service::{command::DynUserCommandService, query::DynUserQueryService},
    domain::responses::{ApiResponse, UserResponse},
    errors::{AppErrorHttp, ErrorResponse},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/user/create",
    tag = "User",
    request_body(content = UserFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation or image error", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn create_user(
    Extension(service): Extension<DynUserCommandService>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let form = UserForm::from_multipart(multipart).await;
    let response = service.create(&form.into_create_request()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/user/getall",
    tag = "User",
    responses(
        (status = 200, description = "Every user, in store order", body = ApiResponse<Vec<UserResponse>>),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn get_users(
    Extension(service): Extension<DynUserQueryService>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_all().await?;
    Ok(Json(response))
}

/// Despite the path name, `userid` is a 1-based position in the `getall`
/// listing, not a primary key.
#[utoipa::path(
    get,
    path = "/user/get/{userid}",
    tag = "User",
    params(("userid" = String, Path, description = "1-based position in the user listing")),
    responses(
        (status = 200, description = "User at that position", body = ApiResponse<UserResponse>),
        (status = 400, description = "Position out of range", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn get_user_by_position(
    Extension(service): Extension<DynUserQueryService>,
    Path(userid): Path<String>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.find_by_position(parse_path_number(&userid)).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/user/update/{userid}",
    tag = "User",
    params(("userid" = String, Path, description = "User ID")),
    request_body(content = UserFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "Unknown id, validation or image error", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn update_user(
    Extension(service): Extension<DynUserCommandService>,
    Path(userid): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let form = UserForm::from_multipart(multipart).await;
    let request = form.into_update_request(parse_path_number(&userid));
    let response = service.update(&request).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/user/delete/{userid}",
    tag = "User",
    params(("userid" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User permanently deleted; data echoes the id", body = serde_json::Value),
        (status = 400, description = "Unknown id", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    Extension(service): Extension<DynUserCommandService>,
    Path(userid): Path<String>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let response = service.delete(parse_path_number(&userid)).await?;
    Ok(Json(response))
}

pub fn user_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/user/create", post(create_user))
        .route("/user/getall", get(get_users))
        .route("/user/get/{userid}", get(get_user_by_position))
        .route("/user/update/{userid}", put(update_user))
        .route("/user/delete/{userid}", delete(delete_user))
        .layer(Extension(app_state.di_container.user_command.clone()))
        .layer(Extension(app_state.di_container.user_query.clone()))
}
