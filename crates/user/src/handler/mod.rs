mod form;
mod user;

use crate::state::AppState;
use anyhow::Result;
use axum::{Router, extract::DefaultBodyLimit};
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::form::{MAX_MULTIPART_BYTES, UserForm, parse_path_number};
pub use self::user::user_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        user::create_user,
        user::get_users,
        user::get_user_by_position,
        user::update_user,
        user::delete_user,
    ),
    tags(
        (name = "User", description = "User create, list, lookup, update and delete"),
    )
)]
struct ApiDoc;

pub struct AppRouter;

impl AppRouter {
    /// The full application, Swagger UI included.
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .merge(user_routes(shared_state.clone()));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::max(MAX_MULTIPART_BYTES))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
