//! Router configuration for the backend API.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Resource routers collected into one documented router. Every mounted
/// handler registers its own OpenAPI operation.
fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/users", handlers::users::user_routes())
        .nest("/items", handlers::items::item_routes())
        .nest("/bookings", handlers::bookings::booking_routes())
        .nest("/requests", handlers::requests::request_routes())
        .merge(handlers::health::health_routes())
}

/// Creates the main application router with all routes and middleware.
///
/// Resources are mounted at the root, matching the public surface the
/// gateway forwards to:
/// - `/users`, `/items`, `/bookings`, `/requests`, `/health`
///
/// Middleware is applied in reverse order of declaration, so request_id
/// runs before logging, which runs before the handlers.
pub fn create_router(state: AppState) -> Router {
    let (router, api) = api_router().split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_covers_every_route() {
        let (_, api) = api_router().split_for_parts();

        let expected = [
            "/users",
            "/users/{id}",
            "/items",
            "/items/{id}",
            "/items/search",
            "/items/{id}/comment",
            "/bookings",
            "/bookings/owner",
            "/bookings/{id}",
            "/requests",
            "/requests/all",
            "/requests/{id}",
            "/health",
            "/health/ready",
            "/health/live",
        ];
        for path in expected {
            assert!(
                api.paths.paths.contains_key(path),
                "missing documented path: {}",
                path
            );
        }
        assert_eq!(api.paths.paths.len(), expected.len());
    }

    #[test]
    fn test_search_requires_sharer_header() {
        let (_, api) = api_router().split_for_parts();

        let search = api.paths.paths.get("/items/search").unwrap();
        let op = search.get.as_ref().unwrap();
        let params = op.parameters.as_ref().unwrap();
        assert!(params.iter().any(|p| p.name == "X-Sharer-User-Id"));
    }

    #[test]
    fn test_user_routes_document_all_methods() {
        let (_, api) = api_router().split_for_parts();

        let by_id = api.paths.paths.get("/users/{id}").unwrap();
        assert!(by_id.get.is_some());
        assert!(by_id.patch.is_some());
        assert!(by_id.delete.is_some());

        let root = api.paths.paths.get("/users").unwrap();
        assert!(root.post.is_some());
    }
}
