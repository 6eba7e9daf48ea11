use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app_state::AppState,
    health::{self, HealthResponse, RootResponse},
    profiles::{
        dtos::{ErrorResponse, ProfilesRequest, ProfilesResponse},
        handlers,
        model::Profile,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Profile Scout API", description = "Find professional profiles of the people mentioned in a text"),
    paths(health::root, health::health_check, handlers::find_profiles),
    components(schemas(
        HealthResponse,
        RootResponse,
        Profile,
        ProfilesRequest,
        ProfilesResponse,
        ErrorResponse
    )),
    tags(
        (name = "profiles", description = "Profile extraction"),
        (name = "health", description = "Service status")
    )
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/profiles", post(handlers::find_profiles))
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}
