// Member area API: signup, signin and identity availability checks

pub mod auth;
pub mod config;
pub mod db;
pub mod server;

use axum::{routing::post, Router};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{
    handlers, password::PasswordService, token::TokenService, AuthService, ErrorsResponse,
    FieldErrors, ProbeRequest, SigninRequest, SignupRequest, SuccessResponse, TokenResponse,
    UserStore,
};
use config::Config;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::validate_handler,
        handlers::signup_handler,
        handlers::signin_handler,
    ),
    components(
        schemas(
            ProbeRequest,
            SignupRequest,
            SigninRequest,
            SuccessResponse,
            TokenResponse,
            ErrorsResponse,
            FieldErrors
        )
    ),
    tags(
        (name = "users", description = "Signup, signin and availability checks")
    ),
    info(
        title = "Member Area API",
        version = "0.1.0",
        description = "Authentication endpoints for the member area"
    )
)]
pub struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth_service: AuthService) -> Self {
        Self {
            auth_service: Arc::new(auth_service),
        }
    }

    /// Wire the auth services over `store` using the configured secrets and costs
    pub fn from_config(config: &Config, store: Arc<dyn UserStore>) -> Self {
        let token_service = TokenService::new(config.jwt_secret.clone())
            .with_expiry(config.jwt_expiry_seconds);
        Self::new(AuthService::new(
            store,
            PasswordService::new(config.bcrypt_cost),
            token_service,
            config.min_password_length,
        ))
    }
}

/// Creates and configures the application router
///
/// Maps the auth endpoints, Swagger UI and, when `client_dir` is given, the
/// built client with `index.html` as the fallback for unknown paths.
pub fn create_router(state: AppState, client_dir: Option<&Path>) -> Router {
    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/users/validate", post(handlers::validate_handler))
        .route("/api/users/signup", post(handlers::signup_handler))
        .route("/api/users/signin", post(handlers::signin_handler))
        .with_state(state);

    let docs = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi());
    let mut router = Router::new().merge(docs).merge(api);

    if let Some(dir) = client_dir {
        let index = dir.join("index.html");
        let client = ServeDir::new(dir).fallback(ServeFile::new(index));
        router = router.fallback_service(client);
    }

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
}

#[cfg(test)]
mod test_support;
