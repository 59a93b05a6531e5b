// HTTP handlers for authentication endpoints

use axum::{extract::State, Json};

use crate::auth::{
    error::AuthError,
    extract::JsonOrForm,
    models::{
        ProbeRequest, ProbeResponse, SigninRequest, SignupRequest, SuccessResponse, TokenResponse,
        UserField,
    },
};
use crate::AppState;

/// Check whether a username, email or name is still available
/// POST /api/users/validate
#[utoipa::path(
    post,
    path = "/api/users/validate",
    request_body = ProbeRequest,
    responses(
        (status = 200, description = "`{\"success\": \"success\"}` when available, `{\"error\": {field: message}}` otherwise", body = SuccessResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Credential store unavailable")
    ),
    tag = "users"
)]
pub async fn validate_handler(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<ProbeRequest>,
) -> Result<Json<ProbeResponse>, AuthError> {
    let field = match request.field.parse::<UserField>() {
        Ok(field) => field,
        Err(unknown) => {
            tracing::debug!("Probe on unknown field: {}", request.field);
            return Ok(Json(ProbeResponse::unavailable(
                request.field.clone(),
                unknown.to_string(),
            )));
        }
    };

    let check = state
        .auth_service
        .check_availability(field, &request.value)
        .await?;

    if check.is_unique {
        Ok(Json(ProbeResponse::Available(SuccessResponse::new())))
    } else {
        Ok(Json(ProbeResponse::unavailable(
            field.as_str(),
            check.message,
        )))
    }
}

/// Register a new user
/// POST /api/users/signup
#[utoipa::path(
    post,
    path = "/api/users/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "`{\"success\": \"success\"}` on registration, `{\"errors\": {...}}` when a field fails", body = SuccessResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Store or hashing failure")
    ),
    tag = "users"
)]
pub async fn signup_handler(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<SignupRequest>,
) -> Result<Json<SuccessResponse>, AuthError> {
    state.auth_service.signup(request).await?;
    Ok(Json(SuccessResponse::new()))
}

/// Login a user and issue a bearer token
/// POST /api/users/signin
#[utoipa::path(
    post,
    path = "/api/users/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Token on success; `{\"errors\": {...}}` for missing fields or invalid credentials", body = TokenResponse),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Store, hashing or signing failure")
    ),
    tag = "users"
)]
pub async fn signin_handler(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<SigninRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let signed_in = state.auth_service.signin(request).await?;
    Ok(Json(TokenResponse::new(signed_in.token)))
}
