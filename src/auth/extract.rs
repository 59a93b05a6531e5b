// Request body extractor accepting JSON or form-encoded payloads

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::auth::error::AuthError;

/// Deserializes `application/x-www-form-urlencoded` bodies as forms and
/// everything else as JSON.
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|content_type| content_type.starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AuthError::MalformedBody(e.body_text()))?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AuthError::MalformedBody(e.body_text()))?;
            Ok(Self(value))
        }
    }
}
