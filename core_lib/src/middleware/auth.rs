//! Shared-secret bearer token authentication

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

/// Gate applied as a router layer: every request is checked against the one
/// configured secret before it reaches a handler. No session state is
/// created.
pub async fn require_bearer_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token_from_header(request.headers())?;

    if token != state.config.auth.token {
        return Err(AppError::Authorization("Invalid token".to_string()));
    }

    Ok(next.run(request).await)
}

fn extract_token_from_header(headers: &HeaderMap) -> Result<String, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Authentication("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Authentication("Invalid Authorization header format".to_string()))?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Authentication(
            "Authorization header must start with 'Bearer '".to_string(),
        ));
    }

    let token = auth_header.strip_prefix("Bearer ").unwrap();

    if token.is_empty() {
        return Err(AppError::Authentication("Empty token".to_string()));
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppConfig, AppState};
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    const TEST_TOKEN: &str = "unit-test-secret";

    fn setup_test_state() -> AppState {
        let mut config = AppConfig::default();
        config.auth.token = TEST_TOKEN.to_string();
        AppState::new(config)
    }

    fn protected_app(state: AppState) -> Router {
        Router::new()
            .route("/protected", get(test_handler))
            .layer(middleware::from_fn_with_state(state.clone(), require_bearer_token))
            .with_state(state)
    }

    async fn test_handler() -> &'static str {
        "success"
    }

    fn request_with_auth(value: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(Method::GET).uri("/protected");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let app = protected_app(setup_test_state());

        let request = request_with_auth(Some(&format!("Bearer {}", TEST_TOKEN)));
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let app = protected_app(setup_test_state());

        let response = app.oneshot(request_with_auth(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthorized() {
        let app = protected_app(setup_test_state());

        let request = request_with_auth(Some("Basic dXNlcjpwYXNz"));
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_empty_token_is_unauthorized() {
        let app = protected_app(setup_test_state());

        let request = request_with_auth(Some("Bearer "));
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_mismatched_token_is_forbidden() {
        let app = protected_app(setup_test_state());

        let request = request_with_auth(Some("Bearer not-the-secret"));
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_extract_token_from_header() {
        let mut headers = HeaderMap::new();

        assert!(extract_token_from_header(&headers).is_err());

        headers.insert(AUTHORIZATION, "Bearer valid-token-123".parse().unwrap());
        let token = extract_token_from_header(&headers).unwrap();
        assert_eq!(token, "valid-token-123");

        headers.insert(AUTHORIZATION, "Basic invalid".parse().unwrap());
        assert!(extract_token_from_header(&headers).is_err());

        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert!(extract_token_from_header(&headers).is_err());
    }
}
