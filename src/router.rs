//! Application router

use axum::{
    http::{header, Method},
    middleware, Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers,
    middleware::{logging_middleware, rate_limit_middleware},
    state::AppState,
};

/// Build the full application: routes behind the gate, then the outer layers
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::routes(state.clone()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::auth::verifier::MockIdentityVerifier;
    use crate::test_utils::{bearer, body_string, test_state};

    fn app() -> (Router, AppState) {
        let mut verifier = MockIdentityVerifier::new();
        verifier.expect_verify().never();

        let state = test_state(verifier);
        (build_router(state.clone()), state)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn with_auth(method: &str, uri: &str, authorization: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, authorization)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_is_exempt() {
        let (app, _) = app();

        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let (app, _) = app();

        let response = app.oneshot(get("/users/get")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, "No auth header provided");
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthorized() {
        let (app, _) = app();

        let response = app
            .oneshot(with_auth("GET", "/users/get", "Basic Zm9vOmJhcg=="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, "Invalid token type");
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let (app, _) = app();

        let response = app
            .oneshot(with_auth("GET", "/problems/getnotvisible", "Bearer abc.def.ghi"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(response).await.starts_with("Invalid token"));
    }

    #[tokio::test]
    async fn test_superadmin_cannot_register() {
        let (app, state) = app();
        let id = Uuid::new_v4();
        let path = format!("/contests/register/{}", id);

        let response = app
            .oneshot(with_auth("POST", &path, &bearer(&state, "root@x.com", "superadmin")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_string(response).await,
            format!("Access forbidden for route: {}", path)
        );
    }

    #[tokio::test]
    async fn test_user_cannot_update_someone_else() {
        let (app, state) = app();

        let response = app
            .oneshot(with_auth(
                "POST",
                "/users/update/bob@x.com",
                &bearer(&state, "alice@x.com", "user"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_string(response).await,
            "Permission denied: you can only update your own details"
        );
    }

    #[tokio::test]
    async fn test_admitted_request_reaches_handler() {
        let (app, state) = app();

        // Not a contest id, so the handler rejects it before touching the database
        let response = app
            .oneshot(with_auth(
                "POST",
                "/contests/register/64f1",
                &bearer(&state, "bob@x.com", "user"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.contains("Invalid contest ID"));
    }

    #[tokio::test]
    async fn test_exempt_route_ignores_bad_header() {
        let (app, _) = app();

        let response = app
            .oneshot(with_auth("GET", "/contests/leaderboard", "Bearer garbage"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.contains("Missing contest ID"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (app, state) = app();

        let response = app
            .oneshot(with_auth("GET", "/nowhere", &bearer(&state, "alice@x.com", "user")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sign_in_with_rejected_token() {
        let mut verifier = MockIdentityVerifier::new();
        verifier
            .expect_verify()
            .withf(|email, token| email.to_string() == "alice@x.com" && token.to_string() == "ya29.bad")
            .times(1)
            .returning(|_, _| false);
        let app = build_router(test_state(verifier));

        let request = Request::post("/create")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"alice@x.com","token":"ya29.bad"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.contains("User token not valid"));
    }
}
