//! End-to-end authentication flows against an ephemeral PostgreSQL
//! instance: signup, login, refresh, logout, and the cookie handling
//! around them.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{TestApp, body_json, cookie_value, post_json, request, send};

/// The raw Set-Cookie header for one cookie, attributes included.
fn raw_set_cookie(resp: &axum::response::Response, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    resp.headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(|v| v.to_string())
}

#[tokio::test]
async fn signup_login_refresh_logout_scenario() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    // Signup creates the account, opens a session, and sets both cookies.
    let resp = send(
        &app.router,
        post_json(
            "/api/auth/signup",
            &json!({"name": "Ann", "email": "a@x.com", "password": "pw"}),
            &[],
        ),
    )
    .await;
    assert_eq!(StatusCode::CREATED, resp.status());
    let access = cookie_value(&resp, "storefront_access").expect("access cookie");
    let raw = raw_set_cookie(&resp, "storefront_access").expect("raw access cookie");
    assert!(raw.contains("HttpOnly"));
    assert!(raw.contains("SameSite=Strict"));
    assert!(raw.contains("Path=/"));
    let raw = raw_set_cookie(&resp, "storefront_refresh").expect("raw refresh cookie");
    assert!(raw.contains("HttpOnly"));
    let body = body_json(resp).await;
    assert_eq!("Ann", body["name"]);
    assert_eq!("a@x.com", body["email"]);
    assert_eq!("user", body["role"]);
    assert!(body["id"].is_string());
    assert!(body.get("passwordHash").is_none());

    // A second signup with the same email is rejected.
    let resp = send(
        &app.router,
        post_json(
            "/api/auth/signup",
            &json!({"name": "Ann Again", "email": "a@x.com", "password": "pw"}),
            &[],
        ),
    )
    .await;
    assert_eq!(StatusCode::BAD_REQUEST, resp.status());
    let body = body_json(resp).await;
    assert_eq!("conflict", body["error"]);
    assert_eq!("User already exists", body["message"]);

    // The signup cookies authenticate the profile route.
    let resp = send(
        &app.router,
        request("GET", "/api/auth/profile", &[access.clone()]),
    )
    .await;
    assert_eq!(StatusCode::OK, resp.status());
    let body = body_json(resp).await;
    assert_eq!("a@x.com", body["email"]);

    // Login opens a fresh session with new cookies.
    let resp = send(
        &app.router,
        post_json(
            "/api/auth/login",
            &json!({"email": "a@x.com", "password": "pw"}),
            &[],
        ),
    )
    .await;
    assert_eq!(StatusCode::OK, resp.status());
    assert!(cookie_value(&resp, "storefront_access").is_some());
    let refresh = cookie_value(&resp, "storefront_refresh").expect("refresh cookie");
    let body = body_json(resp).await;
    assert_eq!("Ann", body["name"]);

    // Refresh mints a new access cookie and leaves the refresh cookie alone.
    let resp = send(
        &app.router,
        post_json("/api/auth/refresh-token", &json!({}), &[refresh.clone()]),
    )
    .await;
    assert_eq!(StatusCode::OK, resp.status());
    let access = cookie_value(&resp, "storefront_access").expect("new access cookie");
    assert!(cookie_value(&resp, "storefront_refresh").is_none());
    let body = body_json(resp).await;
    assert_eq!("Token refreshed successfully", body["message"]);

    // The refreshed access cookie works.
    let resp = send(
        &app.router,
        request("GET", "/api/auth/profile", &[access.clone()]),
    )
    .await;
    assert_eq!(StatusCode::OK, resp.status());

    // Logout clears both cookies and the session.
    let resp = send(
        &app.router,
        post_json("/api/auth/logout", &json!({}), &[access, refresh.clone()]),
    )
    .await;
    assert_eq!(StatusCode::OK, resp.status());
    let cleared = raw_set_cookie(&resp, "storefront_access").expect("cleared access cookie");
    assert!(cleared.contains("Max-Age=0"));
    let cleared = raw_set_cookie(&resp, "storefront_refresh").expect("cleared refresh cookie");
    assert!(cleared.contains("Max-Age=0"));
    let body = body_json(resp).await;
    assert_eq!("Logged out successfully", body["message"]);

    // The logged-out refresh token no longer refreshes.
    let resp = send(
        &app.router,
        post_json("/api/auth/refresh-token", &json!({}), &[refresh]),
    )
    .await;
    assert_eq!(StatusCode::UNAUTHORIZED, resp.status());

    // Logout without a session is still fine.
    let resp = send(&app.router, post_json("/api/auth/logout", &json!({}), &[])).await;
    assert_eq!(StatusCode::OK, resp.status());

    app.stop().await;
}

#[tokio::test]
async fn login_with_wrong_credentials_is_unauthorized() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let resp = send(
        &app.router,
        post_json(
            "/api/auth/signup",
            &json!({"name": "Bea", "email": "b@x.com", "password": "hunter2"}),
            &[],
        ),
    )
    .await;
    assert_eq!(StatusCode::CREATED, resp.status());

    // Wrong password and unknown email produce the same response.
    for creds in [
        json!({"email": "b@x.com", "password": "wrong"}),
        json!({"email": "nobody@x.com", "password": "hunter2"}),
    ] {
        let resp = send(&app.router, post_json("/api/auth/login", &creds, &[])).await;
        assert_eq!(StatusCode::UNAUTHORIZED, resp.status());
        let body = body_json(resp).await;
        assert_eq!("Invalid credentials", body["message"]);
    }

    app.stop().await;
}

#[tokio::test]
async fn profile_requires_a_valid_access_cookie() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let resp = send(&app.router, request("GET", "/api/auth/profile", &[])).await;
    assert_eq!(StatusCode::UNAUTHORIZED, resp.status());

    let resp = send(
        &app.router,
        request(
            "GET",
            "/api/auth/profile",
            &["storefront_access=not-a-token".to_string()],
        ),
    )
    .await;
    assert_eq!(StatusCode::UNAUTHORIZED, resp.status());

    // Refresh without its cookie is rejected up front.
    let resp = send(
        &app.router,
        post_json("/api/auth/refresh-token", &json!({}), &[]),
    )
    .await;
    assert_eq!(StatusCode::UNAUTHORIZED, resp.status());
    let body = body_json(resp).await;
    assert_eq!("Missing refresh token", body["message"]);

    app.stop().await;
}

#[tokio::test]
async fn second_login_displaces_the_first_session() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let resp = send(
        &app.router,
        post_json(
            "/api/auth/signup",
            &json!({"name": "Cal", "email": "c@x.com", "password": "pw"}),
            &[],
        ),
    )
    .await;
    assert_eq!(StatusCode::CREATED, resp.status());
    let first_refresh = cookie_value(&resp, "storefront_refresh").expect("refresh cookie");

    // Claims carry whole-second timestamps; space the logins apart so
    // the second session mints a distinct token.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let resp = send(
        &app.router,
        post_json(
            "/api/auth/login",
            &json!({"email": "c@x.com", "password": "pw"}),
            &[],
        ),
    )
    .await;
    assert_eq!(StatusCode::OK, resp.status());
    let second_refresh = cookie_value(&resp, "storefront_refresh").expect("refresh cookie");

    // Only the newest session's token refreshes.
    let resp = send(
        &app.router,
        post_json("/api/auth/refresh-token", &json!({}), &[first_refresh]),
    )
    .await;
    assert_eq!(StatusCode::UNAUTHORIZED, resp.status());

    let resp = send(
        &app.router,
        post_json("/api/auth/refresh-token", &json!({}), &[second_refresh]),
    )
    .await;
    assert_eq!(StatusCode::OK, resp.status());

    app.stop().await;
}
