//! 회원/인증 API 통합 테스트
//!
//! - POST /members, GET /members
//! - POST /login, GET /login/check, POST /logout
//! - GET /health

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;

use common::{get, post_json, setup, ADMIN_EMAIL, PASSWORD, USER_EMAIL};

#[tokio::test]
async fn should_signup_and_login_with_cookie() {
    // Arrange
    let app = setup().await;
    let signup = json!({ "name": "브라운", "email": USER_EMAIL, "password": PASSWORD });
    let (signup_status, headers, signup_body) =
        app.send(post_json("/members", None, signup)).await;

    // Act
    let (status, login_headers, body) = app
        .send(post_json(
            "/login",
            None,
            json!({ "email": USER_EMAIL, "password": PASSWORD }),
        ))
        .await;

    // Assert
    assert_eq!(signup_status, StatusCode::CREATED);
    let member_id = signup_body["result"]["id"].as_i64().unwrap();
    assert_eq!(
        headers[header::LOCATION],
        format!("/members/{}", member_id).as_str()
    );
    assert_eq!(signup_body["result"]["role"], "USER");
    assert!(signup_body["result"].get("password").is_none());

    assert_eq!(status, StatusCode::OK);
    let token = body["result"]["accessToken"].as_str().unwrap();
    let cookie = login_headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("access_token={}", token)));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn should_check_login_with_cookie() {
    // Arrange
    let app = setup().await;
    let user = app.seed_user().await;
    let token = app.token_for(&user);
    let request = Request::builder()
        .method(Method::GET)
        .uri("/login/check")
        .header(header::COOKIE, format!("theme=dark; access_token={}", token))
        .body(Body::empty())
        .unwrap();

    // Act
    let (status, _, body) = app.send(request).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["id"], user.id);
    assert_eq!(body["result"]["name"], "브라운");
    assert_eq!(body["result"]["role"], "USER");
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_email_alike() {
    // Arrange
    let app = setup().await;
    app.seed_user().await;

    // Act
    let (wrong_status, _, wrong_body) = app
        .send(post_json(
            "/login",
            None,
            json!({ "email": USER_EMAIL, "password": "wrong-password" }),
        ))
        .await;
    let (unknown_status, _, unknown_body) = app
        .send(post_json(
            "/login",
            None,
            json!({ "email": "nobody@email.com", "password": PASSWORD }),
        ))
        .await;

    // Assert
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["code"], "AUTH4011");
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["message"], unknown_body["message"]);
}

#[tokio::test]
async fn should_reject_duplicate_email_signup() {
    // Arrange
    let app = setup().await;
    app.seed_user().await;
    let signup = json!({ "name": "브라운2", "email": USER_EMAIL, "password": PASSWORD });

    // Act
    let (status, _, body) = app.send(post_json("/members", None, signup)).await;

    // Assert
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "MEMBER4091");
}

#[tokio::test]
async fn should_guard_admin_routes_by_role() {
    // Arrange
    let app = setup().await;
    let admin = app.seed_admin().await;
    let user = app.seed_user().await;

    // Act
    let (anonymous, _, anonymous_body) = app.send(get("/members", None)).await;
    let (as_user, _, _) = app
        .send(get("/members", Some(&app.token_for(&user))))
        .await;
    let (as_admin, _, admin_body) = app
        .send(get("/members", Some(&app.token_for(&admin))))
        .await;

    // Assert
    assert_eq!(anonymous, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous_body["code"], "AUTH4001");
    assert_eq!(as_user, StatusCode::FORBIDDEN);
    assert_eq!(as_admin, StatusCode::OK);
    let emails: Vec<&str> = admin_body["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec![ADMIN_EMAIL, USER_EMAIL]);
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    // Arrange
    let app = setup().await;
    let user = app.seed_user().await;
    let forged = roomescape::utils::jwt::encode_access_token(
        user.id,
        roomescape::domain::member::entity::member::Role::Admin,
        "other-secret",
        3600,
    )
    .unwrap();

    // Act
    let (status, _, _) = app.send(get("/members", Some(&forged))).await;

    // Assert
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_clear_cookie_on_logout() {
    // Arrange
    let app = setup().await;

    // Act
    let (status, headers, _) = app.send(post_json("/logout", None, json!({}))).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let cookie = headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("access_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn should_report_healthy_database() {
    // Arrange
    let app = setup().await;

    // Act
    let (status, headers, body) = app.send(get("/health", None)).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], true);
    assert!(headers.contains_key("x-request-id"));
}
