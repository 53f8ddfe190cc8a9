//! 테마 API 통합 테스트
//!
//! - GET/POST /themes
//! - DELETE /themes/:theme_id
//! - GET /themes/popular

mod common;

use axum::http::{header, StatusCode};
use chrono::Local;
use serde_json::json;

use common::{delete, get, post_json, setup};

#[tokio::test]
async fn should_delete_unreferenced_theme() {
    // Arrange
    let app = setup().await;
    app.seed_popular_scenario(Local::now().date_naive()).await;
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);

    // Act
    let (status, _, body) = app.send(delete("/themes/3", Some(&token))).await;
    let (_, _, themes) = app.send(get("/themes", None)).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["themeId"], 3);
    let remaining = themes["result"].as_array().unwrap();
    assert_eq!(remaining.len(), 14);
    assert!(remaining.iter().all(|t| t["id"] != 3));
}

#[tokio::test]
async fn should_reject_deleting_referenced_theme_and_keep_data() {
    // Arrange
    let app = setup().await;
    app.seed_popular_scenario(Local::now().date_naive()).await;
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);
    let (_, _, before) = app.send(get("/reservations", None)).await;

    // Act
    let (status, _, body) = app.send(delete("/themes/1", Some(&token))).await;

    // Assert
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "COMMON4091");
    let (_, _, themes) = app.send(get("/themes", None)).await;
    let (_, _, after) = app.send(get("/reservations", None)).await;
    assert_eq!(themes["result"].as_array().unwrap().len(), 15);
    assert_eq!(before["result"], after["result"]);
}

#[tokio::test]
async fn should_return_not_found_when_deleting_missing_theme() {
    // Arrange
    let app = setup().await;
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);

    // Act
    let (status, _, body) = app.send(delete("/themes/999", Some(&token))).await;

    // Assert
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "THEME4041");
}

#[tokio::test]
async fn should_rank_popular_themes_within_last_week() {
    // Arrange
    let app = setup().await;
    app.seed_popular_scenario(Local::now().date_naive()).await;

    // Act
    let (status, _, body) = app.send(get("/themes/popular", None)).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let popular = body["result"].as_array().unwrap();
    let ids: Vec<i64> = popular.iter().map(|t| t["id"].as_i64().unwrap()).collect();
    assert!(popular.len() <= 10);
    assert_eq!(ids, vec![1, 2, 10]);
    assert_eq!(popular[0]["reservationCount"], 3);
    assert_eq!(popular[1]["reservationCount"], 2);
}

#[tokio::test]
async fn should_limit_popular_themes_to_ten_and_break_ties_by_id() {
    // Arrange
    let app = setup().await;
    let member = app.seed_user().await;
    let themes = app.seed_themes(12).await;
    let time = app.seed_time("10:00").await;
    let yesterday = Local::now().date_naive() - chrono::Duration::days(1);
    for theme in themes.iter().rev() {
        app.seed_reservation(yesterday, time.id, theme.id, member.id)
            .await;
    }

    // Act
    let (_, _, body) = app.send(get("/themes/popular", None)).await;

    // Assert
    let ids: Vec<i64> = body["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
}

#[tokio::test]
async fn should_create_theme_as_admin() {
    // Arrange
    let app = setup().await;
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);
    let request = json!({
        "name": "레벨2 탈출",
        "description": "우테코 레벨2를 탈출하는 내용입니다.",
        "thumbnail": "https://example.com/level2.jpg"
    });

    // Act
    let (status, headers, body) = app
        .send(post_json("/themes", Some(&token), request))
        .await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    let id = body["result"]["id"].as_i64().unwrap();
    assert_eq!(headers[header::LOCATION], format!("/themes/{}", id).as_str());
    assert_eq!(body["result"]["name"], "레벨2 탈출");
}

#[tokio::test]
async fn should_forbid_theme_creation_for_user() {
    // Arrange
    let app = setup().await;
    let user = app.seed_user().await;
    let token = app.token_for(&user);
    let request = json!({
        "name": "레벨2 탈출",
        "description": "설명",
        "thumbnail": "https://example.com/level2.jpg"
    });

    // Act
    let (status, _, body) = app
        .send(post_json("/themes", Some(&token), request))
        .await;

    // Assert
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "COMMON403");
}

#[tokio::test]
async fn should_reject_theme_with_invalid_thumbnail() {
    // Arrange
    let app = setup().await;
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);
    let request = json!({
        "name": "레벨2 탈출",
        "description": "설명",
        "thumbnail": "not a url"
    });

    // Act
    let (status, _, body) = app
        .send(post_json("/themes", Some(&token), request))
        .await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "COMMON400");
}
