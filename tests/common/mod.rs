//! 통합 테스트 공용 픽스처
//!
//! 테스트마다 인메모리 SQLite DB와 실제 라우터를 새로 구성합니다.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate, NaiveTime};
use http_body_util::BodyExt;
use roomescape::config::{establish_connection, AppConfig};
use roomescape::domain::member::entity::member::{self, Role};
use roomescape::domain::reservation::entity::reservation;
use roomescape::domain::reservation_time::entity::reservation_time;
use roomescape::domain::theme::entity::theme;
use roomescape::utils::jwt::encode_access_token;
use roomescape::utils::password::hash_password;
use roomescape::{app, AppState};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::util::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret";
pub const ADMIN_EMAIL: &str = "admin@email.com";
pub const USER_EMAIL: &str = "brown@email.com";
pub const OTHER_EMAIL: &str = "neo@email.com";
pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

pub async fn setup() -> TestApp {
    let config = AppConfig::for_test(TEST_JWT_SECRET);
    let db = establish_connection(&config.database_url, true)
        .await
        .expect("in-memory database should be available");

    let state = AppState { db, config };
    let router = app(state.clone());

    TestApp { state, router }
}

impl TestApp {
    /// 요청을 보내고 (상태 코드, 헤더, JSON 본문)을 반환합니다.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, headers, body)
    }

    pub async fn seed_member(&self, name: &str, email: &str, role: Role) -> member::Model {
        member::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password: Set(hash_password(PASSWORD).unwrap()),
            role: Set(role),
            ..Default::default()
        }
        .insert(&self.state.db)
        .await
        .unwrap()
    }

    pub async fn seed_admin(&self) -> member::Model {
        self.seed_member("어드민", ADMIN_EMAIL, Role::Admin).await
    }

    pub async fn seed_user(&self) -> member::Model {
        self.seed_member("브라운", USER_EMAIL, Role::User).await
    }

    pub fn token_for(&self, member: &member::Model) -> String {
        encode_access_token(member.id, member.role, TEST_JWT_SECRET, 3600).unwrap()
    }

    pub async fn seed_theme(&self, name: &str) -> theme::Model {
        theme::ActiveModel {
            name: Set(name.to_string()),
            description: Set(format!("{} 설명", name)),
            thumbnail: Set("https://i.pinimg.com/236x/6e/bc/46/6ebc461a94a49f9ea3b8bbe2204145d4.jpg".to_string()),
            ..Default::default()
        }
        .insert(&self.state.db)
        .await
        .unwrap()
    }

    pub async fn seed_themes(&self, count: usize) -> Vec<theme::Model> {
        let mut themes = Vec::with_capacity(count);
        for i in 1..=count {
            themes.push(self.seed_theme(&format!("테마{}", i)).await);
        }
        themes
    }

    pub async fn seed_time(&self, start_at: &str) -> reservation_time::Model {
        reservation_time::ActiveModel {
            start_at: Set(NaiveTime::parse_from_str(start_at, "%H:%M").unwrap()),
            ..Default::default()
        }
        .insert(&self.state.db)
        .await
        .unwrap()
    }

    pub async fn seed_times(&self) -> Vec<reservation_time::Model> {
        let mut times = Vec::new();
        for start_at in ["10:00", "11:00", "12:00", "13:00"] {
            times.push(self.seed_time(start_at).await);
        }
        times
    }

    pub async fn seed_reservation(
        &self,
        date: NaiveDate,
        time_id: i64,
        theme_id: i64,
        member_id: i64,
    ) -> reservation::Model {
        reservation::ActiveModel {
            date: Set(date),
            time_id: Set(time_id),
            theme_id: Set(theme_id),
            member_id: Set(member_id),
            ..Default::default()
        }
        .insert(&self.state.db)
        .await
        .unwrap()
    }

    /// 인기 테마 시나리오
    ///
    /// 테마 15개, 시간 4개를 만들고 최근 일주일 예약 수가
    /// 테마1(3) > 테마2(2) > 테마10(1)이 되도록 예약합니다.
    /// 테마5는 오늘, 테마15는 8일 전에 4건씩 예약해 집계 구간 밖에 둡니다.
    pub async fn seed_popular_scenario(&self, today: NaiveDate) {
        let member = self.seed_user().await;
        let themes = self.seed_themes(15).await;
        let times = self.seed_times().await;
        let days_ago = |days: i64| today - Duration::days(days);

        for days in 1..=3 {
            self.seed_reservation(days_ago(days), times[0].id, themes[0].id, member.id)
                .await;
        }
        for days in [1, 7] {
            self.seed_reservation(days_ago(days), times[1].id, themes[1].id, member.id)
                .await;
        }
        self.seed_reservation(days_ago(4), times[2].id, themes[9].id, member.id)
            .await;

        for time in &times {
            self.seed_reservation(today, time.id, themes[4].id, member.id)
                .await;
            self.seed_reservation(days_ago(8), time.id, themes[14].id, member.id)
                .await;
        }
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, token, Body::empty())
}

pub fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::DELETE, uri, token, Body::empty())
}

pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(body).unwrap()
}
