pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

pub use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::health::handler::health_check,
        domain::member::handler::signup,
        domain::member::handler::get_members,
        domain::auth::handler::login,
        domain::auth::handler::login_check,
        domain::auth::handler::logout,
        domain::theme::handler::get_themes,
        domain::theme::handler::create_theme,
        domain::theme::handler::delete_theme,
        domain::theme::handler::get_popular_themes,
        domain::reservation_time::handler::get_times,
        domain::reservation_time::handler::create_time,
        domain::reservation_time::handler::delete_time,
        domain::reservation_time::handler::get_available_times,
        domain::reservation::handler::get_reservations,
        domain::reservation::handler::create_reservation,
        domain::reservation::handler::get_my_reservations,
        domain::reservation::handler::delete_reservation,
    ),
    components(
        schemas(
            domain::health::dto::HealthStatus,
            domain::health::dto::HealthState,
            domain::health::dto::HealthChecks,
            domain::health::dto::CheckResult,
            domain::member::entity::member::Role,
            domain::member::dto::SignupRequest,
            domain::member::dto::MemberResponse,
            domain::auth::dto::LoginRequest,
            domain::auth::dto::LoginResponse,
            domain::auth::dto::LoginCheckResponse,
            domain::theme::dto::CreateThemeRequest,
            domain::theme::dto::ThemeResponse,
            domain::theme::dto::PopularThemeResponse,
            domain::theme::dto::DeleteThemeResponse,
            domain::reservation_time::dto::CreateReservationTimeRequest,
            domain::reservation_time::dto::ReservationTimeResponse,
            domain::reservation_time::dto::AvailableTimeResponse,
            domain::reservation_time::dto::DeleteReservationTimeResponse,
            domain::reservation::dto::CreateReservationRequest,
            domain::reservation::dto::ReservationMemberResponse,
            domain::reservation::dto::ReservationResponse,
            domain::reservation::dto::MyReservationResponse,
            domain::reservation::dto::DeleteReservationResponse,
            utils::response::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "헬스체크 API"),
        (name = "Member", description = "회원 API"),
        (name = "Auth", description = "인증 API"),
        (name = "Theme", description = "테마 API"),
        (name = "ReservationTime", description = "예약 시간 API"),
        (name = "Reservation", description = "예약 API")
    )
)]
pub struct ApiDoc;

/// `bearer_auth` 보안 스키마 등록
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(domain::health::health_check))
        .merge(member_routes())
        .merge(theme_routes())
        .merge(time_routes())
        .merge(reservation_routes())
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(
                    global::middleware::request_id_middleware,
                ))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn not_found() -> utils::error::AppError {
    utils::error::AppError::NotFound("요청한 리소스를 찾을 수 없습니다.".to_string())
}

/// 회원가입, 로그인
fn member_routes() -> Router<AppState> {
    use domain::{auth::handler as auth, member::handler as member};

    Router::new()
        .route("/members", post(member::signup).get(member::get_members))
        .route("/login", post(auth::login))
        .route("/login/check", get(auth::login_check))
        .route("/logout", post(auth::logout))
}

fn theme_routes() -> Router<AppState> {
    use domain::theme::handler;

    Router::new()
        .route("/themes", get(handler::get_themes).post(handler::create_theme))
        .route("/themes/popular", get(handler::get_popular_themes))
        .route("/themes/:theme_id", delete(handler::delete_theme))
}

fn time_routes() -> Router<AppState> {
    use domain::reservation_time::handler;

    Router::new()
        .route("/times", get(handler::get_times).post(handler::create_time))
        .route("/times/available", get(handler::get_available_times))
        .route("/times/:time_id", delete(handler::delete_time))
}

fn reservation_routes() -> Router<AppState> {
    use domain::reservation::handler;

    Router::new()
        .route(
            "/reservations",
            get(handler::get_reservations).post(handler::create_reservation),
        )
        .route("/reservations-mine", get(handler::get_my_reservations))
        .route("/reservations/:reservation_id", delete(handler::delete_reservation))
}
