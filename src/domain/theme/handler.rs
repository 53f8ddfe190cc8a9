use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Local;
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{CreateThemeRequest, DeleteThemeResponse, PopularThemeResponse, ThemeResponse};
use super::service::ThemeService;
use crate::state::AppState;
use crate::utils::auth::AdminMember;
use crate::utils::error::AppError;
#[allow(unused_imports)]
use crate::utils::ErrorResponse;
use crate::utils::BaseResponse;

/// 테마 목록 조회 API
#[utoipa::path(
    get,
    path = "/themes",
    responses(
        (status = 200, description = "테마 목록 조회 성공", body = [ThemeResponse])
    ),
    tag = "Theme"
)]
pub async fn get_themes(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<Vec<ThemeResponse>>>, AppError> {
    let themes = ThemeService::get_themes(&state).await?;

    Ok(Json(BaseResponse::success(themes)))
}

/// 테마 생성 API (관리자)
#[utoipa::path(
    post,
    path = "/themes",
    request_body = CreateThemeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "테마 생성 성공", body = ThemeResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 403, description = "관리자 권한 없음", body = ErrorResponse)
    ),
    tag = "Theme"
)]
pub async fn create_theme(
    State(state): State<AppState>,
    _admin: AdminMember,
    payload: Result<Json<CreateThemeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let theme = ThemeService::create_theme(&state, req).await?;
    let location = format!("/themes/{}", theme.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BaseResponse::created(theme)),
    ))
}

/// 테마 삭제 API (관리자)
///
/// 예약이 존재하는 테마는 삭제할 수 없습니다.
#[utoipa::path(
    delete,
    path = "/themes/{theme_id}",
    params(
        ("theme_id" = i64, Path, description = "삭제할 테마 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "테마 삭제 성공", body = DeleteThemeResponse),
        (status = 404, description = "존재하지 않는 테마", body = ErrorResponse),
        (status = 409, description = "예약이 참조 중인 테마", body = ErrorResponse)
    ),
    tag = "Theme"
)]
pub async fn delete_theme(
    State(state): State<AppState>,
    _admin: AdminMember,
    Path(theme_id): Path<i64>,
) -> Result<Json<BaseResponse<DeleteThemeResponse>>, AppError> {
    ThemeService::delete_theme(&state, theme_id).await?;

    Ok(Json(BaseResponse::success(DeleteThemeResponse { theme_id })))
}

/// 인기 테마 조회 API
///
/// 오늘을 제외한 최근 7일간 예약이 많은 테마를 최대 10개까지 반환합니다.
#[utoipa::path(
    get,
    path = "/themes/popular",
    responses(
        (status = 200, description = "인기 테마 조회 성공", body = [PopularThemeResponse])
    ),
    tag = "Theme"
)]
pub async fn get_popular_themes(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<Vec<PopularThemeResponse>>>, AppError> {
    let today = Local::now().date_naive();
    let themes = ThemeService::get_popular_themes(&state, today).await?;

    Ok(Json(BaseResponse::success(themes)))
}
