use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::IntoResponse,
    Json,
};
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{LoginCheckResponse, LoginRequest, LoginResponse};
use super::service::AuthService;
use crate::state::AppState;
use crate::utils::auth::AuthMember;
use crate::utils::cookie::{clear_access_token_cookie, create_access_token_cookie};
use crate::utils::error::AppError;
#[allow(unused_imports)]
use crate::utils::ErrorResponse;
use crate::utils::BaseResponse;

/// 로그인 API
///
/// 성공 시 Access Token을 응답 본문과 `access_token` 쿠키로 함께 반환합니다.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = LoginResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "이메일 또는 비밀번호 불일치", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = AuthService::login(&state, req).await?;
    let cookie = create_access_token_cookie(&result.access_token, state.config.jwt_expiration)?;

    Ok(([(SET_COOKIE, cookie)], Json(BaseResponse::success(result))))
}

/// 로그인 상태 확인 API
#[utoipa::path(
    get,
    path = "/login/check",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "로그인 회원 정보", body = LoginCheckResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login_check(
    State(state): State<AppState>,
    member: AuthMember,
) -> Result<Json<BaseResponse<LoginCheckResponse>>, AppError> {
    let member_id = member.member_id()?;

    let result = AuthService::check(&state, member_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 로그아웃 API
///
/// `access_token` 쿠키를 만료시킵니다.
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "로그아웃 성공")
    ),
    tag = "Auth"
)]
pub async fn logout() -> Result<impl IntoResponse, AppError> {
    let cookie = clear_access_token_cookie()?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(BaseResponse::<()>::success_message("로그아웃되었습니다.")),
    ))
}
