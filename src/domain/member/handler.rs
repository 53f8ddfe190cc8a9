use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use super::dto::{MemberResponse, SignupRequest};
use super::service::MemberService;
use crate::state::AppState;
use crate::utils::auth::AdminMember;
use crate::utils::error::AppError;
#[allow(unused_imports)]
use crate::utils::ErrorResponse;
use crate::utils::BaseResponse;

/// 회원가입 API
#[utoipa::path(
    post,
    path = "/members",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "회원가입 성공", body = MemberResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 409, description = "이미 가입된 이메일", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let member = MemberService::signup(&state, req).await?;
    let location = format!("/members/{}", member.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BaseResponse::created(member)),
    ))
}

/// 회원 목록 조회 API (관리자)
#[utoipa::path(
    get,
    path = "/members",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "회원 목록 조회 성공", body = [MemberResponse]),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 403, description = "관리자 권한 없음", body = ErrorResponse)
    ),
    tag = "Member"
)]
pub async fn get_members(
    State(state): State<AppState>,
    _admin: AdminMember,
) -> Result<Json<BaseResponse<Vec<MemberResponse>>>, AppError> {
    let members = MemberService::get_members(&state).await?;

    Ok(Json(BaseResponse::success(members)))
}
