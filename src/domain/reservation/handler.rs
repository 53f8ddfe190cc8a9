use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{
    CreateReservationRequest, DeleteReservationResponse, MyReservationResponse,
    ReservationResponse,
};
use super::service::ReservationService;
use crate::state::AppState;
use crate::utils::auth::{AdminMember, AuthMember};
use crate::utils::error::AppError;
#[allow(unused_imports)]
use crate::utils::ErrorResponse;
use crate::utils::BaseResponse;

/// 전체 예약 조회 API
#[utoipa::path(
    get,
    path = "/reservations",
    responses(
        (status = 200, description = "예약 목록 조회 성공", body = [ReservationResponse])
    ),
    tag = "Reservation"
)]
pub async fn get_reservations(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<Vec<ReservationResponse>>>, AppError> {
    let reservations = ReservationService::get_reservations(&state).await?;

    Ok(Json(BaseResponse::success(reservations)))
}

/// 예약 생성 API
///
/// 로그인한 회원 명의로 예약을 생성합니다.
#[utoipa::path(
    post,
    path = "/reservations",
    request_body = CreateReservationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "예약 생성 성공", body = ReservationResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 시간/테마", body = ErrorResponse),
        (status = 409, description = "이미 예약된 시간", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    member: AuthMember,
    payload: Result<Json<CreateReservationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let member_id = member.member_id()?;
    let reservation = ReservationService::create_reservation(&state, member_id, req).await?;
    let location = format!("/reservations/{}", reservation.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BaseResponse::created(reservation)),
    ))
}

/// 내 예약 조회 API
#[utoipa::path(
    get,
    path = "/reservations-mine",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "내 예약 조회 성공", body = [MyReservationResponse]),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn get_my_reservations(
    State(state): State<AppState>,
    member: AuthMember,
) -> Result<Json<BaseResponse<Vec<MyReservationResponse>>>, AppError> {
    let member_id = member.member_id()?;
    let reservations = ReservationService::get_my_reservations(&state, member_id).await?;

    Ok(Json(BaseResponse::success(reservations)))
}

/// 예약 삭제 API (관리자)
#[utoipa::path(
    delete,
    path = "/reservations/{reservation_id}",
    params(
        ("reservation_id" = i64, Path, description = "삭제할 예약 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "예약 삭제 성공", body = DeleteReservationResponse),
        (status = 403, description = "관리자 권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 예약", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    _admin: AdminMember,
    Path(reservation_id): Path<i64>,
) -> Result<Json<BaseResponse<DeleteReservationResponse>>, AppError> {
    ReservationService::delete_reservation(&state, reservation_id).await?;

    Ok(Json(BaseResponse::success(DeleteReservationResponse {
        reservation_id,
    })))
}
