use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{
    AvailableTimeQuery, AvailableTimeResponse, CreateReservationTimeRequest,
    DeleteReservationTimeResponse, ReservationTimeResponse,
};
use super::service::ReservationTimeService;
use crate::state::AppState;
use crate::utils::auth::AdminMember;
use crate::utils::error::AppError;
#[allow(unused_imports)]
use crate::utils::ErrorResponse;
use crate::utils::BaseResponse;

/// 예약 시간 목록 조회 API
#[utoipa::path(
    get,
    path = "/times",
    responses(
        (status = 200, description = "예약 시간 목록 조회 성공", body = [ReservationTimeResponse])
    ),
    tag = "ReservationTime"
)]
pub async fn get_times(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<Vec<ReservationTimeResponse>>>, AppError> {
    let times = ReservationTimeService::get_times(&state).await?;

    Ok(Json(BaseResponse::success(times)))
}

/// 예약 시간 생성 API (관리자)
#[utoipa::path(
    post,
    path = "/times",
    request_body = CreateReservationTimeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "예약 시간 생성 성공", body = ReservationTimeResponse),
        (status = 400, description = "잘못된 시간 형식", body = ErrorResponse),
        (status = 409, description = "이미 등록된 시간", body = ErrorResponse)
    ),
    tag = "ReservationTime"
)]
pub async fn create_time(
    State(state): State<AppState>,
    _admin: AdminMember,
    payload: Result<Json<CreateReservationTimeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let time = ReservationTimeService::create_time(&state, req).await?;
    let location = format!("/times/{}", time.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BaseResponse::created(time)),
    ))
}

/// 예약 시간 삭제 API (관리자)
#[utoipa::path(
    delete,
    path = "/times/{time_id}",
    params(
        ("time_id" = i64, Path, description = "삭제할 예약 시간 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "예약 시간 삭제 성공", body = DeleteReservationTimeResponse),
        (status = 404, description = "존재하지 않는 예약 시간", body = ErrorResponse),
        (status = 409, description = "예약이 참조 중인 시간", body = ErrorResponse)
    ),
    tag = "ReservationTime"
)]
pub async fn delete_time(
    State(state): State<AppState>,
    _admin: AdminMember,
    Path(time_id): Path<i64>,
) -> Result<Json<BaseResponse<DeleteReservationTimeResponse>>, AppError> {
    ReservationTimeService::delete_time(&state, time_id).await?;

    Ok(Json(BaseResponse::success(DeleteReservationTimeResponse {
        time_id,
    })))
}

/// 예약 가능 시간 조회 API
///
/// 지정한 날짜와 테마에 대해 모든 시간대의 예약 여부를 반환합니다.
#[utoipa::path(
    get,
    path = "/times/available",
    params(AvailableTimeQuery),
    responses(
        (status = 200, description = "예약 가능 시간 조회 성공", body = [AvailableTimeResponse]),
        (status = 400, description = "잘못된 요청 파라미터", body = ErrorResponse)
    ),
    tag = "ReservationTime"
)]
pub async fn get_available_times(
    State(state): State<AppState>,
    query: Result<Query<AvailableTimeQuery>, QueryRejection>,
) -> Result<Json<BaseResponse<Vec<AvailableTimeResponse>>>, AppError> {
    let Query(params) = query?;

    let times =
        ReservationTimeService::get_available_times(&state, params.date, params.theme_id).await?;

    Ok(Json(BaseResponse::success(times)))
}
