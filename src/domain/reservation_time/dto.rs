use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::reservation_time;

/// 시간 표기 형식 (HH:MM)
pub const TIME_FORMAT: &str = "%H:%M";

/// 예약 시간 생성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationTimeRequest {
    /// 시작 시간 (HH:MM)
    #[schema(example = "10:00")]
    #[validate(length(min = 1, message = "시작 시간은 필수입니다."))]
    pub start_at: String,
}

/// 예약 시간 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationTimeResponse {
    pub id: i64,
    #[schema(example = "10:00")]
    pub start_at: String,
}

impl From<reservation_time::Model> for ReservationTimeResponse {
    fn from(model: reservation_time::Model) -> Self {
        Self {
            id: model.id,
            start_at: model.start_at.format(TIME_FORMAT).to_string(),
        }
    }
}

/// 예약 가능 시간 조회 파라미터
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AvailableTimeQuery {
    /// 조회 날짜 (YYYY-MM-DD)
    pub date: NaiveDate,
    pub theme_id: i64,
}

/// 시간대별 예약 여부
#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTimeResponse {
    pub time_id: i64,
    #[schema(example = "10:00")]
    pub start_at: String,
    pub already_booked: bool,
}

/// 예약 시간 삭제 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReservationTimeResponse {
    pub time_id: i64,
}
