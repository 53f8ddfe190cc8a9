use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::member::entity::member;
use crate::domain::reservation_time::dto::ReservationTimeResponse;
use crate::domain::theme::dto::ThemeResponse;

/// 날짜 표기 형식 (YYYY-MM-DD)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 내 예약 상태 표기
pub const RESERVED_STATUS: &str = "예약";

/// 예약 생성 요청
///
/// 예약자는 요청 본문이 아닌 인증 정보로 결정됩니다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    /// 예약 날짜 (YYYY-MM-DD)
    #[schema(example = "2026-10-20")]
    #[validate(length(min = 1, message = "예약 날짜는 필수입니다."))]
    pub date: String,
    #[validate(range(min = 1, message = "예약 시간 ID가 올바르지 않습니다."))]
    pub time_id: i64,
    #[validate(range(min = 1, message = "테마 ID가 올바르지 않습니다."))]
    pub theme_id: i64,
}

/// 예약자 요약 정보
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationMemberResponse {
    pub id: i64,
    pub name: String,
}

impl From<member::Model> for ReservationMemberResponse {
    fn from(model: member::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// 예약 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: i64,
    #[schema(value_type = String, example = "2026-10-20")]
    pub date: NaiveDate,
    pub time: ReservationTimeResponse,
    pub theme: ThemeResponse,
    pub member: ReservationMemberResponse,
}

/// 내 예약 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyReservationResponse {
    pub reservation_id: i64,
    pub theme: String,
    #[schema(value_type = String, example = "2026-10-20")]
    pub date: NaiveDate,
    #[schema(example = "10:00")]
    pub time: String,
    #[schema(example = "예약")]
    pub status: String,
}

/// 예약 삭제 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReservationResponse {
    pub reservation_id: i64,
}
