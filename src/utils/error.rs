use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use std::fmt;
use tracing::{error, warn};

use super::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    InternalError(String),
    ValidationError(String),
    JsonParseFailed(String),
    QueryParseFailed(String),

    // 인증
    LoginFailed(String),

    // 리소스 없음
    MemberNotFound(String),
    ThemeNotFound(String),
    ReservationTimeNotFound(String),
    ReservationNotFound(String),

    // 충돌
    /// 예약이 참조 중인 테마/시간을 삭제하려는 경우
    ReferentialIntegrityViolation(String),
    DuplicateReservation(String),
    DuplicateReservationTime(String),
    DuplicateEmail(String),
}

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::InternalError(msg)
            | AppError::ValidationError(msg)
            | AppError::LoginFailed(msg)
            | AppError::MemberNotFound(msg)
            | AppError::ThemeNotFound(msg)
            | AppError::ReservationTimeNotFound(msg)
            | AppError::ReservationNotFound(msg)
            | AppError::ReferentialIntegrityViolation(msg)
            | AppError::DuplicateReservation(msg)
            | AppError::DuplicateReservationTime(msg)
            | AppError::DuplicateEmail(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("잘못된 요청 형식입니다: {}", msg),
            AppError::QueryParseFailed(msg) => format!("잘못된 요청 파라미터입니다: {}", msg),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::NotFound(_) => "COMMON404",
            AppError::Unauthorized(_) => "AUTH4001",
            AppError::Forbidden(_) => "COMMON403",
            AppError::InternalError(_) => "COMMON500",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::QueryParseFailed(_) => "COMMON400",
            AppError::LoginFailed(_) => "AUTH4011",
            AppError::MemberNotFound(_) => "MEMBER4041",
            AppError::ThemeNotFound(_) => "THEME4041",
            AppError::ReservationTimeNotFound(_) => "TIME4041",
            AppError::ReservationNotFound(_) => "RESERVATION4041",
            AppError::ReferentialIntegrityViolation(_) => "COMMON4091",
            AppError::DuplicateReservation(_) => "RESERVATION4091",
            AppError::DuplicateReservationTime(_) => "TIME4091",
            AppError::DuplicateEmail(_) => "MEMBER4091",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::JsonParseFailed(_)
            | AppError::QueryParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::LoginFailed(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_)
            | AppError::MemberNotFound(_)
            | AppError::ThemeNotFound(_)
            | AppError::ReservationTimeNotFound(_)
            | AppError::ReservationNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ReferentialIntegrityViolation(_)
            | AppError::DuplicateReservation(_)
            | AppError::DuplicateReservationTime(_)
            | AppError::DuplicateEmail(_) => StatusCode::CONFLICT,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        // 에러 로깅
        match &self {
            AppError::InternalError(_) => {
                error!("Internal Server Error: {}", message);
            }
            _ => {
                warn!("Error [{}]: {}", error_code, message);
            }
        }

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

/// QueryRejection을 AppError로 변환
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::QueryParseFailed(rejection.body_text())
    }
}

/// validator 검증 실패를 AppError로 변환
///
/// 필드별 메시지 중 첫 번째 메시지를 사용합니다.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} 값이 올바르지 않습니다.", field))
                })
            })
            .next()
            .unwrap_or_else(|| "요청 값이 올바르지 않습니다.".to_string());

        AppError::ValidationError(message)
    }
}

/// 삭제 중 FK 제약 위반은 참조 무결성 에러로, 그 외는 내부 에러로 변환
pub fn map_reference_error(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::ReferentialIntegrityViolation(
            "예약에서 참조 중인 데이터는 삭제할 수 없습니다.".to_string(),
        ),
        _ => AppError::InternalError(e.to_string()),
    }
}

/// 삽입 중 유니크 제약 위반은 주어진 도메인 에러로, 그 외는 내부 에러로 변환
pub fn map_unique_error(e: DbErr, on_conflict: impl FnOnce() -> AppError) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => on_conflict(),
        _ => AppError::InternalError(e.to_string()),
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referential_integrity_violation_should_be_conflict() {
        let err = AppError::ReferentialIntegrityViolation("삭제 불가".to_string());

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "COMMON4091");
        assert_eq!(err.message(), "삭제 불가");
    }

    #[test]
    fn not_found_variants_should_map_to_404() {
        let errors = [
            AppError::ThemeNotFound(String::new()),
            AppError::ReservationTimeNotFound(String::new()),
            AppError::ReservationNotFound(String::new()),
            AppError::MemberNotFound(String::new()),
        ];

        for err in errors {
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn json_parse_failed_should_prefix_message() {
        let err = AppError::JsonParseFailed("missing field `name`".to_string());

        assert!(err.message().starts_with("잘못된 요청 형식입니다"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn login_failed_should_be_unauthorized() {
        let err = AppError::LoginFailed("로그인 실패".to_string());

        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "AUTH4011");
    }

    #[test]
    fn map_unique_error_should_keep_other_errors_internal() {
        let err = map_unique_error(DbErr::Custom("connection reset".to_string()), || {
            AppError::DuplicateEmail("중복".to_string())
        });

        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[tokio::test]
    async fn map_unique_error_should_convert_unique_violation_to_domain_error() {
        use crate::config::establish_connection;
        use crate::domain::reservation_time::entity::reservation_time;
        use chrono::NaiveTime;
        use sea_orm::{ActiveModelTrait, Set};

        let db = establish_connection("sqlite::memory:", true).await.unwrap();
        let start_at = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let new_time = || reservation_time::ActiveModel {
            start_at: Set(start_at),
            ..Default::default()
        };
        new_time().insert(&db).await.unwrap();

        let db_err = new_time().insert(&db).await.unwrap_err();
        let err = map_unique_error(db_err, || {
            AppError::DuplicateReservationTime("이미 등록된 예약 시간입니다.".to_string())
        });

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "TIME4091");
    }

    #[test]
    fn display_should_include_code_and_message() {
        let err = AppError::DuplicateReservation("이미 예약된 시간입니다.".to_string());

        assert_eq!(err.to_string(), "[RESERVATION4091] 이미 예약된 시간입니다.");
    }
}
