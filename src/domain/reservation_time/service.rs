use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use super::dto::{
    AvailableTimeResponse, CreateReservationTimeRequest, ReservationTimeResponse, TIME_FORMAT,
};
use super::entity::reservation_time;
use crate::domain::reservation::entity::reservation;
use crate::state::AppState;
use crate::utils::error::{map_reference_error, map_unique_error, AppError};

pub struct ReservationTimeService;

impl ReservationTimeService {
    /// 전체 예약 시간 조회 (시작 시간 오름차순)
    pub async fn get_times(state: &AppState) -> Result<Vec<ReservationTimeResponse>, AppError> {
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let times = reservation_time::Entity::find()
            .order_by_asc(reservation_time::Column::StartAt)
            .order_by_asc(reservation_time::Column::Id)
            .all(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(times.into_iter().map(ReservationTimeResponse::from).collect())
    }

    /// 예약 시간 생성
    pub async fn create_time(
        state: &AppState,
        req: CreateReservationTimeRequest,
    ) -> Result<ReservationTimeResponse, AppError> {
        let start_at = Self::validate_and_parse_time(&req.start_at)?;

        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let duplicated = reservation_time::Entity::find()
            .filter(reservation_time::Column::StartAt.eq(start_at))
            .count(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if duplicated > 0 {
            return Err(duplicate_time(&req.start_at));
        }

        let saved = reservation_time::ActiveModel {
            start_at: Set(start_at),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| map_unique_error(e, || duplicate_time(&req.start_at)))?;

        txn.commit()
            .await
            .map_err(|e| map_unique_error(e, || duplicate_time(&req.start_at)))?;

        info!("Reservation time {} ({}) has been created", saved.id, req.start_at);

        Ok(ReservationTimeResponse::from(saved))
    }

    /// 예약 시간 삭제 (예약이 참조 중이면 삭제 불가)
    pub async fn delete_time(state: &AppState, time_id: i64) -> Result<(), AppError> {
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let exists = reservation_time::Entity::find_by_id(time_id)
            .one(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if exists.is_none() {
            return Err(AppError::ReservationTimeNotFound(
                "존재하지 않는 예약 시간입니다.".to_string(),
            ));
        }

        let reservation_count = reservation::Entity::find()
            .filter(reservation::Column::TimeId.eq(time_id))
            .count(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if reservation_count > 0 {
            return Err(AppError::ReferentialIntegrityViolation(
                "예약에 포함된 시간 정보는 삭제할 수 없습니다.".to_string(),
            ));
        }

        reservation_time::Entity::delete_by_id(time_id)
            .exec(&txn)
            .await
            .map_err(map_reference_error)?;

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!("Reservation time {} has been deleted", time_id);

        Ok(())
    }

    /// 날짜/테마별 예약 가능 시간 조회
    ///
    /// 등록된 모든 시간을 시작 시간 순으로 반환하며, 해당 날짜/테마에 예약이 있는 시간은
    /// `already_booked = true`로 표시합니다.
    pub async fn get_available_times(
        state: &AppState,
        date: NaiveDate,
        theme_id: i64,
    ) -> Result<Vec<AvailableTimeResponse>, AppError> {
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let times = reservation_time::Entity::find()
            .order_by_asc(reservation_time::Column::StartAt)
            .order_by_asc(reservation_time::Column::Id)
            .all(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let booked_time_ids: HashSet<i64> = reservation::Entity::find()
            .select_only()
            .column(reservation::Column::TimeId)
            .filter(reservation::Column::Date.eq(date))
            .filter(reservation::Column::ThemeId.eq(theme_id))
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .into_iter()
            .collect();

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(mark_availability(times, &booked_time_ids))
    }

    /// 시간 형식 검증 (HH:MM)
    fn validate_and_parse_time(value: &str) -> Result<NaiveTime, AppError> {
        NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| {
            AppError::BadRequest(format!(
                "시간 형식이 올바르지 않습니다. (HH:MM): {}",
                value
            ))
        })
    }
}

/// 시간 목록에 예약 여부를 표시합니다. 순서는 입력 순서를 따릅니다.
pub(crate) fn mark_availability(
    times: Vec<reservation_time::Model>,
    booked_time_ids: &HashSet<i64>,
) -> Vec<AvailableTimeResponse> {
    times
        .into_iter()
        .map(|time| AvailableTimeResponse {
            time_id: time.id,
            start_at: time.start_at.format(TIME_FORMAT).to_string(),
            already_booked: booked_time_ids.contains(&time.id),
        })
        .collect()
}

fn duplicate_time(start_at: &str) -> AppError {
    AppError::DuplicateReservationTime(format!("이미 등록된 예약 시간입니다: {}", start_at))
}
