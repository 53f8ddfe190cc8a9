use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::dto::{
    CreateReservationRequest, MyReservationResponse, ReservationResponse, DATE_FORMAT,
    RESERVED_STATUS,
};
use super::entity::reservation;
use crate::domain::member::entity::member;
use crate::domain::reservation_time::dto::ReservationTimeResponse;
use crate::domain::reservation_time::entity::reservation_time;
use crate::domain::theme::entity::theme;
use crate::state::AppState;
use crate::utils::error::{map_unique_error, AppError};

pub struct ReservationService;

impl ReservationService {
    /// 전체 예약 조회 (날짜, 시간 순)
    pub async fn get_reservations(state: &AppState) -> Result<Vec<ReservationResponse>, AppError> {
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let reservations = reservation::Entity::find()
            .order_by_asc(reservation::Column::Date)
            .order_by_asc(reservation::Column::Id)
            .all(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let mut result = Self::attach_details(&txn, reservations).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        result.sort_by(|a, b| {
            (a.date, &a.time.start_at, a.id).cmp(&(b.date, &b.time.start_at, b.id))
        });

        Ok(result)
    }

    /// 예약 생성
    ///
    /// 같은 날짜/시간/테마에 이미 예약이 있으면 `DuplicateReservation`을 반환합니다.
    /// 지난 날짜의 예약도 허용합니다.
    pub async fn create_reservation(
        state: &AppState,
        member_id: i64,
        req: CreateReservationRequest,
    ) -> Result<ReservationResponse, AppError> {
        // 1. 날짜 형식 검증
        let date = Self::validate_and_parse_date(&req.date)?;

        // 2. 트랜잭션 시작
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        // 3. 참조 대상 존재 여부 확인
        let time = reservation_time::Entity::find_by_id(req.time_id)
            .one(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| {
                AppError::ReservationTimeNotFound("존재하지 않는 예약 시간입니다.".to_string())
            })?;

        let theme = theme::Entity::find_by_id(req.theme_id)
            .one(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| AppError::ThemeNotFound("존재하지 않는 테마입니다.".to_string()))?;

        let member = member::Entity::find_by_id(member_id)
            .one(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| AppError::MemberNotFound("존재하지 않는 사용자입니다.".to_string()))?;

        // 4. 중복 예약 확인
        let duplicated = reservation::Entity::find()
            .filter(reservation::Column::Date.eq(date))
            .filter(reservation::Column::TimeId.eq(req.time_id))
            .filter(reservation::Column::ThemeId.eq(req.theme_id))
            .count(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if duplicated > 0 {
            return Err(duplicate_reservation());
        }

        // 5. 예약 저장 (동시 요청은 uq_reservation_slot 인덱스가 막음)
        let saved = reservation::ActiveModel {
            date: Set(date),
            time_id: Set(time.id),
            theme_id: Set(theme.id),
            member_id: Set(member.id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| map_unique_error(e, duplicate_reservation))?;

        txn.commit()
            .await
            .map_err(|e| map_unique_error(e, duplicate_reservation))?;

        info!(
            reservation_id = saved.id,
            member_id = member.id,
            theme_id = theme.id,
            "Reservation has been created for {}",
            saved.date
        );

        Ok(ReservationResponse {
            id: saved.id,
            date: saved.date,
            time: ReservationTimeResponse::from(time),
            theme: theme.into(),
            member: member.into(),
        })
    }

    /// 내 예약 조회
    pub async fn get_my_reservations(
        state: &AppState,
        member_id: i64,
    ) -> Result<Vec<MyReservationResponse>, AppError> {
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let reservations = reservation::Entity::find()
            .filter(reservation::Column::MemberId.eq(member_id))
            .order_by_asc(reservation::Column::Date)
            .order_by_asc(reservation::Column::Id)
            .all(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let details = Self::attach_details(&txn, reservations).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let mut result: Vec<MyReservationResponse> = details
            .into_iter()
            .map(|r| MyReservationResponse {
                reservation_id: r.id,
                theme: r.theme.name,
                date: r.date,
                time: r.time.start_at,
                status: RESERVED_STATUS.to_string(),
            })
            .collect();
        result.sort_by(|a, b| {
            (a.date, &a.time, a.reservation_id).cmp(&(b.date, &b.time, b.reservation_id))
        });

        Ok(result)
    }

    /// 예약 삭제 (관리자)
    pub async fn delete_reservation(state: &AppState, reservation_id: i64) -> Result<(), AppError> {
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let result = reservation::Entity::delete_by_id(reservation_id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::ReservationNotFound(
                "존재하지 않는 예약입니다.".to_string(),
            ));
        }

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!("Reservation {} has been deleted", reservation_id);

        Ok(())
    }

    /// 예약 목록에 시간/테마/예약자 정보를 명시적으로 조회해 붙입니다.
    async fn attach_details<C: ConnectionTrait>(
        conn: &C,
        reservations: Vec<reservation::Model>,
    ) -> Result<Vec<ReservationResponse>, AppError> {
        if reservations.is_empty() {
            return Ok(Vec::new());
        }

        let time_ids: HashSet<i64> = reservations.iter().map(|r| r.time_id).collect();
        let theme_ids: HashSet<i64> = reservations.iter().map(|r| r.theme_id).collect();
        let member_ids: HashSet<i64> = reservations.iter().map(|r| r.member_id).collect();

        let times: HashMap<i64, reservation_time::Model> = reservation_time::Entity::find()
            .filter(reservation_time::Column::Id.is_in(time_ids))
            .all(conn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let themes: HashMap<i64, theme::Model> = theme::Entity::find()
            .filter(theme::Column::Id.is_in(theme_ids))
            .all(conn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let members: HashMap<i64, member::Model> = member::Entity::find()
            .filter(member::Column::Id.is_in(member_ids))
            .all(conn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        reservations
            .into_iter()
            .map(|r| -> Result<ReservationResponse, AppError> {
                let time = times.get(&r.time_id).ok_or_else(|| {
                    AppError::InternalError(format!("Reservation {} has no time", r.id))
                })?;
                let theme = themes.get(&r.theme_id).ok_or_else(|| {
                    AppError::InternalError(format!("Reservation {} has no theme", r.id))
                })?;
                let member = members.get(&r.member_id).ok_or_else(|| {
                    AppError::InternalError(format!("Reservation {} has no member", r.id))
                })?;

                Ok(ReservationResponse {
                    id: r.id,
                    date: r.date,
                    time: ReservationTimeResponse::from(time.clone()),
                    theme: theme.clone().into(),
                    member: member.clone().into(),
                })
            })
            .collect()
    }

    /// 날짜 형식 검증 (YYYY-MM-DD)
    fn validate_and_parse_date(value: &str) -> Result<NaiveDate, AppError> {
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
            AppError::BadRequest(format!(
                "날짜 형식이 올바르지 않습니다. (YYYY-MM-DD): {}",
                value
            ))
        })
    }
}

fn duplicate_reservation() -> AppError {
    AppError::DuplicateReservation("이미 예약된 날짜/시간/테마입니다.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_iso_date() {
        let parsed = ReservationService::validate_and_parse_date("2026-10-20").unwrap();

        assert_eq!(parsed, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
    }

    #[test]
    fn should_reject_malformed_date() {
        for value in ["2026/10/20", "2026-13-01", "", "20261020"] {
            let result = ReservationService::validate_and_parse_date(value);
            assert!(matches!(result, Err(AppError::BadRequest(_))), "{}", value);
        }
    }
}
