use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};
use tracing::info;

use super::dto::{CreateThemeRequest, PopularThemeResponse, ThemeResponse};
use super::entity::theme;
use crate::domain::reservation::entity::reservation;
use crate::state::AppState;
use crate::utils::error::{map_reference_error, AppError};

/// 인기 테마 집계 기간 (오늘 제외 최근 N일)
pub const POPULAR_WINDOW_DAYS: i64 = 7;

/// 인기 테마 최대 개수
pub const MAX_POPULAR_THEMES: u64 = 10;

pub struct ThemeService;

impl ThemeService {
    /// 전체 테마 조회
    pub async fn get_themes(state: &AppState) -> Result<Vec<ThemeResponse>, AppError> {
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let themes = theme::Entity::find()
            .order_by_asc(theme::Column::Id)
            .all(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(themes.into_iter().map(ThemeResponse::from).collect())
    }

    /// 테마 생성
    pub async fn create_theme(
        state: &AppState,
        req: CreateThemeRequest,
    ) -> Result<ThemeResponse, AppError> {
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let theme_model = theme::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            thumbnail: Set(req.thumbnail),
            ..Default::default()
        };

        let saved = theme_model
            .insert(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!("Theme {} ({}) has been created", saved.id, saved.name);

        Ok(ThemeResponse::from(saved))
    }

    /// 테마 삭제
    ///
    /// - 존재하지 않는 테마: `ThemeNotFound`
    /// - 예약이 참조 중인 테마: `ReferentialIntegrityViolation` (테마와 예약은 그대로 유지)
    pub async fn delete_theme(state: &AppState, theme_id: i64) -> Result<(), AppError> {
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let exists = theme::Entity::find_by_id(theme_id)
            .one(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if exists.is_none() {
            return Err(AppError::ThemeNotFound(
                "존재하지 않는 테마입니다.".to_string(),
            ));
        }

        let reservation_count = reservation::Entity::find()
            .filter(reservation::Column::ThemeId.eq(theme_id))
            .count(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if reservation_count > 0 {
            return Err(AppError::ReferentialIntegrityViolation(
                "예약에 포함된 테마 정보는 삭제할 수 없습니다.".to_string(),
            ));
        }

        theme::Entity::delete_by_id(theme_id)
            .exec(&txn)
            .await
            .map_err(map_reference_error)?;

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!("Theme {} has been deleted", theme_id);

        Ok(())
    }

    /// 인기 테마 조회
    ///
    /// `[today - 7일, today - 1일]` 기간의 예약 수 내림차순, 동률이면 테마 ID 오름차순으로
    /// 최대 10개를 반환합니다. 기간 내 예약이 없는 테마는 포함하지 않습니다.
    pub async fn get_popular_themes(
        state: &AppState,
        today: NaiveDate,
    ) -> Result<Vec<PopularThemeResponse>, AppError> {
        let start_at = today - Duration::days(POPULAR_WINDOW_DAYS);
        let end_at = today - Duration::days(1);

        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let ranked: Vec<(i64, i64)> = reservation::Entity::find()
            .select_only()
            .column(reservation::Column::ThemeId)
            .column_as(Expr::col(reservation::Column::Id).count(), "reservation_count")
            .filter(reservation::Column::Date.between(start_at, end_at))
            .group_by(reservation::Column::ThemeId)
            .order_by_desc(Expr::col(reservation::Column::Id).count())
            .order_by_asc(reservation::Column::ThemeId)
            .limit(MAX_POPULAR_THEMES)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let theme_ids: Vec<i64> = ranked.iter().map(|(theme_id, _)| *theme_id).collect();
        let mut themes: HashMap<i64, theme::Model> = theme::Entity::find()
            .filter(theme::Column::Id.is_in(theme_ids))
            .all(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .into_iter()
            .map(|model| (model.id, model))
            .collect();

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(ranked
            .into_iter()
            .filter_map(|(theme_id, count)| {
                themes
                    .remove(&theme_id)
                    .map(|model| PopularThemeResponse::new(model, count))
            })
            .collect())
    }
}
