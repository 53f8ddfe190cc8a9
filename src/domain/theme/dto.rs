use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::theme;

/// 테마 생성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateThemeRequest {
    #[validate(length(min = 1, max = 50, message = "테마 이름은 1자 이상 50자 이하여야 합니다."))]
    pub name: String,
    #[validate(length(min = 1, max = 500, message = "테마 설명은 1자 이상 500자 이하여야 합니다."))]
    pub description: String,
    #[validate(url(message = "썸네일은 올바른 URL 형식이어야 합니다."))]
    pub thumbnail: String,
}

/// 테마 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
}

impl From<theme::Model> for ThemeResponse {
    fn from(model: theme::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            thumbnail: model.thumbnail,
        }
    }
}

/// 인기 테마 응답 (최근 일주일 예약 수 순)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopularThemeResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub reservation_count: i64,
}

impl PopularThemeResponse {
    pub fn new(model: theme::Model, reservation_count: i64) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            thumbnail: model.thumbnail,
            reservation_count,
        }
    }
}

/// 테마 삭제 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteThemeResponse {
    pub theme_id: i64,
}
