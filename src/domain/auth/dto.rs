use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::member::entity::member::{self, Role};

/// 로그인 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "이메일 형식이 올바르지 않습니다."))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요."))]
    pub password: String,
}

/// 로그인 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// 서비스 Access Token (쿠키로도 함께 설정됩니다)
    pub access_token: String,
}

/// 로그인 상태 확인 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginCheckResponse {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

impl From<member::Model> for LoginCheckResponse {
    fn from(model: member::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            role: model.role,
        }
    }
}
