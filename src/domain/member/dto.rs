use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::member::{self, Role};

/// 회원가입 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 20, message = "이름은 1자 이상 20자 이하여야 합니다."))]
    pub name: String,
    #[validate(email(message = "이메일 형식이 올바르지 않습니다."))]
    pub email: String,
    #[validate(length(min = 8, max = 64, message = "비밀번호는 8자 이상 64자 이하여야 합니다."))]
    pub password: String,
}

/// 회원 응답 (비밀번호 제외)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<member::Model> for MemberResponse {
    fn from(model: member::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_invalid_email() {
        let req = SignupRequest {
            name: "브라운".to_string(),
            email: "brown-at-email".to_string(),
            password: "password123".to_string(),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn should_reject_short_password() {
        let req = SignupRequest {
            name: "브라운".to_string(),
            email: "brown@email.com".to_string(),
            password: "short".to_string(),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn should_not_expose_password() {
        let response = MemberResponse::from(member::Model {
            id: 1,
            name: "브라운".to_string(),
            email: "brown@email.com".to_string(),
            password: "$argon2id$...".to_string(),
            role: Role::User,
        });

        let parsed = serde_json::to_value(&response).unwrap();

        assert!(parsed.get("password").is_none());
        assert_eq!(parsed["role"], "USER");
    }
}
