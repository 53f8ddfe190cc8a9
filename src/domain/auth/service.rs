use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use tracing::info;

use super::dto::{LoginCheckResponse, LoginRequest, LoginResponse};
use crate::domain::member::entity::member;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::encode_access_token;
use crate::utils::password::verify_password_blocking;

pub struct AuthService;

impl AuthService {
    /// 이메일/비밀번호 로그인
    ///
    /// 존재하지 않는 이메일과 잘못된 비밀번호는 같은 에러로 응답합니다.
    pub async fn login(state: &AppState, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let member = member::Entity::find()
            .filter(member::Column::Email.eq(req.email.as_str()))
            .one(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(login_failed)?;

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if !verify_password_blocking(req.password, member.password.clone()).await? {
            return Err(login_failed());
        }

        let access_token = encode_access_token(
            member.id,
            member.role,
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;

        info!(member_id = member.id, "Member logged in");

        Ok(LoginResponse { access_token })
    }

    /// 토큰 주체의 회원 정보 조회
    pub async fn check(state: &AppState, member_id: i64) -> Result<LoginCheckResponse, AppError> {
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let member = member::Entity::find_by_id(member_id)
            .one(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| {
                AppError::MemberNotFound("존재하지 않는 회원입니다.".to_string())
            })?;

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(LoginCheckResponse::from(member))
    }
}

fn login_failed() -> AppError {
    AppError::LoginFailed("이메일 또는 비밀번호가 올바르지 않습니다.".to_string())
}
