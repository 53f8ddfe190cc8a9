use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::dto::{MemberResponse, SignupRequest};
use super::entity::member::{self, Role};
use crate::config::AppConfig;
use crate::state::AppState;
use crate::utils::error::{map_unique_error, AppError};
use crate::utils::password::hash_password_blocking;

pub struct MemberService;

impl MemberService {
    /// 회원가입 (일반 회원)
    pub async fn signup(state: &AppState, req: SignupRequest) -> Result<MemberResponse, AppError> {
        let member = Self::create_member(&state.db, req.name, req.email, &req.password, Role::User)
            .await?;

        Ok(MemberResponse::from(member))
    }

    /// 전체 회원 조회 (관리자)
    pub async fn get_members(state: &AppState) -> Result<Vec<MemberResponse>, AppError> {
        let txn = state
            .db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let members = member::Entity::find()
            .order_by_asc(member::Column::Id)
            .all(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(members.into_iter().map(MemberResponse::from).collect())
    }

    /// 설정된 초기 관리자 계정이 없으면 생성합니다.
    ///
    /// ADMIN_EMAIL, ADMIN_PASSWORD가 모두 설정된 경우에만 동작합니다.
    pub async fn ensure_admin(db: &DatabaseConnection, config: &AppConfig) -> Result<(), AppError> {
        let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
            return Ok(());
        };

        let exists = member::Entity::find()
            .filter(member::Column::Email.eq(email.as_str()))
            .count(db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if exists > 0 {
            return Ok(());
        }

        Self::create_member(
            db,
            config.admin_name.clone(),
            email.clone(),
            password,
            Role::Admin,
        )
        .await?;

        info!("Initial admin account {} has been created", email);
        Ok(())
    }

    /// 회원 생성 (이메일 중복 시 `DuplicateEmail`)
    pub async fn create_member(
        db: &DatabaseConnection,
        name: String,
        email: String,
        password: &str,
        role: Role,
    ) -> Result<member::Model, AppError> {
        let password_hash = hash_password_blocking(password.to_string()).await?;

        let txn = db
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let duplicated = member::Entity::find()
            .filter(member::Column::Email.eq(email.as_str()))
            .count(&txn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if duplicated > 0 {
            return Err(duplicate_email());
        }

        let saved = member::ActiveModel {
            name: Set(name),
            email: Set(email),
            password: Set(password_hash),
            role: Set(role),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| map_unique_error(e, duplicate_email))?;

        txn.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(member_id = saved.id, role = ?saved.role, "Member has been created");

        Ok(saved)
    }
}

fn duplicate_email() -> AppError {
    AppError::DuplicateEmail("이미 가입된 이메일입니다.".to_string())
}
