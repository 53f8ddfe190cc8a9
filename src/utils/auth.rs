use axum::{
    async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::header::COOKIE,
    http::request::Parts,
};

use crate::domain::member::entity::member::Role;
use crate::state::AppState;
use crate::utils::cookie::ACCESS_TOKEN_COOKIE;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_access_token, Claims};

/// 인증된 회원 정보를 담는 Extractor
///
/// 핸들러는 이 값을 통해 호출자 ID를 얻고, 서비스 함수에 명시적으로 전달합니다.
#[derive(Debug)]
pub struct AuthMember(pub Claims);

impl AuthMember {
    /// JWT Claims에서 회원 ID를 추출합니다.
    pub fn member_id(&self) -> Result<i64, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("유효하지 않은 사용자 ID입니다.".to_string()))
    }

    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthMember {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 1. Authorization 헤더에서 토큰 추출 시도
        let token = if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
            let auth_header_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("잘못된 헤더 형식입니다.".to_string()))?;

            auth_header_str
                .strip_prefix("Bearer ")
                .ok_or_else(|| {
                    AppError::Unauthorized("토큰 형식이 올바르지 않습니다.".to_string())
                })?
                .to_string()
        } else {
            // 2. 쿠키에서 토큰 추출 시도
            extract_token_from_cookie(parts)?
        };

        let claims = decode_access_token(&token, &state.config.jwt_secret)?;

        Ok(AuthMember(claims))
    }
}

/// 관리자 권한이 필요한 API용 Extractor
#[derive(Debug)]
pub struct AdminMember(pub AuthMember);

#[async_trait]
impl FromRequestParts<AppState> for AdminMember {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let member = AuthMember::from_request_parts(parts, state).await?;
        if !member.is_admin() {
            return Err(AppError::Forbidden("관리자 권한이 필요합니다.".to_string()));
        }
        Ok(AdminMember(member))
    }
}

/// 쿠키에서 access_token 추출
fn extract_token_from_cookie(parts: &Parts) -> Result<String, AppError> {
    let cookie_header = parts
        .headers
        .get(COOKIE)
        .ok_or_else(|| AppError::Unauthorized("로그인이 필요합니다.".to_string()))?;

    let cookie_str = cookie_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("잘못된 쿠키 형식입니다.".to_string()))?;

    // 쿠키 파싱: "name1=value1; name2=value2" 형식
    let prefix = format!("{}=", ACCESS_TOKEN_COOKIE);
    cookie_str
        .split(';')
        .filter_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()))
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Unauthorized("로그인이 필요합니다.".to_string()))
}
