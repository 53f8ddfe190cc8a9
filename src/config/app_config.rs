use std::env;

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    /// 시작 시 스키마 동기화 여부 (DB_SCHEMA_UPDATE)
    pub schema_update: bool,
    pub jwt_secret: String,
    pub jwt_expiration: i64,

    // 초기 관리자 계정 (둘 다 설정된 경우에만 생성)
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub admin_name: String,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://roomescape.db?mode=rwc".to_string());

        let schema_update = env::var("DB_SCHEMA_UPDATE")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .map_err(|_| ConfigError::InvalidSchemaUpdate)?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!(
                "JWT_SECRET 환경변수가 설정되지 않았습니다. 프로덕션 환경에서는 반드시 설정하세요."
            );
            "secret".to_string()
        });

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidExpiration)?;

        let admin_email = env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty());
        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());
        let admin_name = env::var("ADMIN_NAME").unwrap_or_else(|_| "관리자".to_string());

        Ok(Self {
            server_port,
            database_url,
            schema_update,
            jwt_secret,
            jwt_expiration,
            admin_email,
            admin_password,
            admin_name,
        })
    }

    /// 테스트용 설정
    pub fn for_test(jwt_secret: impl Into<String>) -> Self {
        Self {
            server_port: 0,
            database_url: "sqlite::memory:".to_string(),
            schema_update: true,
            jwt_secret: jwt_secret.into(),
            jwt_expiration: 3600,
            admin_email: None,
            admin_password: None,
            admin_name: "관리자".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid expiration time")]
    InvalidExpiration,
    #[error("DB_SCHEMA_UPDATE must be 'true' or 'false'")]
    InvalidSchemaUpdate,
}
