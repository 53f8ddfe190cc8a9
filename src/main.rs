use std::net::SocketAddr;
use std::process::ExitCode;

use roomescape::config::{establish_connection, AppConfig};
use roomescape::domain::health::init_start_time;
use roomescape::domain::member::service::MemberService;
use roomescape::utils::logging::init_logging;
use roomescape::{app, AppState};

#[tokio::main]
async fn main() -> ExitCode {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard는 main 종료 시까지 유지)
    let _guard = init_logging();

    // 3. 설정 로드
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    // 4. DB 연결 및 스키마 동기화
    let db = match establish_connection(&config.database_url, config.schema_update).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to the database");
            return ExitCode::FAILURE;
        }
    };

    // 5. 초기 관리자 계정
    if let Err(e) = MemberService::ensure_admin(&db, &config).await {
        tracing::error!(error = %e, "Failed to create the initial admin account");
        return ExitCode::FAILURE;
    }

    init_start_time();

    // 6. 서버 실행
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let app = app(AppState { db, config });

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind address");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server terminated with an error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
