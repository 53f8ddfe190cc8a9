//! 로깅 초기화 모듈
//!
//! stdout과 일별 로그 파일에 동시 출력합니다.
//! 파일은 항상 JSON, stdout은 `LOG_FORMAT`(json | pretty)에 따릅니다.

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "info,roomescape=debug,tower_http=debug";

/// 로깅 시스템을 초기화합니다.
///
/// 로그 레벨은 `RUST_LOG`, 로그 디렉토리는 `LOG_DIR`(기본 `logs/`)로 설정합니다.
/// 파일명 형식: `roomescape.log.YYYY-MM-DD`
///
/// 반환되는 `WorkerGuard`를 main에서 유지해야 버퍼링된 로그가 손실되지 않습니다.
pub fn init_logging() -> WorkerGuard {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    let pretty = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("pretty"))
        .unwrap_or(false);

    let (non_blocking, guard) =
        tracing_appender::non_blocking(rolling::daily(&log_dir, "roomescape.log"));

    let stdout_layer = if pretty {
        fmt::layer().pretty().boxed()
    } else {
        fmt::layer()
            .json()
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_current_span(true)
            .boxed()
    };

    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .with_ansi(false)
        .with_writer(non_blocking);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // 테스트 등에서 이미 초기화된 경우에도 서버는 계속 동작
    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Failed to initialize tracing: {}", err);
    }

    guard
}
