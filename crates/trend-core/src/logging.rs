//! tracing을 사용한 로깅 인프라.
//!
//! 지원하는 출력 형식:
//! - **pretty**: 개발용 사람이 읽기 쉬운 형식
//! - **json**: 로그 수집용 JSON 형식
//! - **compact**: CLI 기본값, 한 줄 형식
//!
//! CLI는 결과를 stdout에 출력하므로 로그는 항상 stderr로 보냅니다.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식
    Pretty,
    /// 로그 집계용 JSON 형식
    Json,
    /// 간결한 한 줄 형식
    #[default]
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 로그 레벨 필터 (예: "info", "trend_scoring=debug")
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
    /// 대상(모듈 경로) 포함 여부
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// 새 로그 설정을 생성합니다.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// 로그 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 애플리케이션 설정의 로깅 섹션에서 생성합니다.
    ///
    /// 환경 변수 `LOG_FORMAT`이 있으면 파일 설정보다 우선합니다.
    pub fn from_app_config(config: &LoggingConfig) -> Self {
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .or_else(|| config.format.parse().ok())
            .unwrap_or_default();

        Self {
            level: config.level.clone(),
            format,
            ..Default::default()
        }
    }
}

/// 주어진 설정으로 로깅 시스템을 초기화합니다.
///
/// `RUST_LOG`가 설정되어 있으면 `config.level`보다 우선합니다.
///
/// # 예제
///
/// ```no_run
/// use trend_core::logging::{init_logging, LogConfig, LogFormat};
///
/// let config = LogConfig::new("debug").with_format(LogFormat::Json);
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    match config.format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_target(config.with_target);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(config.with_target);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(config.with_target);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    tracing::debug!(
        format = ?config.format,
        level = %config.level,
        "Logging initialized"
    );

    Ok(())
}

/// 평가 컨텍스트 필드가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! evaluation_span {
    ($name:expr, $entry:expr) => {
        tracing::debug_span!($name, entry = %$entry)
    };
}
