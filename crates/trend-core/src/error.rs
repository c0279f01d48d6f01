//! 추세 점수 계산기의 에러 타입.
//!
//! 이 모듈은 점수 계산 파이프라인 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 추세 점수 에러.
#[derive(Debug, Error)]
pub enum TrendError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 그룹에 상태가 지정되지 않은 타임프레임이 있음
    #[error("상태 누락 ({group}): {}", .timeframes.join(", "))]
    MissingState {
        /// 그룹 이름
        group: String,
        /// 상태가 없는 타임프레임 목록
        timeframes: Vec<String>,
    },

    /// 그룹에 속하지 않은 타임프레임
    #[error("알 수 없는 타임프레임 ({group}): {timeframe}")]
    UnknownTimeframe {
        /// 그룹 이름
        group: String,
        /// 타임프레임 식별자
        timeframe: String,
    },

    /// 알 수 없는 상태 태그
    #[error("알 수 없는 상태 태그: {0}")]
    UnknownState(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),
}

/// 점수 계산 작업을 위한 Result 타입.
pub type TrendResult<T> = Result<T, TrendError>;

impl TrendError {
    /// 사용자 입력을 고쳐서 다시 시도할 수 있는 에러인지 확인합니다.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TrendError::MissingState { .. }
                | TrendError::UnknownTimeframe { .. }
                | TrendError::UnknownState(_)
                | TrendError::InvalidInput(_)
        )
    }
}

impl From<serde_json::Error> for TrendError {
    fn from(err: serde_json::Error) -> Self {
        TrendError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for TrendError {
    fn from(err: toml::de::Error) -> Self {
        TrendError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for TrendError {
    fn from(err: config::ConfigError) -> Self {
        TrendError::Config(err.to_string())
    }
}

impl From<std::io::Error> for TrendError {
    fn from(err: std::io::Error) -> Self {
        TrendError::Io(err.to_string())
    }
}
