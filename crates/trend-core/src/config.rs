//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 모든 섹션은 기본값을 가지므로 설정 파일에는 바꾸려는 값만 적으면 됩니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{TrendError, TrendResult};
use crate::types::{
    GroupKind, TimeframeGroup, DEFAULT_LARGE_TIMEFRAMES, DEFAULT_SMALL_TIMEFRAMES,
};

/// 환경 변수 오버라이드 접두사 (예: `TREND__SCORING__LARGE_WEIGHT=0.5`).
pub const ENV_PREFIX: &str = "TREND";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 타임프레임 그룹 설정
    pub timeframes: TimeframeConfig,
    /// 점수 계산 설정
    pub scoring: ScoringConfig,
    /// 가격 레벨 설정
    pub levels: LevelConfig,
    /// 리스크 관리 설정
    pub risk: RiskConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// 타임프레임 그룹 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeframeConfig {
    /// 큰 그룹 (기준 순서)
    pub large: Vec<String>,
    /// 작은 그룹 (기준 순서)
    pub small: Vec<String>,
}

impl Default for TimeframeConfig {
    fn default() -> Self {
        Self {
            large: DEFAULT_LARGE_TIMEFRAMES.iter().map(|s| s.to_string()).collect(),
            small: DEFAULT_SMALL_TIMEFRAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TimeframeConfig {
    /// 큰 그룹을 생성합니다.
    pub fn large_group(&self) -> TrendResult<TimeframeGroup> {
        TimeframeGroup::new(GroupKind::Large, &self.large)
    }

    /// 작은 그룹을 생성합니다.
    pub fn small_group(&self) -> TrendResult<TimeframeGroup> {
        TimeframeGroup::new(GroupKind::Small, &self.small)
    }
}

/// 점수 계산 설정.
///
/// 종합 점수 = large_weight * 큰 그룹 + small_weight * 조정된 작은 그룹 + region_weight * 지역 편향
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// 큰 그룹 가중치 (기본값: 0.6)
    pub large_weight: f64,
    /// 작은 그룹 가중치 (기본값: 0.3)
    pub small_weight: f64,
    /// 지역 편향 가중치 (기본값: 0.1)
    pub region_weight: f64,
    /// 같은 방향일 때 작은 그룹 강화 폭 (기본값: 10)
    pub reinforcement: f64,
    /// 큰 그룹 상승 + 작은 그룹 하락일 때 차감 폭 (기본값: 20)
    pub conflict_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            large_weight: 0.6,
            small_weight: 0.3,
            region_weight: 0.1,
            reinforcement: 10.0,
            conflict_penalty: 20.0,
        }
    }
}

impl ScoringConfig {
    /// 설정 값을 검증합니다.
    pub fn validate(&self) -> TrendResult<()> {
        let weights = [
            ("large_weight", self.large_weight),
            ("small_weight", self.small_weight),
            ("region_weight", self.region_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(TrendError::Config(format!(
                    "scoring.{} must be a non-negative number",
                    name
                )));
            }
        }

        let adjustments = [
            ("reinforcement", self.reinforcement),
            ("conflict_penalty", self.conflict_penalty),
        ];
        for (name, value) in adjustments {
            if !value.is_finite() || value < 0.0 {
                return Err(TrendError::Config(format!(
                    "scoring.{} must be a non-negative number",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// 가격 레벨 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LevelConfig {
    /// 스냅샷에서 "미설정"으로 취급할 값 (예전 입력 형식 호환용)
    pub unset_sentinels: Vec<Decimal>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            unset_sentinels: vec![Decimal::ZERO, Decimal::from(100_000)],
        }
    }
}

impl LevelConfig {
    /// 값이 미설정 센티널인지 확인합니다.
    pub fn is_unset(&self, value: Decimal) -> bool {
        self.unset_sentinels.contains(&value)
    }
}

/// 리스크 관리 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RiskConfig {
    /// 거래당 위험에 노출할 자본 비율 (기본값: 1%)
    pub risk_per_trade_pct: f64,
    /// 경고를 띄울 손절 거리 비율 (기본값: 1%)
    pub max_stop_loss_pct: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_per_trade_pct: 1.0,
            max_stop_loss_pct: 1.0,
        }
    }
}

impl RiskConfig {
    /// 설정 값을 검증합니다.
    pub fn validate(&self) -> TrendResult<()> {
        if self.risk_per_trade_pct <= 0.0 || self.risk_per_trade_pct > 100.0 {
            return Err(TrendError::Config(
                "risk.risk_per_trade_pct must be between 0 and 100".into(),
            ));
        }

        if self.max_stop_loss_pct <= 0.0 || self.max_stop_loss_pct > 100.0 {
            return Err(TrendError::Config(
                "risk.max_stop_loss_pct must be between 0 and 100".into(),
            ));
        }

        Ok(())
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> TrendResult<Self> {
        let builder = config::Config::builder()
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 파일 없이 기본값과 환경 변수만으로 설정을 로드합니다.
    pub fn from_env() -> TrendResult<Self> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> TrendResult<Self> {
        Self::load("config/default.toml")
    }

    /// 전체 설정을 검증합니다.
    pub fn validate(&self) -> TrendResult<()> {
        self.timeframes.large_group()?;
        self.timeframes.small_group()?;
        self.scoring.validate()?;
        self.risk.validate()?;
        Ok(())
    }
}
