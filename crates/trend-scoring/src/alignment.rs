//! 큰 그룹과 작은 그룹 방향 정렬에 따른 작은 그룹 점수 조정.
//!
//! | 큰 그룹 | 작은 그룹 | 조정 |
//! |---|---|---|
//! | > 0 | > 0 | 작은 그룹 + 강화 폭 |
//! | < 0 | < 0 | 작은 그룹 - 강화 폭 |
//! | > 0 | < 0 | 작은 그룹 - 충돌 차감 폭 |
//! | < 0 | > 0 | 변경 없음, 역추세 위험 플래그 |
//!
//! 한쪽이라도 0이면 조정하지 않습니다. 충돌 방향 중 큰 그룹 상승 쪽만
//! 점수를 차감하고, 큰 그룹 하락 쪽은 플래그만 세웁니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use trend_core::ScoringConfig;

/// 정렬 판정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlignmentKind {
    /// 같은 방향 (강화)
    Reinforced,
    /// 큰 그룹 상승, 작은 그룹 하락 (차감)
    Conflict,
    /// 큰 그룹 하락, 작은 그룹 상승 (플래그만)
    CounterTrendRisk,
    /// 한쪽이 0
    Neutral,
}

impl fmt::Display for AlignmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentKind::Reinforced => write!(f, "REINFORCED"),
            AlignmentKind::Conflict => write!(f, "CONFLICT"),
            AlignmentKind::CounterTrendRisk => write!(f, "COUNTER_TREND_RISK"),
            AlignmentKind::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// 조정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentAdjustment {
    /// 조정 전 작은 그룹 점수
    pub raw_small: f64,
    /// 조정 후 작은 그룹 점수
    pub adjusted_small: f64,
    /// 판정 종류
    pub kind: AlignmentKind,
    /// 역추세 위험 여부 (호출자가 경고로 표시)
    pub counter_trend_risk: bool,
}

impl AlignmentAdjustment {
    /// 조정 폭 (adjusted - raw).
    pub fn delta(&self) -> f64 {
        self.adjusted_small - self.raw_small
    }
}

/// 기본 조정 폭(강화 10, 충돌 20)으로 작은 그룹 점수를 조정합니다.
pub fn adjust_for_alignment(large: f64, small: f64) -> AlignmentAdjustment {
    adjust_with_config(large, small, &ScoringConfig::default())
}

/// 설정된 조정 폭으로 작은 그룹 점수를 조정합니다.
pub fn adjust_with_config(large: f64, small: f64, config: &ScoringConfig) -> AlignmentAdjustment {
    let (adjusted_small, kind) = if large > 0.0 && small > 0.0 {
        (small + config.reinforcement, AlignmentKind::Reinforced)
    } else if large < 0.0 && small < 0.0 {
        (small - config.reinforcement, AlignmentKind::Reinforced)
    } else if large > 0.0 && small < 0.0 {
        (small - config.conflict_penalty, AlignmentKind::Conflict)
    } else if large < 0.0 && small > 0.0 {
        (small, AlignmentKind::CounterTrendRisk)
    } else {
        (small, AlignmentKind::Neutral)
    };

    AlignmentAdjustment {
        raw_small: small,
        adjusted_small,
        kind,
        counter_trend_risk: kind == AlignmentKind::CounterTrendRisk,
    }
}
