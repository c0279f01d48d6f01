//! 평가 리포트 타입.

use serde::Serialize;
use std::fmt;
use trend_core::{GroupKind, TrendLabel};

use crate::alignment::AlignmentAdjustment;
use crate::composite::CompositeScore;
use crate::region::RegionAssessment;
use crate::runs::DirectionBreakdown;

/// 그룹별 분석 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAnalysis {
    /// 그룹 종류
    pub kind: GroupKind,
    /// 가중치 평균 (조정 전)
    pub raw_score: f64,
    /// 분류에 사용한 점수 (작은 그룹은 정렬 조정 후)
    pub score: f64,
    /// 추세 라벨
    pub label: TrendLabel,
    /// 방향별 연속 구간
    pub breakdown: DirectionBreakdown,
    /// 모든 타임프레임이 횡보인지 여부
    pub all_sideways: bool,
}

/// 큰 그룹과 작은 그룹 라벨의 합의 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Consensus {
    /// 라벨 일치
    Aligned,
    /// 큰 그룹 상승, 작은 그룹 조정 중
    PullbackInUptrend,
    /// 큰 그룹 하락, 작은 그룹 반등 중
    ReboundInDowntrend,
    /// 그 외 불일치
    Divergent,
}

impl Consensus {
    pub fn from_labels(large: TrendLabel, small: TrendLabel) -> Self {
        if large == small {
            Self::Aligned
        } else if large.is_up() && small.is_down() {
            Self::PullbackInUptrend
        } else if large.is_down() && small.is_up() {
            Self::ReboundInDowntrend
        } else {
            Self::Divergent
        }
    }

    /// 설명 문자열
    pub fn description(self) -> &'static str {
        match self {
            Self::Aligned => "합의, 기대",
            Self::PullbackInUptrend => {
                "전체 추세는 상승이지만 단기 파동이 조정 중. 진입 전 반전 신호 확인 필요"
            }
            Self::ReboundInDowntrend => {
                "전체 추세는 하락이지만 단기 파동이 반등 조짐. 추가 확인 신호 관찰"
            }
            Self::Divergent => "역위상, 신중",
        }
    }
}

impl fmt::Display for Consensus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Aligned => "ALIGNED",
            Self::PullbackInUptrend => "PULLBACK_IN_UPTREND",
            Self::ReboundInDowntrend => "REBOUND_IN_DOWNTREND",
            Self::Divergent => "DIVERGENT",
        };
        write!(f, "{}", s)
    }
}

/// 매매 마인드셋.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradingMindset {
    /// 기대 (흔들기에 겁먹지 않기)
    Expectation,
    /// 신중 (물량 50% 축소)
    Cautious,
}

impl TradingMindset {
    pub fn from_labels(large: TrendLabel, small: TrendLabel) -> Self {
        if large == small {
            Self::Expectation
        } else {
            Self::Cautious
        }
    }

    /// 권장 물량 비율.
    pub fn volume_factor(self) -> f64 {
        match self {
            Self::Expectation => 1.0,
            Self::Cautious => 0.5,
        }
    }

    /// 설명 문자열
    pub fn description(self) -> &'static str {
        match self {
            Self::Expectation => "기대 (흔들기에 겁먹지 않기)",
            Self::Cautious => "신중 (물량 50% 축소)",
        }
    }
}

impl fmt::Display for TradingMindset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expectation => write!(f, "EXPECTATION"),
            Self::Cautious => write!(f, "CAUTIOUS"),
        }
    }
}

/// 평가 중 발생한 경고.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "group", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendWarning {
    /// 그룹의 모든 타임프레임이 횡보
    AllSideways(GroupKind),
    /// 큰 그룹 라벨이 횡보
    LargeSidewaysNeedsConfirmation,
    /// 작은 그룹 라벨이 횡보
    SmallSidewaysFollowStructure,
    /// 큰 그룹 하락 중 작은 그룹 상승
    CounterTrendRisk,
}

impl TrendWarning {
    /// 경고 메시지
    pub fn message(self) -> String {
        match self {
            Self::AllSideways(kind) => format!(
                "{}가 모두 횡보입니다. 더 정확한 분석을 위해 다른 상태를 선택하세요",
                kind.description()
            ),
            Self::LargeSidewaysNeedsConfirmation => {
                "횡보는 매매 전 확인 신호가 필요합니다".to_string()
            }
            Self::SmallSidewaysFollowStructure => {
                "파동 구조를 따라 진입하고 매우 신중하게 대응하세요".to_string()
            }
            Self::CounterTrendRisk => {
                "리스크 15% 증가: 전체 추세는 하락이지만 단기 파동은 상승입니다".to_string()
            }
        }
    }
}

impl fmt::Display for TrendWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllSideways(kind) => write!(f, "ALL_SIDEWAYS({})", kind),
            Self::LargeSidewaysNeedsConfirmation => write!(f, "LARGE_SIDEWAYS_NEEDS_CONFIRMATION"),
            Self::SmallSidewaysFollowStructure => write!(f, "SMALL_SIDEWAYS_FOLLOW_STRUCTURE"),
            Self::CounterTrendRisk => write!(f, "COUNTER_TREND_RISK"),
        }
    }
}

/// 한 번의 평가 결과 전체.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub large: GroupAnalysis,
    pub small: GroupAnalysis,
    pub alignment: AlignmentAdjustment,
    pub region: RegionAssessment,
    pub composite: CompositeScore,
    pub consensus: Consensus,
    pub mindset: TradingMindset,
    pub warnings: Vec<TrendWarning>,
}

impl TrendReport {
    pub fn has_warning(&self, warning: TrendWarning) -> bool {
        self.warnings.contains(&warning)
    }
}
