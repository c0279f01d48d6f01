//! Posture - 종합 점수에 따른 최종 행동 권고.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 종합 점수(%)에 따른 3단계 리스크 자세.
///
/// 추세 라벨(5단계)과는 별도의 척도입니다.
///
/// - **Aggressive**: total > 60
/// - **Cautious**: total < 40
/// - **CautiousWithTiming**: 40 <= total <= 60
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Posture {
    /// 공격적 (탐욕 스위치)
    Aggressive,
    /// 신중 (신중 스위치)
    Cautious,
    /// 신중 + 타이밍 대기
    CautiousWithTiming,
}

impl Posture {
    /// 설명 문자열
    pub fn description(self) -> &'static str {
        match self {
            Self::Aggressive => "탐욕 스위치 켜기",
            Self::Cautious => "신중 스위치 켜기",
            Self::CautiousWithTiming => "신중 스위치와 타이밍 스위치 켜기",
        }
    }

    /// 공격적 자세인지 확인합니다.
    pub fn is_aggressive(self) -> bool {
        matches!(self, Self::Aggressive)
    }
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Aggressive => "AGGRESSIVE",
            Self::Cautious => "CAUTIOUS",
            Self::CautiousWithTiming => "CAUTIOUS_WITH_TIMING",
        };
        write!(f, "{}", s)
    }
}
