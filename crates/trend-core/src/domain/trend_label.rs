//! TrendLabel - 그룹 점수의 5단계 추세 분류.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 그룹 점수(%)를 분류한 5단계 추세 라벨.
///
/// # 경계
///
/// - **StrongUp**: score >= 60
/// - **ModerateUp**: 40 <= score < 60
/// - **Sideways**: -40 < score < 40
/// - **ModerateDown**: -60 < score <= -40
/// - **StrongDown**: score <= -60
///
/// 위쪽은 `>= 60`, 아래쪽은 `> -60`으로 비대칭입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[derive(Default)]
pub enum TrendLabel {
    /// 강한 상승
    StrongUp,
    /// 보통 상승
    ModerateUp,
    /// 횡보
    #[default]
    Sideways,
    /// 보통 하락
    ModerateDown,
    /// 강한 하락
    StrongDown,
}

impl TrendLabel {
    /// 상승 라벨인지 확인합니다.
    pub fn is_up(self) -> bool {
        matches!(self, Self::StrongUp | Self::ModerateUp)
    }

    /// 하락 라벨인지 확인합니다.
    pub fn is_down(self) -> bool {
        matches!(self, Self::StrongDown | Self::ModerateDown)
    }

    /// 설명 문자열
    pub fn description(self) -> &'static str {
        match self {
            Self::StrongUp => "강한 상승",
            Self::ModerateUp => "보통 상승",
            Self::Sideways => "횡보",
            Self::ModerateDown => "보통 하락",
            Self::StrongDown => "강한 하락",
        }
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StrongUp => "STRONG_UP",
            Self::ModerateUp => "MODERATE_UP",
            Self::Sideways => "SIDEWAYS",
            Self::ModerateDown => "MODERATE_DOWN",
            Self::StrongDown => "STRONG_DOWN",
        };
        write!(f, "{}", s)
    }
}
