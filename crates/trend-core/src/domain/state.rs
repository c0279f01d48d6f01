//! TrendState - 타임프레임별 수동 추세 상태 태그.
//!
//! 사용자가 각 타임프레임에 지정하는 13단계 상태와 고정 가중치 테이블입니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrendError;

/// 가중치 부호로 본 상태의 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// 상승 (가중치 > 0)
    Rising,
    /// 하락 (가중치 < 0)
    Falling,
    /// 횡보 (가중치 = 0)
    Flat,
}

/// 타임프레임 추세 상태.
///
/// 직렬화 시에는 상태 코드(예: `"SQTT"`)를 사용합니다.
///
/// # 가중치 테이블
///
/// | 코드 | 가중치 | | 코드 | 가중치 |
/// |---|---|---|---|---|
/// | SQTT | 100 | | SQTG | -100 |
/// | QTT | 75 | | QTG | -75 |
/// | XHT | 50 | | XHG | -50 |
/// | CTT | 37.5 | | CTG | -37.5 |
/// | T | 25 | | G | -25 |
/// | MHT | 12.5 | | MHG | -12.5 |
/// | SW | 0 | | | |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum TrendState {
    /// 최강 상승
    #[serde(rename = "SQTT")]
    StrongestUp,
    /// 매우 강한 상승
    #[serde(rename = "QTT")]
    VeryStrongUp,
    /// 상승 추세
    #[serde(rename = "XHT")]
    Uptrend,
    /// 상승 초입
    #[serde(rename = "CTT")]
    EmergingUp,
    /// 상승
    #[serde(rename = "T")]
    Up,
    /// 상승 약화
    #[serde(rename = "MHT")]
    FadingUp,
    /// 횡보
    #[serde(rename = "SW")]
    #[default]
    Sideways,
    /// 하락 약화
    #[serde(rename = "MHG")]
    FadingDown,
    /// 하락
    #[serde(rename = "G")]
    Down,
    /// 하락 초입
    #[serde(rename = "CTG")]
    EmergingDown,
    /// 하락 추세
    #[serde(rename = "XHG")]
    Downtrend,
    /// 매우 강한 하락
    #[serde(rename = "QTG")]
    VeryStrongDown,
    /// 최강 하락
    #[serde(rename = "SQTG")]
    StrongestDown,
}

impl TrendState {
    /// 모든 상태 (가중치 내림차순).
    pub const ALL: [TrendState; 13] = [
        Self::StrongestUp,
        Self::VeryStrongUp,
        Self::Uptrend,
        Self::EmergingUp,
        Self::Up,
        Self::FadingUp,
        Self::Sideways,
        Self::FadingDown,
        Self::Down,
        Self::EmergingDown,
        Self::Downtrend,
        Self::VeryStrongDown,
        Self::StrongestDown,
    ];

    /// 상태의 부호 있는 가중치 (-100 ~ 100).
    pub const fn weight(self) -> f64 {
        match self {
            Self::StrongestUp => 100.0,
            Self::VeryStrongUp => 75.0,
            Self::Uptrend => 50.0,
            Self::EmergingUp => 37.5,
            Self::Up => 25.0,
            Self::FadingUp => 12.5,
            Self::Sideways => 0.0,
            Self::FadingDown => -12.5,
            Self::Down => -25.0,
            Self::EmergingDown => -37.5,
            Self::Downtrend => -50.0,
            Self::VeryStrongDown => -75.0,
            Self::StrongestDown => -100.0,
        }
    }

    /// 상태 코드.
    pub const fn code(self) -> &'static str {
        match self {
            Self::StrongestUp => "SQTT",
            Self::VeryStrongUp => "QTT",
            Self::Uptrend => "XHT",
            Self::EmergingUp => "CTT",
            Self::Up => "T",
            Self::FadingUp => "MHT",
            Self::Sideways => "SW",
            Self::FadingDown => "MHG",
            Self::Down => "G",
            Self::EmergingDown => "CTG",
            Self::Downtrend => "XHG",
            Self::VeryStrongDown => "QTG",
            Self::StrongestDown => "SQTG",
        }
    }

    /// 설명 문자열
    pub fn description(self) -> &'static str {
        match self {
            Self::StrongestUp => "최강 상승",
            Self::VeryStrongUp => "매우 강한 상승",
            Self::Uptrend => "상승 추세",
            Self::EmergingUp => "상승 초입",
            Self::Up => "상승",
            Self::FadingUp => "상승 약화",
            Self::Sideways => "횡보",
            Self::FadingDown => "하락 약화",
            Self::Down => "하락",
            Self::EmergingDown => "하락 초입",
            Self::Downtrend => "하락 추세",
            Self::VeryStrongDown => "매우 강한 하락",
            Self::StrongestDown => "최강 하락",
        }
    }

    /// 가중치 부호로 본 방향.
    pub fn direction(self) -> Direction {
        let w = self.weight();
        if w > 0.0 {
            Direction::Rising
        } else if w < 0.0 {
            Direction::Falling
        } else {
            Direction::Flat
        }
    }
}

impl fmt::Display for TrendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TrendState {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| TrendError::UnknownState(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_symmetric() {
        for state in TrendState::ALL {
            let mirror = TrendState::ALL
                .iter()
                .find(|s| s.weight() == -state.weight())
                .copied();
            assert!(mirror.is_some(), "{} has no mirror", state);
        }
    }

    #[test]
    fn test_weights_in_range_and_descending() {
        let weights: Vec<f64> = TrendState::ALL.iter().map(|s| s.weight()).collect();
        assert!(weights.iter().all(|w| (-100.0..=100.0).contains(w)));
        assert!(weights.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("SQTT".parse::<TrendState>().unwrap(), TrendState::StrongestUp);
        assert_eq!("ctg".parse::<TrendState>().unwrap(), TrendState::EmergingDown);
        assert_eq!(" SW ".parse::<TrendState>().unwrap(), TrendState::Sideways);
        assert!("UP".parse::<TrendState>().is_err());
    }

    #[test]
    fn test_direction() {
        assert_eq!(TrendState::FadingUp.direction(), Direction::Rising);
        assert_eq!(TrendState::Down.direction(), Direction::Falling);
        assert_eq!(TrendState::Sideways.direction(), Direction::Flat);
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&TrendState::VeryStrongDown).unwrap();
        assert_eq!(json, "\"QTG\"");

        let state: TrendState = serde_json::from_str("\"MHT\"").unwrap();
        assert_eq!(state, TrendState::FadingUp);
    }

    #[test]
    fn test_default() {
        assert_eq!(TrendState::default(), TrendState::Sideways);
    }
}
