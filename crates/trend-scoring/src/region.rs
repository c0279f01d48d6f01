//! 가장 가까운 지지/저항 레벨 기반 지역 편향.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use trend_core::{LevelKind, Price, PriceLevels};

/// 진입가에서 가장 가까운 레벨.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearestLevel {
    /// 지지 또는 저항
    pub kind: LevelKind,
    /// 레벨 가격
    pub price: Price,
    /// 진입가와의 절대 거리
    pub distance: Decimal,
}

/// 지역 편향 값. {-5, -2, 0, 2, 5} 중 하나.
///
/// 상수로만 만들 수 있으므로 역직렬화는 지원하지 않습니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RegionBias(i8);

impl RegionBias {
    pub const STRONG_BULLISH: Self = Self(5);
    pub const MILD_BULLISH: Self = Self(2);
    pub const NONE: Self = Self(0);
    pub const MILD_BEARISH: Self = Self(-2);
    pub const STRONG_BEARISH: Self = Self(-5);

    pub fn value(self) -> i8 {
        self.0
    }

    /// 종합 점수 계산용 값.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for RegionBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

/// 보고용 지역 평가 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionAssessment {
    pub nearest: Option<NearestLevel>,
    pub bias: RegionBias,
}

impl RegionAssessment {
    pub fn assess(entry: Price, levels: &PriceLevels, large_score: f64) -> Self {
        let nearest = find_nearest_level(entry, levels);
        Self {
            nearest,
            bias: nearest.map_or(RegionBias::NONE, |level| bias_for(entry, &level, large_score)),
        }
    }
}

/// 진입가와 절대 거리가 가장 작은 레벨을 찾습니다.
///
/// 지지선을 먼저, 그 다음 저항선을 입력 순서대로 훑습니다. 거리가 같으면
/// 먼저 만난 레벨을 유지합니다. 표현할 수 없을 만큼 먼 레벨의 거리는
/// `Decimal::MAX`로 취급합니다.
pub fn find_nearest_level(entry: Price, levels: &PriceLevels) -> Option<NearestLevel> {
    let mut nearest: Option<NearestLevel> = None;

    for (kind, price) in levels.iter() {
        let distance = entry
            .checked_sub(price)
            .map_or(Decimal::MAX, |diff| diff.abs());
        if nearest.map_or(true, |n| distance < n.distance) {
            nearest = Some(NearestLevel {
                kind,
                price,
                distance,
            });
        }
    }

    nearest
}

/// 가장 가까운 레벨과 큰 그룹 점수 부호로 지역 편향을 계산합니다.
///
/// | 레벨 | 진입가 위치 | 큰 그룹 | 편향 |
/// |---|---|---|---|
/// | 지지 | 위 | + | +5 |
/// | 지지 | 위 | - | -5 |
/// | 지지 | 위 | 0 | +2 |
/// | 지지 | 같거나 아래 (이탈) | any | 0 |
/// | 저항 | 아래 | + | -5 |
/// | 저항 | 아래 | - | +5 |
/// | 저항 | 아래 | 0 | -2 |
/// | 저항 | 같거나 위 (돌파) | any | 0 |
///
/// 레벨이 없으면 0.
pub fn nearest_level_bias(entry: Price, levels: &PriceLevels, large_score: f64) -> RegionBias {
    RegionAssessment::assess(entry, levels, large_score).bias
}

fn bias_for(entry: Price, level: &NearestLevel, large_score: f64) -> RegionBias {
    let intact = match level.kind {
        LevelKind::Support => entry > level.price,
        LevelKind::Resistance => entry < level.price,
    };
    if !intact {
        return RegionBias::NONE;
    }

    match level.kind {
        LevelKind::Support => {
            if large_score > 0.0 {
                RegionBias::STRONG_BULLISH
            } else if large_score < 0.0 {
                RegionBias::STRONG_BEARISH
            } else {
                RegionBias::MILD_BULLISH
            }
        }
        LevelKind::Resistance => {
            if large_score > 0.0 {
                RegionBias::STRONG_BEARISH
            } else if large_score < 0.0 {
                RegionBias::STRONG_BULLISH
            } else {
                RegionBias::MILD_BEARISH
            }
        }
    }
}
