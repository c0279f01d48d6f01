//! 가격 및 지지/저항 레벨 타입.
//!
//! "미설정" 레벨은 센티널 값 대신 `Option`으로 표현합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TrendError, TrendResult};

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 한쪽(지지 또는 저항)에 설정할 수 있는 최대 레벨 수.
pub const MAX_LEVELS_PER_SIDE: usize = 3;

/// 가격 레벨 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelKind {
    /// 지지
    Support,
    /// 저항
    Resistance,
}

impl fmt::Display for LevelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Support => write!(f, "support"),
            Self::Resistance => write!(f, "resistance"),
        }
    }
}

/// 설정된 지지/저항 레벨 집합.
///
/// 입력 순서를 유지합니다. 가장 가까운 레벨 탐색에서 동률일 때
/// 지지 → 저항, 각 목록의 입력 순서대로 먼저 나온 레벨이 선택됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevels {
    supports: Vec<Price>,
    resistances: Vec<Price>,
}

impl PriceLevels {
    /// 슬롯 목록에서 레벨 집합을 생성합니다. `None` 슬롯은 건너뜁니다.
    ///
    /// # 에러
    ///
    /// 한쪽에 `MAX_LEVELS_PER_SIDE`개를 넘는 레벨이 설정되면 `TrendError::InvalidInput`
    pub fn new<S, R>(supports: S, resistances: R) -> TrendResult<Self>
    where
        S: IntoIterator<Item = Option<Price>>,
        R: IntoIterator<Item = Option<Price>>,
    {
        let supports: Vec<Price> = supports.into_iter().flatten().collect();
        let resistances: Vec<Price> = resistances.into_iter().flatten().collect();

        for (kind, levels) in [
            (LevelKind::Support, &supports),
            (LevelKind::Resistance, &resistances),
        ] {
            if levels.len() > MAX_LEVELS_PER_SIDE {
                return Err(TrendError::InvalidInput(format!(
                    "{} 레벨은 최대 {}개까지 설정할 수 있습니다 (입력: {}개)",
                    kind,
                    MAX_LEVELS_PER_SIDE,
                    levels.len()
                )));
            }
        }

        Ok(Self {
            supports,
            resistances,
        })
    }

    /// 레벨이 없는 집합.
    pub fn empty() -> Self {
        Self::default()
    }

    /// 지지 레벨 (입력 순서).
    pub fn supports(&self) -> &[Price] {
        &self.supports
    }

    /// 저항 레벨 (입력 순서).
    pub fn resistances(&self) -> &[Price] {
        &self.resistances
    }

    /// 탐색 순서(지지 먼저)로 모든 레벨을 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (LevelKind, Price)> + '_ {
        self.supports
            .iter()
            .map(|&p| (LevelKind::Support, p))
            .chain(self.resistances.iter().map(|&p| (LevelKind::Resistance, p)))
    }

    pub fn is_empty(&self) -> bool {
        self.supports.is_empty() && self.resistances.is_empty()
    }
}
