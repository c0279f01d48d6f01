//! 수동 추세 평가를 위한 타임프레임 정의.
//!
//! 타임프레임은 "H4", "2D", "W" 같은 자유 형식 식별자이며,
//! 그룹은 집계 대상과 인접 순서를 함께 정의합니다.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{TrendError, TrendResult};

/// 기본 큰 그룹 (거시 추세) 타임프레임.
pub const DEFAULT_LARGE_TIMEFRAMES: &[&str] =
    &["W", "6D", "5D", "4D", "3D", "2D", "D", "H16", "H12"];

/// 기본 작은 그룹 (단기 파동) 타임프레임.
pub const DEFAULT_SMALL_TIMEFRAMES: &[&str] = &[
    "D", "H16", "H12", "H11", "H10", "H9", "H8", "H7", "H6", "H5", "H4", "H3", "H2", "H1",
];

/// 타임프레임 식별자.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeframeId(String);

impl TimeframeId {
    /// 새 식별자를 생성합니다. 앞뒤 공백은 제거되며 빈 문자열은 거부됩니다.
    pub fn new(id: impl AsRef<str>) -> TrendResult<Self> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TrendError::InvalidInput(
                "타임프레임 식별자가 비어 있습니다".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// 식별자 문자열.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeframeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TimeframeId {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TimeframeId {
    type Error = TrendError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TimeframeId> for String {
    fn from(id: TimeframeId) -> Self {
        id.0
    }
}

impl AsRef<str> for TimeframeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 타임프레임 그룹 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// 큰 그룹 (거시 추세)
    Large,
    /// 작은 그룹 (단기 파동)
    Small,
}

impl GroupKind {
    /// 설명 문자열
    pub fn description(self) -> &'static str {
        match self {
            Self::Large => "큰 타임프레임 (전체 추세)",
            Self::Small => "작은 타임프레임 (단기 파동)",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Large => write!(f, "large"),
            Self::Small => write!(f, "small"),
        }
    }
}

/// 정렬된 타임프레임 그룹.
///
/// 순서는 집계 대상일 뿐 아니라 연속 구간 묶기에서 인접성을 판단하는 기준입니다.
/// 식별자는 그룹 내에서 중복될 수 없습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeframeGroup {
    kind: GroupKind,
    timeframes: Vec<TimeframeId>,
}

impl TimeframeGroup {
    /// 식별자 목록으로 그룹을 생성합니다.
    ///
    /// # 에러
    ///
    /// 빈 식별자 또는 중복 식별자가 있으면 `TrendError::Config`
    pub fn new<I, S>(kind: GroupKind, ids: I) -> TrendResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut timeframes = Vec::new();

        for raw in ids {
            let id = TimeframeId::new(raw.as_ref())
                .map_err(|e| TrendError::Config(format!("{} 그룹: {}", kind, e)))?;
            if !seen.insert(id.clone()) {
                return Err(TrendError::Config(format!(
                    "{} 그룹에 중복된 타임프레임: {}",
                    kind, id
                )));
            }
            timeframes.push(id);
        }

        Ok(Self { kind, timeframes })
    }

    /// 기본 큰 그룹.
    pub fn default_large() -> Self {
        Self {
            kind: GroupKind::Large,
            timeframes: DEFAULT_LARGE_TIMEFRAMES
                .iter()
                .map(|s| TimeframeId(s.to_string()))
                .collect(),
        }
    }

    /// 기본 작은 그룹.
    pub fn default_small() -> Self {
        Self {
            kind: GroupKind::Small,
            timeframes: DEFAULT_SMALL_TIMEFRAMES
                .iter()
                .map(|s| TimeframeId(s.to_string()))
                .collect(),
        }
    }

    /// 그룹 종류.
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// 정렬된 식별자 슬라이스.
    pub fn timeframes(&self) -> &[TimeframeId] {
        &self.timeframes
    }

    /// 기준 순서에서의 위치.
    pub fn position(&self, id: &TimeframeId) -> Option<usize> {
        self.timeframes.iter().position(|tf| tf == id)
    }

    /// 그룹에 포함되는지 확인합니다.
    pub fn contains(&self, id: &TimeframeId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.timeframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeframes.is_empty()
    }
}
