//! 입력 스냅샷 형식.
//!
//! 한 번의 평가에 필요한 사용자 입력(상태, 가격 레벨, 진입/손절)을
//! TOML 또는 JSON 파일로 표현합니다.
//!
//! ```toml
//! [position]
//! equity = 100000
//! entry = 50420
//! stop_loss = 50380
//!
//! [large]
//! W = "QTT"
//! D = "XHT"
//!
//! [small]
//! H4 = "G"
//!
//! [levels]
//! supports = [50380]
//! resistances = [50450]
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::config::LevelConfig;
use crate::domain::{GroupStates, TrendState};
use crate::error::{TrendError, TrendResult};
use crate::types::{Price, PriceLevels, TimeframeGroup};

/// 진입/손절 정보.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionInput {
    /// 자본금
    #[serde(default = "default_equity")]
    pub equity: Decimal,
    /// 진입가
    pub entry: Price,
    /// 손절가
    #[serde(default)]
    pub stop_loss: Option<Price>,
    /// 참고용 익절가
    #[serde(default)]
    pub take_profit: Option<Price>,
}

fn default_equity() -> Decimal {
    Decimal::from(100_000)
}

/// 지지/저항 입력 (미설정 센티널이 섞여 있을 수 있음).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelsInput {
    pub supports: Vec<Price>,
    pub resistances: Vec<Price>,
}

impl LevelsInput {
    /// 센티널을 제외한 `PriceLevels`로 변환합니다.
    pub fn to_price_levels(&self, config: &LevelConfig) -> TrendResult<PriceLevels> {
        let slot = |p: &Price| if config.is_unset(*p) { None } else { Some(*p) };
        PriceLevels::new(
            self.supports.iter().map(slot),
            self.resistances.iter().map(slot),
        )
    }
}

/// 한 번의 평가를 위한 입력 스냅샷.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// 진입/손절 정보
    pub position: PositionInput,
    /// 큰 그룹 상태 (타임프레임 → 상태 코드)
    #[serde(default)]
    pub large: BTreeMap<String, TrendState>,
    /// 작은 그룹 상태 (타임프레임 → 상태 코드)
    #[serde(default)]
    pub small: BTreeMap<String, TrendState>,
    /// 지지/저항 레벨
    #[serde(default)]
    pub levels: LevelsInput,
}

impl MarketSnapshot {
    /// 파일에서 스냅샷을 읽습니다. 확장자가 `.json`이면 JSON, 그 외에는 TOML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> TrendResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| TrendError::Io(format!("{}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!(path = %path.display(), is_json, "Reading snapshot");

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> TrendResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> TrendResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// 큰 그룹 상태를 검증해 생성합니다.
    pub fn large_states(
        &self,
        group: TimeframeGroup,
        fill_unset: bool,
    ) -> TrendResult<GroupStates> {
        build_states(group, &self.large, fill_unset)
    }

    /// 작은 그룹 상태를 검증해 생성합니다.
    pub fn small_states(
        &self,
        group: TimeframeGroup,
        fill_unset: bool,
    ) -> TrendResult<GroupStates> {
        build_states(group, &self.small, fill_unset)
    }
}

fn build_states(
    group: TimeframeGroup,
    states: &BTreeMap<String, TrendState>,
    fill_unset: bool,
) -> TrendResult<GroupStates> {
    let builder = GroupStates::builder(group)
        .set_all(states.iter().map(|(id, state)| (id.as_str(), *state)))?;

    if fill_unset {
        Ok(builder.build_filling_unset())
    } else {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroupKind;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"
        [position]
        equity = 100000
        entry = 50420
        stop_loss = 50380

        [large]
        W = "QTT"
        D = "XHT"

        [small]
        H4 = "G"

        [levels]
        supports = [3400, 100000, 100000]
        resistances = [50450, 0]
    "#;

    #[test]
    fn test_parse_toml_snapshot() {
        let snapshot = MarketSnapshot::from_toml_str(SAMPLE).unwrap();

        assert_eq!(snapshot.position.entry, dec!(50420));
        assert_eq!(snapshot.position.stop_loss, Some(dec!(50380)));
        assert_eq!(snapshot.position.take_profit, None);
        assert_eq!(snapshot.large.get("W"), Some(&TrendState::VeryStrongUp));
        assert_eq!(snapshot.large.len(), 2);
    }

    #[test]
    fn test_state_codes_are_exact_in_files() {
        let lowercase = SAMPLE.replace("H4 = \"G\"", "H4 = \"g\"");
        assert!(MarketSnapshot::from_toml_str(&lowercase).is_err());
    }

    #[test]
    fn test_sentinels_removed_from_levels() {
        let snapshot = MarketSnapshot::from_toml_str(SAMPLE).unwrap();
        let levels = snapshot
            .levels
            .to_price_levels(&LevelConfig::default())
            .unwrap();

        assert_eq!(levels.supports(), &[dec!(3400)]);
        assert_eq!(levels.resistances(), &[dec!(50450)]);
    }

    #[test]
    fn test_missing_states_reported_unless_filled() {
        let snapshot = MarketSnapshot::from_toml_str(SAMPLE).unwrap();
        let group = TimeframeGroup::new(GroupKind::Large, ["W", "2D", "D"]).unwrap();

        let strict = snapshot.large_states(group.clone(), false);
        assert!(matches!(strict, Err(TrendError::MissingState { .. })));

        let filled = snapshot.large_states(group, true).unwrap();
        assert_eq!(filled.score(), (75.0 + 0.0 + 50.0) / 3.0);
    }

    #[test]
    fn test_unknown_timeframe_in_snapshot() {
        let snapshot = MarketSnapshot::from_toml_str(SAMPLE).unwrap();
        let group = TimeframeGroup::new(GroupKind::Small, ["H1", "H2"]).unwrap();

        let result = snapshot.small_states(group, true);
        assert!(matches!(result, Err(TrendError::UnknownTimeframe { .. })));
    }

    #[test]
    fn test_parse_json_snapshot() {
        let json = r#"{
            "position": { "entry": "50420" },
            "large": { "W": "SQTT" },
            "levels": { "supports": ["50380"] }
        }"#;
        let snapshot = MarketSnapshot::from_json_str(json).unwrap();

        assert_eq!(snapshot.position.equity, dec!(100000));
        assert!(snapshot.small.is_empty());
        assert_eq!(snapshot.levels.supports, vec![dec!(50380)]);
    }
}
