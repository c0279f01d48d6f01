//! 전체 평가 파이프라인.
//!
//! 집계 → 정렬 조정 → 지역 편향 → 종합 점수 순서로 한 번 실행합니다.

use tracing::{debug, warn};
use trend_core::{
    AppConfig, GroupStates, MarketSnapshot, Price, PriceLevels, ScoringConfig, TrendLabel,
    TrendResult,
};

use crate::alignment::adjust_with_config;
use crate::classify::classify_trend;
use crate::composite::composite_with_config;
use crate::region::RegionAssessment;
use crate::report::{Consensus, GroupAnalysis, TradingMindset, TrendReport, TrendWarning};
use crate::runs::DirectionBreakdown;

/// 한 번의 평가를 위한 불변 입력.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationInput {
    /// 큰 그룹 상태 (전체 매핑)
    pub large: GroupStates,
    /// 작은 그룹 상태 (전체 매핑)
    pub small: GroupStates,
    /// 진입가
    pub entry: Price,
    /// 센티널이 제거된 지지/저항
    pub levels: PriceLevels,
}

impl EvaluationInput {
    /// 스냅샷과 설정으로부터 입력을 구성합니다.
    ///
    /// `fill_unset`이 false면 설정된 타임프레임 중 상태가 없는 것이 있을 때 실패합니다.
    pub fn from_snapshot(
        snapshot: &MarketSnapshot,
        config: &AppConfig,
        fill_unset: bool,
    ) -> TrendResult<Self> {
        let large = snapshot.large_states(config.timeframes.large_group()?, fill_unset)?;
        let small = snapshot.small_states(config.timeframes.small_group()?, fill_unset)?;
        let levels = snapshot.levels.to_price_levels(&config.levels)?;

        Ok(Self {
            large,
            small,
            entry: snapshot.position.entry,
            levels,
        })
    }
}

/// 추세 평가기.
#[derive(Debug, Clone, Default)]
pub struct TrendEvaluator {
    config: ScoringConfig,
}

impl TrendEvaluator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// 입력 하나를 평가합니다. 같은 입력에는 항상 같은 리포트를 반환합니다.
    pub fn evaluate(&self, input: &EvaluationInput) -> TrendReport {
        let span = trend_core::evaluation_span!("evaluate", input.entry);
        let _guard = span.enter();

        let large_score = input.large.score();
        let small_score = input.small.score();
        debug!(large_score, small_score, "Aggregated group scores");

        let alignment = adjust_with_config(large_score, small_score, &self.config);
        debug!(
            kind = %alignment.kind,
            adjusted_small = alignment.adjusted_small,
            "Applied alignment adjustment"
        );

        let region = RegionAssessment::assess(input.entry, &input.levels, large_score);
        debug!(
            bias = region.bias.value(),
            nearest = ?region.nearest.map(|n| n.price),
            "Assessed nearest level"
        );

        let composite = composite_with_config(
            large_score,
            alignment.adjusted_small,
            region.bias.as_f64(),
            &self.config,
        );

        let large = GroupAnalysis {
            kind: input.large.kind(),
            raw_score: large_score,
            score: large_score,
            label: classify_trend(large_score),
            breakdown: DirectionBreakdown::from_group(&input.large),
            all_sideways: input.large.all_sideways(),
        };
        let small = GroupAnalysis {
            kind: input.small.kind(),
            raw_score: small_score,
            score: alignment.adjusted_small,
            label: classify_trend(alignment.adjusted_small),
            breakdown: DirectionBreakdown::from_group(&input.small),
            all_sideways: input.small.all_sideways(),
        };

        let mut warnings = Vec::new();
        if large.all_sideways {
            warnings.push(TrendWarning::AllSideways(large.kind));
        }
        if large.label == TrendLabel::Sideways {
            warnings.push(TrendWarning::LargeSidewaysNeedsConfirmation);
        }
        if small.all_sideways {
            warnings.push(TrendWarning::AllSideways(small.kind));
        }
        if alignment.counter_trend_risk {
            warn!(
                large_score,
                small_score,
                "Counter-trend risk: large group falling while small group rising"
            );
            warnings.push(TrendWarning::CounterTrendRisk);
        }
        if small.label == TrendLabel::Sideways {
            warnings.push(TrendWarning::SmallSidewaysFollowStructure);
        }

        let consensus = Consensus::from_labels(large.label, small.label);
        let mindset = TradingMindset::from_labels(large.label, small.label);

        debug!(
            total = composite.total,
            posture = %composite.posture,
            consensus = %consensus,
            warnings = warnings.len(),
            "Evaluation complete"
        );

        TrendReport {
            large,
            small,
            alignment,
            region,
            composite,
            consensus,
            mindset,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::AlignmentKind;
    use rust_decimal_macros::dec;
    use trend_core::{GroupKind, Posture, TimeframeGroup, TrendState};

    fn group(kind: GroupKind, ids: &[&str]) -> TimeframeGroup {
        TimeframeGroup::new(kind, ids.iter().copied()).unwrap()
    }

    fn states(kind: GroupKind, pairs: &[(&str, TrendState)]) -> GroupStates {
        let ids: Vec<&str> = pairs.iter().map(|(id, _)| *id).collect();
        GroupStates::builder(group(kind, &ids))
            .set_all(pairs.iter().copied())
            .unwrap()
            .build()
            .unwrap()
    }

    fn bullish_input() -> EvaluationInput {
        EvaluationInput {
            large: states(
                GroupKind::Large,
                &[("W", TrendState::StrongestUp), ("D", TrendState::Uptrend)],
            ),
            small: states(
                GroupKind::Small,
                &[("H4", TrendState::VeryStrongUp), ("H1", TrendState::Up)],
            ),
            entry: dec!(50420),
            levels: PriceLevels::new([Some(dec!(50380))], [Some(dec!(51000))]).unwrap(),
        }
    }

    #[test]
    fn test_bullish_evaluation() {
        let report = TrendEvaluator::default().evaluate(&bullish_input());

        // large = (100 + 50) / 2 = 75, small = (75 + 25) / 2 = 50 → 60
        assert_eq!(report.large.score, 75.0);
        assert_eq!(report.small.raw_score, 50.0);
        assert_eq!(report.small.score, 60.0);
        assert_eq!(report.alignment.kind, AlignmentKind::Reinforced);
        assert_eq!(report.region.bias.value(), 5);

        // 45 + 18 + 0.5
        assert!((report.composite.total - 63.5).abs() < 1e-9);
        assert_eq!(report.composite.posture, Posture::Aggressive);

        assert_eq!(report.large.label, TrendLabel::StrongUp);
        assert_eq!(report.small.label, TrendLabel::StrongUp);
        assert_eq!(report.consensus, Consensus::Aligned);
        assert_eq!(report.mindset, TradingMindset::Expectation);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let evaluator = TrendEvaluator::default();
        let input = bullish_input();

        assert_eq!(evaluator.evaluate(&input), evaluator.evaluate(&input));
    }

    #[test]
    fn test_counter_trend_warning() {
        let input = EvaluationInput {
            large: states(GroupKind::Large, &[("W", TrendState::Downtrend)]),
            small: states(GroupKind::Small, &[("H4", TrendState::Uptrend)]),
            entry: dec!(100),
            levels: PriceLevels::empty(),
        };
        let report = TrendEvaluator::default().evaluate(&input);

        assert!(report.alignment.counter_trend_risk);
        assert_eq!(report.small.score, 50.0);
        assert!(report.has_warning(TrendWarning::CounterTrendRisk));
        assert_eq!(report.consensus, Consensus::ReboundInDowntrend);
        assert_eq!(report.mindset, TradingMindset::Cautious);
    }

    #[test]
    fn test_all_sideways_warnings() {
        let large = GroupStates::uniform(group(GroupKind::Large, &["W", "D"]), TrendState::Sideways);
        let small = GroupStates::uniform(group(GroupKind::Small, &["H4"]), TrendState::Sideways);
        let input = EvaluationInput {
            large,
            small,
            entry: dec!(100),
            levels: PriceLevels::empty(),
        };
        let report = TrendEvaluator::default().evaluate(&input);

        assert_eq!(
            report.warnings,
            vec![
                TrendWarning::AllSideways(GroupKind::Large),
                TrendWarning::LargeSidewaysNeedsConfirmation,
                TrendWarning::AllSideways(GroupKind::Small),
                TrendWarning::SmallSidewaysFollowStructure,
            ]
        );
        assert_eq!(report.composite.total, 0.0);
        assert_eq!(report.composite.posture, Posture::Cautious);
    }

    #[test]
    fn test_empty_group_counts_as_all_sideways() {
        let input = EvaluationInput {
            large: GroupStates::uniform(group(GroupKind::Large, &[]), TrendState::Sideways),
            small: states(GroupKind::Small, &[("H4", TrendState::Uptrend)]),
            entry: dec!(100),
            levels: PriceLevels::empty(),
        };
        let report = TrendEvaluator::default().evaluate(&input);

        assert_eq!(report.large.score, 0.0);
        assert!(report.large.all_sideways);
        assert!(report.has_warning(TrendWarning::AllSideways(GroupKind::Large)));
        assert!(!report.has_warning(TrendWarning::AllSideways(GroupKind::Small)));
    }

    #[test]
    fn test_pullback_in_uptrend() {
        let input = EvaluationInput {
            large: states(GroupKind::Large, &[("W", TrendState::VeryStrongUp)]),
            small: states(GroupKind::Small, &[("H4", TrendState::Downtrend)]),
            entry: dec!(100),
            levels: PriceLevels::empty(),
        };
        let report = TrendEvaluator::default().evaluate(&input);

        // -50 - 20
        assert_eq!(report.small.score, -70.0);
        assert_eq!(report.small.label, TrendLabel::StrongDown);
        assert_eq!(report.consensus, Consensus::PullbackInUptrend);
    }

    #[test]
    fn test_from_snapshot_with_default_config() {
        let snapshot = MarketSnapshot::from_toml_str(
            r#"
            [position]
            entry = 50420

            [large]
            W = "QTT"

            [levels]
            supports = [50380, 0]
            resistances = [100000]
            "#,
        )
        .unwrap();
        let config = AppConfig::default();

        assert!(EvaluationInput::from_snapshot(&snapshot, &config, false).is_err());

        let input = EvaluationInput::from_snapshot(&snapshot, &config, true).unwrap();
        assert_eq!(input.large.group().len(), 9);
        assert_eq!(input.small.group().len(), 14);
        assert_eq!(input.levels.supports(), &[dec!(50380)]);
        assert!(input.levels.resistances().is_empty());
    }
}
