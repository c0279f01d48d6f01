//! 포지션 크기 계산.
//!
//! 제공 기능:
//! - 자본 대비 고정 비율 리스크 금액 계산
//! - 진입가/손절가 기반 손절 거리 비율 계산
//! - 권장 포지션 크기와 손절 거리 임계값 검사

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};
use trend_core::{Price, RiskConfig};

/// 퍼센트를 금액으로 변환. 결과가 표현 범위를 넘으면 0.
/// 예시: pct_to_amount(1000, 10.0) = 100 (1000의 10%)
fn pct_to_amount(amount: Decimal, pct: f64) -> Decimal {
    // 퍼센트의 소수점 4자리까지 지원
    let scaled_pct = (pct * 10000.0).round() as i64;
    amount
        .checked_mul(Decimal::new(scaled_pct, 6).normalize())
        .unwrap_or(Decimal::ZERO)
}

/// f64 퍼센트 값을 소수점 4자리 Decimal로 변환.
fn pct_to_decimal(pct: f64) -> Decimal {
    let scaled_pct = (pct * 10000.0).round() as i64;
    Decimal::new(scaled_pct, 4)
}

/// 한 번의 진입에 대한 사이징 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionPlan {
    /// 자본금
    pub equity: Decimal,
    /// 진입가
    pub entry: Price,
    /// 손절가
    pub stop_loss: Price,
    /// 참고용 익절가 (계산에 사용하지 않음)
    pub take_profit: Option<Price>,
    /// 거래당 리스크 금액
    pub risk_amount: Decimal,
    /// 진입가 대비 손절 거리 (%)
    pub stop_loss_pct: Decimal,
    /// 권장 포지션 크기 (lot)
    pub position_size: Decimal,
    /// 손절 거리가 설정된 임계값을 넘는지 여부
    pub exceeds_risk_threshold: bool,
}

impl PositionPlan {
    /// 손익비 (익절 거리 / 손절 거리). 익절가가 없거나 손절 거리가 0이면 `None`.
    pub fn reward_risk_ratio(&self) -> Option<Decimal> {
        let take_profit = self.take_profit?;
        let risk = self.entry.checked_sub(self.stop_loss)?.abs();
        if risk.is_zero() {
            return None;
        }
        take_profit.checked_sub(self.entry)?.abs().checked_div(risk)
    }

    /// 물량 비율을 적용한 포지션 크기.
    ///
    /// 예: 신중 모드에서 `factor = 0.5`이면 권장 크기의 절반
    pub fn scaled_size(&self, factor: f64) -> Decimal {
        pct_to_amount(self.position_size, factor * 100.0)
    }
}

/// 리스크 기반 포지션 사이저.
#[derive(Debug, Clone, Default)]
pub struct PositionSizer {
    config: RiskConfig,
}

impl PositionSizer {
    /// 주어진 설정으로 새 포지션 사이저를 생성.
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// 거래당 리스크 금액.
    pub fn risk_amount(&self, equity: Decimal) -> Decimal {
        pct_to_amount(equity, self.config.risk_per_trade_pct)
    }

    /// 진입가 대비 손절 거리 비율(%). 진입가가 0이면 0.
    ///
    /// 진입가가 음수면 비율도 음수입니다. 표현 범위를 넘는 거리는
    /// 진입가 부호에 따라 `Decimal::MAX` 또는 `Decimal::MIN`으로 포화됩니다.
    pub fn stop_loss_pct(&self, entry: Price, stop_loss: Price) -> Decimal {
        if entry.is_zero() {
            return Decimal::ZERO;
        }
        let saturated = if entry.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        };

        entry
            .checked_sub(stop_loss)
            .map(|diff| diff.abs())
            .and_then(|diff| diff.checked_div(entry))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(saturated)
    }

    /// 진입 계획을 계산합니다.
    ///
    /// # 인자
    /// * `equity` - 자본금
    /// * `entry` - 진입가
    /// * `stop_loss` - 손절가
    ///
    /// # 반환값
    /// 리스크 금액, 손절 거리 비율, 권장 포지션 크기가 포함된 계획.
    /// 손절 거리나 자본금이 0 이하이거나 중간 계산이 표현 범위를 넘으면
    /// 포지션 크기는 0입니다.
    pub fn plan(&self, equity: Decimal, entry: Price, stop_loss: Price) -> PositionPlan {
        let risk_amount = self.risk_amount(equity);
        let stop_loss_pct = self.stop_loss_pct(entry, stop_loss);

        let exposure = (stop_loss_pct / Decimal::ONE_HUNDRED).checked_mul(equity);
        let position_size = match exposure {
            Some(exposure) if stop_loss_pct > Decimal::ZERO && !exposure.is_zero() => {
                risk_amount.checked_div(exposure).unwrap_or(Decimal::ZERO)
            }
            _ => Decimal::ZERO,
        };

        let exceeds_risk_threshold = stop_loss_pct > pct_to_decimal(self.config.max_stop_loss_pct);
        if exceeds_risk_threshold {
            warn!(
                stop_loss_pct = %stop_loss_pct.round_dp(4),
                threshold = self.config.max_stop_loss_pct,
                "Stop-loss distance exceeds risk threshold"
            );
        }

        debug!(
            %equity,
            %entry,
            %stop_loss,
            %risk_amount,
            position_size = %position_size.round_dp(4),
            "Position plan calculated"
        );

        PositionPlan {
            equity,
            entry,
            stop_loss,
            take_profit: None,
            risk_amount,
            stop_loss_pct,
            position_size,
            exceeds_risk_threshold,
        }
    }

    /// 참고용 익절가를 포함해 진입 계획을 계산합니다.
    pub fn plan_with_target(
        &self,
        equity: Decimal,
        entry: Price,
        stop_loss: Price,
        take_profit: Option<Price>,
    ) -> PositionPlan {
        PositionPlan {
            take_profit,
            ..self.plan(equity, entry, stop_loss)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pct_to_amount() {
        assert_eq!(pct_to_amount(dec!(1000), 10.0), dec!(100));
        assert_eq!(pct_to_amount(dec!(100000), 1.0), dec!(1000));
        assert_eq!(pct_to_amount(dec!(10000), 0.5), dec!(50));
    }

    #[test]
    fn test_default_plan() {
        let sizer = PositionSizer::default();
        let plan = sizer.plan(dec!(100000), dec!(50420), dec!(50380));

        assert_eq!(plan.risk_amount, dec!(1000));
        // 40 / 50420 * 100 = 0.0793...
        assert_eq!(plan.stop_loss_pct.round_dp(4), dec!(0.0793));
        // 1000 / (40 / 50420 * 100000) = 12.605
        assert_eq!(plan.position_size.round_dp(3), dec!(12.605));
        assert!(!plan.exceeds_risk_threshold);
    }

    #[test]
    fn test_short_side_uses_absolute_distance() {
        let sizer = PositionSizer::default();
        let long = sizer.plan(dec!(100000), dec!(100), dec!(98));
        let short = sizer.plan(dec!(100000), dec!(100), dec!(102));

        assert_eq!(long.stop_loss_pct, dec!(2));
        assert_eq!(long, PositionPlan { stop_loss: dec!(98), ..short.clone() });
    }

    #[test]
    fn test_threshold_exceeded() {
        let sizer = PositionSizer::default();
        let plan = sizer.plan(dec!(100000), dec!(100), dec!(98));

        assert_eq!(plan.stop_loss_pct, dec!(2));
        assert!(plan.exceeds_risk_threshold);
        // 1000 / (0.02 * 100000)
        assert_eq!(plan.position_size, dec!(0.5));
    }

    #[test]
    fn test_threshold_is_strict() {
        let sizer = PositionSizer::default();
        let plan = sizer.plan(dec!(100000), dec!(100), dec!(99));

        assert_eq!(plan.stop_loss_pct, dec!(1));
        assert!(!plan.exceeds_risk_threshold);
    }

    #[test]
    fn test_zero_guards() {
        let sizer = PositionSizer::default();

        let zero_entry = sizer.plan(dec!(100000), dec!(0), dec!(10));
        assert_eq!(zero_entry.stop_loss_pct, Decimal::ZERO);
        assert_eq!(zero_entry.position_size, Decimal::ZERO);

        let no_distance = sizer.plan(dec!(100000), dec!(100), dec!(100));
        assert_eq!(no_distance.position_size, Decimal::ZERO);

        let no_equity = sizer.plan(dec!(0), dec!(100), dec!(98));
        assert_eq!(no_equity.risk_amount, Decimal::ZERO);
        assert_eq!(no_equity.position_size, Decimal::ZERO);
    }

    #[test]
    fn test_negative_entry_gives_no_size() {
        let sizer = PositionSizer::default();
        let plan = sizer.plan(dec!(100000), dec!(-100), dec!(-98));

        assert_eq!(plan.stop_loss_pct, dec!(-2));
        assert_eq!(plan.position_size, Decimal::ZERO);
        assert!(!plan.exceeds_risk_threshold);
    }

    #[test]
    fn test_very_large_equity() {
        let sizer = PositionSizer::default();
        let plan = sizer.plan(dec!(10000000000000000000000000), dec!(100), dec!(99));

        assert_eq!(plan.risk_amount, dec!(100000000000000000000000));
        assert_eq!(plan.stop_loss_pct, dec!(1));
        assert_eq!(plan.position_size, dec!(1));
    }

    #[test]
    fn test_distant_stop_on_tiny_entry() {
        let sizer = PositionSizer::default();
        let plan = sizer.plan(dec!(100000), dec!(0.0000001), dec!(10000000000000000000000));

        assert_eq!(plan.stop_loss_pct, Decimal::MAX);
        assert!(plan.exceeds_risk_threshold);
        assert_eq!(plan.position_size, Decimal::ZERO);
    }

    #[test]
    fn test_equity_near_decimal_max() {
        let sizer = PositionSizer::default();
        let plan = sizer.plan(Decimal::MAX, dec!(100), dec!(98));

        assert_eq!(plan.stop_loss_pct, dec!(2));
        assert_eq!(plan.position_size.round_dp(6), dec!(0.5));
    }

    #[test]
    fn test_custom_risk_config() {
        let sizer = PositionSizer::new(RiskConfig {
            risk_per_trade_pct: 2.0,
            max_stop_loss_pct: 3.0,
        });
        let plan = sizer.plan(dec!(50000), dec!(100), dec!(98));

        assert_eq!(plan.risk_amount, dec!(1000));
        assert_eq!(plan.position_size, dec!(1));
        assert!(!plan.exceeds_risk_threshold);
    }

    #[test]
    fn test_take_profit_is_reference_only() {
        let sizer = PositionSizer::default();
        let with_tp = sizer.plan_with_target(dec!(100000), dec!(100), dec!(98), Some(dec!(106)));
        let without = sizer.plan(dec!(100000), dec!(100), dec!(98));

        assert_eq!(with_tp.position_size, without.position_size);
        assert_eq!(with_tp.reward_risk_ratio(), Some(dec!(3)));
        assert_eq!(without.reward_risk_ratio(), None);
    }

    #[test]
    fn test_scaled_size() {
        let sizer = PositionSizer::default();
        let plan = sizer.plan(dec!(100000), dec!(100), dec!(98));

        assert_eq!(plan.scaled_size(0.5), dec!(0.25));
        assert_eq!(plan.scaled_size(1.0), dec!(0.5));
    }

    #[test]
    fn test_plan_serializes() {
        let plan = PositionSizer::default().plan(dec!(100000), dec!(100), dec!(98));
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["exceeds_risk_threshold"], true);
        assert_eq!(json["take_profit"], serde_json::Value::Null);
    }
}
