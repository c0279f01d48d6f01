//! 포지션 사이징 명령어.
//!
//! ```bash
//! trend size --equity 100000 --entry 50420 --stop-loss 50380 --take-profit 50600
//! ```

use anyhow::{bail, Result};
use rust_decimal::Decimal;
use tracing::info;
use trend_core::{Price, RiskConfig};
use trend_risk::{PositionPlan, PositionSizer};

/// 사이징 CLI 설정
#[derive(Debug, Clone)]
pub struct SizeCliConfig {
    /// 자본금
    pub equity: Decimal,
    /// 진입가
    pub entry: Price,
    /// 손절가
    pub stop_loss: Price,
    /// 참고용 익절가
    pub take_profit: Option<Price>,
}

/// 진입 계획을 계산합니다.
pub fn run_size(config: &SizeCliConfig, risk: &RiskConfig) -> Result<PositionPlan> {
    if config.equity.is_sign_negative() {
        bail!("Equity must not be negative: {}", config.equity);
    }

    let sizer = PositionSizer::new(risk.clone());
    let plan = sizer.plan_with_target(
        config.equity,
        config.entry,
        config.stop_loss,
        config.take_profit,
    );

    info!(
        size = %plan.position_size.round_dp(2),
        exceeds = plan.exceeds_risk_threshold,
        "Position size calculated"
    );

    Ok(plan)
}

/// 진입 계획을 텍스트로 출력합니다.
pub fn render_plan(plan: &PositionPlan, risk: &RiskConfig) -> String {
    let mut lines = vec![
        format!("자본금: {}", plan.equity),
        format!("진입가: {} / 손절가: {}", plan.entry, plan.stop_loss),
        format!(
            "리스크 금액: {} ({}%)",
            plan.risk_amount.round_dp(2),
            risk.risk_per_trade_pct
        ),
        format!("손절 거리: {:.4}%", plan.stop_loss_pct),
        format!("권장 물량: {:.2} lot", plan.position_size),
    ];

    if let Some(tp) = plan.take_profit {
        let ratio = plan
            .reward_risk_ratio()
            .map(|r| format!("{:.2}", r))
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!("참고 익절가: {} (손익비 {})", tp, ratio));
    }

    if plan.exceeds_risk_threshold {
        lines.push(format!(
            "⚠️ 리스크 임계값 {}% 초과!",
            risk.max_stop_loss_pct
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config(stop_loss: Decimal) -> SizeCliConfig {
        SizeCliConfig {
            equity: dec!(100000),
            entry: dec!(100),
            stop_loss,
            take_profit: Some(dec!(106)),
        }
    }

    #[test]
    fn test_run_size() {
        let plan = run_size(&config(dec!(99)), &RiskConfig::default()).unwrap();

        assert_eq!(plan.position_size, dec!(1));
        assert_eq!(plan.take_profit, Some(dec!(106)));
        assert!(!plan.exceeds_risk_threshold);
    }

    #[test]
    fn test_negative_equity_rejected() {
        let mut cfg = config(dec!(99));
        cfg.equity = dec!(-1);

        assert!(run_size(&cfg, &RiskConfig::default()).is_err());
    }

    #[test]
    fn test_render_plan_with_warning() {
        let risk = RiskConfig::default();
        let plan = run_size(&config(dec!(98)), &risk).unwrap();
        let text = render_plan(&plan, &risk);

        assert!(text.contains("권장 물량: 0.50 lot"));
        assert!(text.contains("손익비 3.00"));
        assert!(text.contains("임계값 1% 초과"));
    }
}
