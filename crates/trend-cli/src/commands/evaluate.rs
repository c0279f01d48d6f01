//! 스냅샷 평가 명령어.
//!
//! 스냅샷 파일(TOML 또는 JSON)을 읽어 추세 리포트를 출력합니다.
//!
//! # 사용 예시
//!
//! ```bash
//! # 텍스트 리포트
//! trend evaluate -i demos/snapshot.toml
//!
//! # 상태가 비어 있는 타임프레임은 횡보로 채우기
//! trend evaluate -i demos/snapshot.toml --fill-sideways
//!
//! # JSON 출력
//! trend evaluate -i demos/snapshot.toml --format json
//! ```

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use trend_core::{AppConfig, MarketSnapshot};
use trend_risk::{PositionPlan, PositionSizer};
use trend_scoring::{EvaluationInput, GroupAnalysis, TimeframeRun, TrendEvaluator, TrendReport};

use crate::commands::OutputFormat;

/// 평가 CLI 설정
#[derive(Debug, Clone)]
pub struct EvaluateCliConfig {
    /// 스냅샷 파일 경로
    pub input_path: PathBuf,
    /// 상태 없는 타임프레임을 횡보로 채울지 여부
    pub fill_sideways: bool,
    /// 출력 형식
    pub format: OutputFormat,
}

/// 평가 결과 (리포트 + 진입 계획).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationOutcome {
    pub report: TrendReport,
    /// 스냅샷에 손절가가 있을 때만 계산
    pub plan: Option<PositionPlan>,
    /// 마인드셋 물량 비율을 반영한 권장 크기
    pub suggested_size: Option<Decimal>,
}

/// 스냅샷 파일을 평가합니다.
pub fn run_evaluate(config: &EvaluateCliConfig, app: &AppConfig) -> Result<EvaluationOutcome> {
    let snapshot = MarketSnapshot::from_path(&config.input_path)
        .with_context(|| format!("Failed to read snapshot {}", config.input_path.display()))?;

    evaluate_snapshot(&snapshot, app, config.fill_sideways)
}

/// 이미 읽은 스냅샷을 평가합니다.
pub fn evaluate_snapshot(
    snapshot: &MarketSnapshot,
    app: &AppConfig,
    fill_sideways: bool,
) -> Result<EvaluationOutcome> {
    let input = EvaluationInput::from_snapshot(snapshot, app, fill_sideways).context(
        "Invalid snapshot (use --fill-sideways to treat missing timeframes as SW)",
    )?;
    debug!(
        large = input.large.group().len(),
        small = input.small.group().len(),
        levels = input.levels.iter().count(),
        "Snapshot validated"
    );

    let report = TrendEvaluator::new(app.scoring.clone()).evaluate(&input);

    let position = &snapshot.position;
    let plan = position.stop_loss.map(|stop_loss| {
        PositionSizer::new(app.risk.clone()).plan_with_target(
            position.equity,
            position.entry,
            stop_loss,
            position.take_profit,
        )
    });

    let suggested_size = plan
        .as_ref()
        .map(|plan| plan.scaled_size(report.mindset.volume_factor()));

    info!(
        total = report.composite.total,
        posture = %report.composite.posture,
        mindset = %report.mindset,
        "Evaluation finished"
    );

    Ok(EvaluationOutcome {
        report,
        plan,
        suggested_size,
    })
}

/// 설정된 형식으로 결과를 렌더링합니다.
pub fn render(outcome: &EvaluationOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(outcome)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(outcome).context("Failed to serialize report")
        }
    }
}

fn join_runs(runs: &[TimeframeRun], separator: &str) -> String {
    if runs.is_empty() {
        return "없음".to_string();
    }
    runs.iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

fn push_group(lines: &mut Vec<String>, title: &str, group: &GroupAnalysis) {
    lines.push(String::new());
    lines.push(format!("■ {}", title));
    lines.push(format!("  상승: {}", join_runs(&group.breakdown.rising, ", ")));
    lines.push(format!("  하락: {}", join_runs(&group.breakdown.falling, ", ")));
    lines.push(format!("  횡보: {}", join_runs(&group.breakdown.flat, " | ")));

    if group.raw_score == group.score {
        lines.push(format!("  결론: {} ({:.2}%)", group.label, group.score));
    } else {
        lines.push(format!(
            "  결론: {} ({:.2}% → 조정 {:.2}%)",
            group.label, group.raw_score, group.score
        ));
    }
}

/// 사람이 읽는 텍스트 리포트.
pub fn render_text(outcome: &EvaluationOutcome) -> String {
    let report = &outcome.report;
    let mut lines = vec!["📊 추세 분석".to_string()];

    if let Some(plan) = &outcome.plan {
        lines.push(String::new());
        lines.push("■ 진입 계획".to_string());
        lines.push(format!(
            "  진입 {} / 손절 {} → 손절 거리 {:.4}%",
            plan.entry, plan.stop_loss, plan.stop_loss_pct
        ));
        lines.push(format!("  권장 물량: {:.2} lot", plan.position_size));
        if let Some(size) = outcome.suggested_size.filter(|size| *size != plan.position_size) {
            lines.push(format!(
                "  마인드셋 반영 물량: {:.2} lot ({})",
                size,
                report.mindset.description()
            ));
        }
        if let Some(tp) = plan.take_profit {
            lines.push(format!("  참고 익절가: {}", tp));
        }
    }

    push_group(&mut lines, "큰 타임프레임", &report.large);
    push_group(&mut lines, "작은 타임프레임", &report.small);

    lines.push(String::new());
    lines.push("■ 종합 판단".to_string());
    lines.push(format!(
        "  {} / {}: {}",
        report.large.label,
        report.small.label,
        report.consensus.description()
    ));
    lines.push(format!("  마인드셋: {}", report.mindset.description()));

    lines.push(String::new());
    lines.push("■ 가격 구간".to_string());
    match &report.region.nearest {
        Some(level) => lines.push(format!(
            "  가장 가까운 레벨: {} {} (거리 {}) → 편향 {}",
            level.kind, level.price, level.distance, report.region.bias
        )),
        None => lines.push("  설정된 레벨 없음 → 편향 0".to_string()),
    }

    lines.push(String::new());
    lines.push(format!("■ 합계: {:.2}%", report.composite.total));
    lines.push(format!(
        "  {} ({})",
        report.composite.posture,
        report.composite.posture.description()
    ));

    let plan_warning = outcome
        .plan
        .as_ref()
        .filter(|plan| plan.exceeds_risk_threshold)
        .map(|_| "손절 거리가 리스크 임계값을 초과했습니다".to_string());

    if !report.warnings.is_empty() || plan_warning.is_some() {
        lines.push(String::new());
        lines.push("■ 경고".to_string());
        for warning in &report.warnings {
            lines.push(format!("  ⚠️ {}", warning.message()));
        }
        if let Some(message) = plan_warning {
            lines.push(format!("  ⚠️ {}", message));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use trend_scoring::TradingMindset;

    const SNAPSHOT: &str = r#"
        [position]
        equity = 100000
        entry = 50420
        stop_loss = 50380

        [large]
        W = "QTT"
        D = "XHT"

        [small]
        H4 = "T"

        [levels]
        supports = [50380]
        resistances = [50450]
    "#;

    fn outcome() -> EvaluationOutcome {
        let snapshot = MarketSnapshot::from_toml_str(SNAPSHOT).unwrap();
        evaluate_snapshot(&snapshot, &AppConfig::default(), true).unwrap()
    }

    #[test]
    fn test_missing_states_without_fill() {
        let snapshot = MarketSnapshot::from_toml_str(SNAPSHOT).unwrap();
        let err = evaluate_snapshot(&snapshot, &AppConfig::default(), false).unwrap_err();

        assert!(err.to_string().contains("--fill-sideways"));
    }

    #[test]
    fn test_plan_included_when_stop_loss_present() {
        let outcome = outcome();
        let plan = outcome.plan.as_ref().unwrap();

        assert_eq!(plan.risk_amount, dec!(1000));
        assert!(!plan.exceeds_risk_threshold);
    }

    #[test]
    fn test_expectation_keeps_full_size() {
        // 큰 그룹, 작은 그룹 모두 횡보 → 합의
        let outcome = outcome();
        let plan = outcome.plan.as_ref().unwrap();

        assert_eq!(outcome.report.mindset, TradingMindset::Expectation);
        assert_eq!(outcome.suggested_size, Some(plan.position_size));
        assert!(!render_text(&outcome).contains("마인드셋 반영 물량"));
    }

    #[test]
    fn test_cautious_mindset_halves_suggested_size() {
        // 큰 그룹 +13.89 (횡보), 작은 그룹 -400/14 - 20 = -48.57 (하락)
        let snapshot = MarketSnapshot::from_toml_str(&SNAPSHOT.replace(
            r#"H4 = "T""#,
            r#"H4 = "SQTG"
        H3 = "SQTG"
        H2 = "SQTG"
        H1 = "SQTG""#,
        ))
        .unwrap();
        let outcome = evaluate_snapshot(&snapshot, &AppConfig::default(), true).unwrap();
        let plan = outcome.plan.as_ref().unwrap();

        assert_eq!(outcome.report.mindset, TradingMindset::Cautious);
        assert_eq!(outcome.suggested_size, Some(plan.position_size * dec!(0.5)));
        assert!(render_text(&outcome).contains("마인드셋 반영 물량"));
    }

    #[test]
    fn test_render_text_sections() {
        let text = render_text(&outcome());

        assert!(text.contains("■ 큰 타임프레임"));
        assert!(text.contains("W: QTT, D: XHT"));
        assert!(text.contains("■ 합계"));
        assert!(text.contains("권장 물량"));
    }

    #[test]
    fn test_render_json() {
        let json = render(&outcome(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["report"]["composite"]["total"].is_number());
        assert!(value["plan"]["position_size"].is_string());
        assert!(value["suggested_size"].is_string());
    }
}
