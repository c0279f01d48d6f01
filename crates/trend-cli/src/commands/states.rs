//! 상태 가중치 표 명령어.
//!
//! ```bash
//! trend states
//! ```

use trend_core::{TimeframeGroup, TrendState};

const RULE: &str = "═══════════════════════════════════════════════";

/// 상태 코드, 가중치, 설명 표.
pub fn render_weight_table() -> String {
    let mut lines = vec![
        "📋 상태 가중치".to_string(),
        RULE.to_string(),
        format!("  {:<6} | {:>7} | 설명", "코드", "가중치"),
        format!("  {}", "─".repeat(40)),
    ];

    for state in TrendState::ALL {
        lines.push(format!(
            "  {:<6} | {:>7.1} | {}",
            state.code(),
            state.weight(),
            state.description()
        ));
    }

    lines.push(RULE.to_string());
    lines.join("\n")
}

/// 타임프레임 그룹 순서 표.
pub fn render_groups(large: &TimeframeGroup, small: &TimeframeGroup) -> String {
    [large, small]
        .iter()
        .map(|group| {
            let ids: Vec<&str> = group.timeframes().iter().map(|tf| tf.as_str()).collect();
            format!("{}: {}", group.kind().description(), ids.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
