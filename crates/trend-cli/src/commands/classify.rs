//! 점수 분류 명령어.
//!
//! ```bash
//! trend classify 52.5
//! ```

use trend_scoring::{classify_posture, classify_trend};

/// 점수 하나에 대한 추세 라벨과 자세.
pub fn render_classification(score: f64) -> String {
    let label = classify_trend(score);
    let posture = classify_posture(score);

    format!(
        "점수: {:.2}%\n추세 라벨: {} ({})\n자세: {} ({})",
        score,
        label,
        label.description(),
        posture,
        posture.description()
    )
}
