//! 타임프레임 상태 가중치 집계.

use std::collections::HashMap;
use trend_core::{TimeframeId, TrendError, TrendResult, TrendState};

/// 타임프레임 목록의 상태 가중치 산술 평균.
///
/// 빈 목록은 0을 반환합니다. 목록의 타임프레임에 상태가 없으면
/// 기본값으로 채우지 않고 `TrendError::MissingState`를 반환합니다.
///
/// 검증된 `GroupStates`가 있다면 `GroupStates::score()`가 같은 값을 계산합니다.
pub fn aggregate(
    timeframes: &[TimeframeId],
    states: &HashMap<TimeframeId, TrendState>,
) -> TrendResult<f64> {
    if timeframes.is_empty() {
        return Ok(0.0);
    }

    let missing: Vec<String> = timeframes
        .iter()
        .filter(|tf| !states.contains_key(*tf))
        .map(|tf| tf.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(TrendError::MissingState {
            group: "aggregate".to_string(),
            timeframes: missing,
        });
    }

    let total: f64 = timeframes
        .iter()
        .filter_map(|tf| states.get(tf))
        .map(|s| s.weight())
        .sum();

    Ok(total / timeframes.len() as f64)
}
