//! 같은 상태의 연속 타임프레임 구간 묶기.
//!
//! "D: XHT, H16: XHT, H12: XHT" 대신 "D-H12: XHT"처럼 간결한 설명을 만듭니다.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use trend_core::{Direction, GroupStates, TimeframeId, TrendError, TrendResult, TrendState};

/// 같은 상태가 기준 순서상 연속된 구간.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeframeRun {
    /// 구간 시작 타임프레임
    pub start: TimeframeId,
    /// 구간 끝 타임프레임 (단일 타임프레임이면 `None`)
    pub end: Option<TimeframeId>,
    /// 구간 상태
    pub state: TrendState,
}

impl fmt::Display for TimeframeRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end {
            Some(end) => write!(f, "{}-{}: {}", self.start, end, self.state),
            None => write!(f, "{}: {}", self.start, self.state),
        }
    }
}

/// 타임프레임 부분집합을 기준 순서로 정렬해 연속 구간으로 묶습니다.
///
/// # 규칙
///
/// 1. `frames`를 `reference`에서의 위치로 안정 정렬 (기준에 없는 식별자는 맨 뒤)
/// 2. 왼쪽부터 훑으면서 상태가 바뀌거나, 기준 위치가 직전 + 1이 아니면 새 구간 시작
///
/// 기준에 없는 식별자는 항상 단독 구간이 됩니다.
///
/// # 에러
///
/// `frames`의 타임프레임에 상태가 없으면 `TrendError::MissingState`
pub fn group_consecutive_runs(
    frames: &[TimeframeId],
    states: &HashMap<TimeframeId, TrendState>,
    reference: &[TimeframeId],
) -> TrendResult<Vec<TimeframeRun>> {
    if frames.is_empty() {
        return Ok(Vec::new());
    }

    let index: HashMap<&TimeframeId, usize> =
        reference.iter().enumerate().map(|(i, tf)| (tf, i)).collect();

    let mut sorted: Vec<(&TimeframeId, Option<usize>, TrendState)> = frames
        .iter()
        .map(|tf| {
            states
                .get(tf)
                .map(|&state| (tf, index.get(tf).copied(), state))
                .ok_or_else(|| TrendError::MissingState {
                    group: "runs".to_string(),
                    timeframes: vec![tf.to_string()],
                })
        })
        .collect::<TrendResult<_>>()?;

    // sort_by_key는 안정 정렬
    sorted.sort_by_key(|&(_, idx, _)| idx.unwrap_or(usize::MAX));

    let mut runs = Vec::new();
    let (mut start, mut last_idx, mut current_state) = (sorted[0].0, sorted[0].1, sorted[0].2);
    let mut prev = sorted[0].0;

    for &(tf, idx, state) in &sorted[1..] {
        let contiguous = matches!((last_idx, idx), (Some(last), Some(cur)) if cur == last + 1);

        if state != current_state || !contiguous {
            runs.push(make_run(start, prev, current_state));
            start = tf;
            current_state = state;
        }

        last_idx = idx;
        prev = tf;
    }
    runs.push(make_run(start, prev, current_state));

    Ok(runs)
}

fn make_run(start: &TimeframeId, end: &TimeframeId, state: TrendState) -> TimeframeRun {
    TimeframeRun {
        start: start.clone(),
        end: (start != end).then(|| end.clone()),
        state,
    }
}

/// 그룹을 상승/하락/횡보 타임프레임으로 나눈 뒤 각각 구간으로 묶은 결과.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectionBreakdown {
    /// 가중치 > 0
    pub rising: Vec<TimeframeRun>,
    /// 가중치 < 0
    pub falling: Vec<TimeframeRun>,
    /// 가중치 = 0
    pub flat: Vec<TimeframeRun>,
}

impl DirectionBreakdown {
    /// 검증된 그룹 상태로부터 방향별 구간을 계산합니다.
    pub fn from_group(states: &GroupStates) -> Self {
        let map = states.to_map();
        let reference = states.group().timeframes();

        let frames_in = |direction: Direction| -> Vec<TimeframeId> {
            states
                .iter()
                .filter(|(_, s)| s.direction() == direction)
                .map(|(tf, _)| tf.clone())
                .collect()
        };

        // GroupStates는 전체 매핑이므로 상태 누락이 발생하지 않음
        let runs_for = |direction: Direction| {
            group_consecutive_runs(&frames_in(direction), &map, reference).unwrap_or_default()
        };

        Self {
            rising: runs_for(Direction::Rising),
            falling: runs_for(Direction::Falling),
            flat: runs_for(Direction::Flat),
        }
    }
}
