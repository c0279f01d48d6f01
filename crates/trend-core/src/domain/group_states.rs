//! GroupStates - 그룹의 모든 타임프레임에 상태가 지정된 매핑.
//!
//! 빌더에서 전체 매핑 여부를 검증하므로 평가 시점에는 누락이 있을 수 없습니다.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::domain::TrendState;
use crate::error::{TrendError, TrendResult};
use crate::types::{GroupKind, TimeframeGroup, TimeframeId};

/// 그룹의 타임프레임별 상태 (전체 매핑).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStates {
    group: TimeframeGroup,
    /// 그룹 순서와 같은 순서의 상태
    states: Vec<TrendState>,
}

impl GroupStates {
    /// 그룹에 대한 빌더를 생성합니다.
    pub fn builder(group: TimeframeGroup) -> GroupStatesBuilder {
        GroupStatesBuilder {
            group,
            assigned: HashMap::new(),
        }
    }

    /// 모든 타임프레임이 같은 상태인 매핑.
    pub fn uniform(group: TimeframeGroup, state: TrendState) -> Self {
        let states = vec![state; group.len()];
        Self { group, states }
    }

    pub fn group(&self) -> &TimeframeGroup {
        &self.group
    }

    pub fn kind(&self) -> GroupKind {
        self.group.kind()
    }

    /// 타임프레임의 상태.
    pub fn state_of(&self, id: &TimeframeId) -> Option<TrendState> {
        self.group.position(id).map(|idx| self.states[idx])
    }

    /// 그룹 순서대로 (타임프레임, 상태)를 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (&TimeframeId, TrendState)> + '_ {
        self.group
            .timeframes()
            .iter()
            .zip(self.states.iter().copied())
    }

    /// 일반 해시맵으로 변환합니다.
    pub fn to_map(&self) -> HashMap<TimeframeId, TrendState> {
        self.iter().map(|(id, s)| (id.clone(), s)).collect()
    }

    /// 모든 타임프레임이 횡보인지 확인합니다. 빈 그룹도 `true`
    /// (판단할 방향이 없으므로 횡보 경고 대상).
    pub fn all_sideways(&self) -> bool {
        self.states.iter().all(|s| *s == TrendState::Sideways)
    }

    /// 가중치 산술 평균. 빈 그룹은 0.
    pub fn score(&self) -> f64 {
        if self.states.is_empty() {
            return 0.0;
        }
        let total: f64 = self.states.iter().map(|s| s.weight()).sum();
        total / self.states.len() as f64
    }
}

/// `GroupStates` 빌더.
#[derive(Debug, Clone)]
pub struct GroupStatesBuilder {
    group: TimeframeGroup,
    assigned: HashMap<TimeframeId, TrendState>,
}

impl GroupStatesBuilder {
    /// 타임프레임에 상태를 지정합니다. 같은 타임프레임에 다시 지정하면 덮어씁니다.
    ///
    /// # 에러
    ///
    /// 그룹에 없는 타임프레임이면 `TrendError::UnknownTimeframe`
    pub fn set(mut self, id: impl AsRef<str>, state: TrendState) -> TrendResult<Self> {
        let id = TimeframeId::new(id)?;
        if !self.group.contains(&id) {
            return Err(TrendError::UnknownTimeframe {
                group: self.group.kind().to_string(),
                timeframe: id.to_string(),
            });
        }
        self.assigned.insert(id, state);
        Ok(self)
    }

    /// 여러 상태를 한 번에 지정합니다.
    pub fn set_all<I, S>(self, entries: I) -> TrendResult<Self>
    where
        I: IntoIterator<Item = (S, TrendState)>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .try_fold(self, |builder, (id, state)| builder.set(id, state))
    }

    /// 아직 상태가 없는 타임프레임 목록 (그룹 순서).
    pub fn unassigned(&self) -> Vec<&TimeframeId> {
        self.group
            .timeframes()
            .iter()
            .filter(|id| !self.assigned.contains_key(*id))
            .collect()
    }

    /// 전체 매핑을 검증하고 생성합니다.
    ///
    /// # 에러
    ///
    /// 상태가 없는 타임프레임이 하나라도 있으면 `TrendError::MissingState`
    pub fn build(self) -> TrendResult<GroupStates> {
        let missing: Vec<String> = self.unassigned().iter().map(|id| id.to_string()).collect();
        if !missing.is_empty() {
            return Err(TrendError::MissingState {
                group: self.group.kind().to_string(),
                timeframes: missing,
            });
        }
        Ok(self.finish())
    }

    /// 상태가 없는 타임프레임을 횡보로 채워 생성합니다.
    pub fn build_filling_unset(self) -> GroupStates {
        let unset = self.unassigned().len();
        if unset > 0 {
            debug!(
                group = %self.group.kind(),
                unset,
                "Filling unset timeframes with sideways"
            );
        }
        self.finish()
    }

    fn finish(self) -> GroupStates {
        let states = self
            .group
            .timeframes()
            .iter()
            .map(|id| self.assigned.get(id).copied().unwrap_or_default())
            .collect();
        GroupStates {
            group: self.group,
            states,
        }
    }
}
