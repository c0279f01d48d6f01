//! 다중 타임프레임 추세 점수 계산.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 상태 가중치 평균 집계
//! - 같은 상태의 연속 타임프레임 구간 묶기
//! - 큰 그룹 방향에 따른 작은 그룹 점수 조정
//! - 가장 가까운 지지/저항 기반 지역 편향
//! - 5단계 추세 분류 / 3단계 자세 분류
//! - 종합 점수 및 전체 평가 리포트
//!
//! 모든 계산은 순수 함수이며 같은 입력에 항상 같은 결과를 반환합니다.
//!
//! # 예제
//!
//! ```rust,ignore
//! use trend_scoring::{EvaluationInput, TrendEvaluator};
//!
//! let evaluator = TrendEvaluator::default();
//! let report = evaluator.evaluate(&input);
//! println!("{} ({:.2}%)", report.composite.posture, report.composite.total);
//! ```

pub mod aggregate;
pub mod alignment;
pub mod classify;
pub mod composite;
pub mod evaluator;
pub mod region;
pub mod report;
pub mod runs;

// 주요 타입 재내보내기
pub use aggregate::aggregate;
pub use alignment::{adjust_for_alignment, adjust_with_config, AlignmentAdjustment, AlignmentKind};
pub use classify::{classify_posture, classify_trend};
pub use composite::{composite, composite_with_config, CompositeScore};
pub use evaluator::{EvaluationInput, TrendEvaluator};
pub use region::{find_nearest_level, nearest_level_bias, NearestLevel, RegionAssessment, RegionBias};
pub use report::{Consensus, GroupAnalysis, TradingMindset, TrendReport, TrendWarning};
pub use runs::{group_consecutive_runs, DirectionBreakdown, TimeframeRun};
