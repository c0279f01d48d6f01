//! 리스크 관리.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 자본 대비 고정 비율 리스크 기반 포지션 사이징
//! - 손절 거리 임계값 검사
//!
//! # 예제
//!
//! ```rust,ignore
//! use trend_core::RiskConfig;
//! use trend_risk::PositionSizer;
//!
//! let sizer = PositionSizer::new(RiskConfig::default());
//! let plan = sizer.plan(dec!(100000), dec!(50420), dec!(50380));
//! if plan.exceeds_risk_threshold {
//!     // 손절 거리 재검토
//! }
//! ```

pub mod position_sizing;

// 주요 타입 재내보내기
pub use position_sizing::{PositionPlan, PositionSizer};
