//! 추세 점수 계산기의 도메인 모델.
//!
//! 이 모듈은 핵심 비즈니스 엔티티를 정의합니다:
//! - 타임프레임 추세 상태 및 가중치
//! - 그룹별 상태 매핑
//! - 추세 라벨 (5단계)
//! - 리스크 자세 (3단계)

mod group_states;
mod posture;
mod state;
mod trend_label;

pub use group_states::*;
pub use posture::*;
pub use state::*;
pub use trend_label::*;
