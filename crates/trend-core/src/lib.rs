//! # Trend Core
//!
//! 수동 추세 점수 계산기의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 점수 계산 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 추세 상태 태그와 가중치 테이블
//! - 타임프레임 식별자 및 그룹
//! - 전체 매핑이 보장된 그룹별 상태
//! - 지지/저항 가격 레벨
//! - 추세 라벨 및 포지션 자세
//! - 입력 스냅샷 형식
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod snapshot;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use snapshot::*;
pub use types::*;
