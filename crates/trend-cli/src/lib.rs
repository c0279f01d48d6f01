//! 추세 계산기 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 스냅샷 파일 평가 (텍스트/JSON 리포트)
//! - 리스크 기반 포지션 사이징
//! - 상태 가중치 표와 점수 분류 조회

pub mod commands;

pub use commands::*;
