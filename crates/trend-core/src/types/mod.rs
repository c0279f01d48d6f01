//! 점수 계산 파이프라인 전반에서 사용되는 공통 타입.

mod price;
mod timeframe;

pub use price::*;
pub use timeframe::*;
