//! 종합 점수.

use serde::{Deserialize, Serialize};
use trend_core::{Posture, ScoringConfig};

use crate::classify::classify_posture;

/// 세 하위 점수를 가중 합산한 종합 점수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// 큰 그룹 점수
    pub large: f64,
    /// 조정된 작은 그룹 점수
    pub adjusted_small: f64,
    /// 지역 편향
    pub region_bias: f64,
    /// 가중 합산
    pub total: f64,
    /// 자세 분류
    pub posture: Posture,
}

/// 기본 가중치(0.6 / 0.3 / 0.1)로 종합 점수를 계산합니다.
pub fn composite(large: f64, adjusted_small: f64, region_bias: f64) -> CompositeScore {
    composite_with_config(large, adjusted_small, region_bias, &ScoringConfig::default())
}

/// 설정된 가중치로 종합 점수를 계산합니다.
pub fn composite_with_config(
    large: f64,
    adjusted_small: f64,
    region_bias: f64,
    config: &ScoringConfig,
) -> CompositeScore {
    let total = config.large_weight * large
        + config.small_weight * adjusted_small
        + config.region_weight * region_bias;

    CompositeScore {
        large,
        adjusted_small,
        region_bias,
        total,
        posture: classify_posture(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let score = composite(50.0, 20.0, 5.0);
        assert!((score.total - 36.5).abs() < 1e-9);
        assert_eq!(score.posture, Posture::Cautious);
    }

    #[test]
    fn test_aggressive_posture() {
        let score = composite(100.0, 60.0, 5.0);
        // 60 + 18 + 0.5
        assert!((score.total - 78.5).abs() < 1e-9);
        assert_eq!(score.posture, Posture::Aggressive);
    }

    #[test]
    fn test_timing_posture() {
        let score = composite(62.5, 40.0, 2.0);
        // 37.5 + 12 + 0.2
        assert!((score.total - 49.7).abs() < 1e-9);
        assert_eq!(score.posture, Posture::CautiousWithTiming);
    }

    #[test]
    fn test_custom_weights() {
        let config = ScoringConfig {
            large_weight: 0.5,
            small_weight: 0.5,
            region_weight: 0.0,
            ..Default::default()
        };
        let score = composite_with_config(80.0, 60.0, 5.0, &config);
        assert!((score.total - 70.0).abs() < 1e-9);
        assert_eq!(score.region_bias, 5.0);
    }
}
