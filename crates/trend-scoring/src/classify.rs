//! 점수 분류.
//!
//! 그룹별 추세 라벨(5단계)과 종합 점수 자세(3단계)는 경계가 서로 다르며
//! 의도적으로 별도 함수로 유지합니다.

use trend_core::{Posture, TrendLabel};

/// 그룹 점수를 5단계 추세 라벨로 분류합니다.
///
/// - `score >= 60`: 강한 상승
/// - `40 <= score < 60`: 중간 상승
/// - `-40 < score < 40`: 횡보
/// - `-60 < score <= -40`: 중간 하락
/// - `score <= -60`: 강한 하락
pub fn classify_trend(score: f64) -> TrendLabel {
    if score >= 60.0 {
        TrendLabel::StrongUp
    } else if score >= 40.0 {
        TrendLabel::ModerateUp
    } else if score > -40.0 {
        TrendLabel::Sideways
    } else if score > -60.0 {
        TrendLabel::ModerateDown
    } else {
        TrendLabel::StrongDown
    }
}

/// 종합 점수를 3단계 자세로 분류합니다.
///
/// - `total > 60`: 공격적
/// - `total < 40`: 신중
/// - 그 외: 타이밍을 본 신중한 진입
pub fn classify_posture(total: f64) -> Posture {
    if total > 60.0 {
        Posture::Aggressive
    } else if total < 40.0 {
        Posture::Cautious
    } else {
        Posture::CautiousWithTiming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_boundaries() {
        assert_eq!(classify_trend(60.0), TrendLabel::StrongUp);
        assert_eq!(classify_trend(59.99), TrendLabel::ModerateUp);
        assert_eq!(classify_trend(40.0), TrendLabel::ModerateUp);
        assert_eq!(classify_trend(39.99), TrendLabel::Sideways);
        assert_eq!(classify_trend(0.0), TrendLabel::Sideways);
        assert_eq!(classify_trend(-39.99), TrendLabel::Sideways);
        assert_eq!(classify_trend(-40.0), TrendLabel::ModerateDown);
        assert_eq!(classify_trend(-59.99), TrendLabel::ModerateDown);
        assert_eq!(classify_trend(-60.0), TrendLabel::StrongDown);
        assert_eq!(classify_trend(-60.01), TrendLabel::StrongDown);
    }

    #[test]
    fn test_trend_extremes() {
        assert_eq!(classify_trend(100.0), TrendLabel::StrongUp);
        assert_eq!(classify_trend(-100.0), TrendLabel::StrongDown);
    }

    #[test]
    fn test_posture_boundaries() {
        assert_eq!(classify_posture(60.01), Posture::Aggressive);
        assert_eq!(classify_posture(60.0), Posture::CautiousWithTiming);
        assert_eq!(classify_posture(40.0), Posture::CautiousWithTiming);
        assert_eq!(classify_posture(39.99), Posture::Cautious);
        assert_eq!(classify_posture(-80.0), Posture::Cautious);
    }

    #[test]
    fn test_scales_differ_at_sixty() {
        // 같은 60점이라도 라벨은 강한 상승, 자세는 공격적이 아님
        assert_eq!(classify_trend(60.0), TrendLabel::StrongUp);
        assert!(!classify_posture(60.0).is_aggressive());
    }
}
