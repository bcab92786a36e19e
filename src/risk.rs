use crate::config::EngineConfig;
use crate::models::{AlertSeverity, CrisisAlert};

pub const HIGH_RISK_RECOMMENDATION: &str =
    "Urgent clinical review recommended: contact the patient and reassess safety within 24 hours.";
pub const MEDIUM_RISK_RECOMMENDATION: &str =
    "Monitor closely: schedule a check-in before the next regular session.";

/// Threshold classifier over the number of low-mood days in the window.
pub fn detect_crisis(low_mood_days: usize, config: &EngineConfig) -> Option<CrisisAlert> {
    match severity_for(low_mood_days, config)? {
        AlertSeverity::High => Some(CrisisAlert {
            severity: AlertSeverity::High,
            triggers: vec![
                "sustained low mood".to_string(),
                "possible depressive episode".to_string(),
            ],
            recommendation: HIGH_RISK_RECOMMENDATION.to_string(),
            days_at_risk: low_mood_days,
        }),
        AlertSeverity::Medium => Some(CrisisAlert {
            severity: AlertSeverity::Medium,
            triggers: vec!["recent emotional decline".to_string()],
            recommendation: MEDIUM_RISK_RECOMMENDATION.to_string(),
            days_at_risk: low_mood_days,
        }),
    }
}

pub fn severity_for(low_mood_days: usize, config: &EngineConfig) -> Option<AlertSeverity> {
    if low_mood_days >= config.crisis_high_threshold {
        Some(AlertSeverity::High)
    } else if low_mood_days >= config.crisis_medium_threshold {
        Some(AlertSeverity::Medium)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_expected_tiers() {
        let config = EngineConfig::default();
        assert_eq!(severity_for(0, &config), None);
        assert_eq!(severity_for(1, &config), None);
        assert_eq!(severity_for(2, &config), Some(AlertSeverity::Medium));
        assert_eq!(severity_for(3, &config), Some(AlertSeverity::High));
        assert_eq!(severity_for(7, &config), Some(AlertSeverity::High));
    }

    #[test]
    fn high_alert_carries_day_count() {
        let alert = detect_crisis(3, &EngineConfig::default()).unwrap();
        assert_eq!(alert.severity, AlertSeverity::High);
        assert_eq!(alert.days_at_risk, 3);
        assert_eq!(
            alert.triggers,
            vec!["sustained low mood", "possible depressive episode"]
        );
        assert_eq!(alert.recommendation, HIGH_RISK_RECOMMENDATION);
    }

    #[test]
    fn medium_alert_for_two_days() {
        let alert = detect_crisis(2, &EngineConfig::default()).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Medium);
        assert_eq!(alert.triggers, vec!["recent emotional decline"]);
        assert_eq!(alert.days_at_risk, 2);
    }

    #[test]
    fn no_alert_below_medium_threshold() {
        assert!(detect_crisis(1, &EngineConfig::default()).is_none());
        assert!(detect_crisis(0, &EngineConfig::default()).is_none());
    }

    #[test]
    fn thresholds_come_from_config() {
        let config = EngineConfig {
            crisis_medium_threshold: 3,
            crisis_high_threshold: 5,
            ..EngineConfig::default()
        };
        assert!(detect_crisis(2, &config).is_none());
        assert_eq!(severity_for(4, &config), Some(AlertSeverity::Medium));
    }
}
