//! Risk Aggregator Component
//!
//! Turns the signals of one scan into a capped score, a classification and
//! an ordered list of recommendations. Works on signal values only; it never
//! calls an analyzer itself.

use crate::config_loader::{RiskThresholds, ScoringConfig, ScoringWeights};
use crate::features::{ContentSignal, EmailSignal, Reputation, UrgencyLevel, UrlSignal};
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u32 = 100;

pub const NO_THREATS_RECOMMENDATION: &str =
    "No immediate threats detected. Stay cautious with unexpected links and requests.";
pub const INSECURE_SCHEME_RECOMMENDATION: &str =
    "The link does not use HTTPS. Do not enter credentials or payment details on this site.";
pub const SHORTENED_LINK_RECOMMENDATION: &str =
    "The link goes through a URL shortener that hides its destination. Expand it with a preview service before visiting.";
pub const TYPOSQUAT_RECOMMENDATION: &str =
    "The sender domain imitates a well-known brand domain. Verify the sender through the organization's official website.";
pub const URGENCY_RECOMMENDATION: &str =
    "The message pressures you to act quickly. Take your time and confirm the request through an official channel.";
pub const PERSONAL_INFO_RECOMMENDATION: &str =
    "The message asks for personal information. Never share passwords, PINs or identity details by email.";
pub const FINANCIAL_RECOMMENDATION: &str =
    "The message requests a payment or money transfer. Confirm it with the organization using contact details you already know.";
pub const THREAT_RECOMMENDATION: &str =
    "The message threatens account suspension or other consequences. Legitimate organizations rarely do this by email.";
pub const GRAMMAR_RECOMMENDATION: &str =
    "The message contains spelling and grammar problems that are common in phishing attempts.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Safe,
    Suspicious,
    Dangerous,
}

/// Aggregated outcome of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub classification: Classification,
    pub score: u32,
    pub url_signal: Option<UrlSignal>,
    pub email_signal: Option<EmailSignal>,
    pub content_signal: Option<ContentSignal>,
    pub recommendations: Vec<String>,
}

pub struct RiskAggregator {
    weights: ScoringWeights,
    thresholds: RiskThresholds,
}

impl RiskAggregator {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            weights: config.weights,
            thresholds: config.thresholds,
        }
    }

    /// Combine whichever signals are available.
    ///
    /// With no signals at all the result is a score of 0 and `Safe`.
    pub fn aggregate(
        &self,
        url: Option<&UrlSignal>,
        email: Option<&EmailSignal>,
        content: Option<&ContentSignal>,
    ) -> RiskVerdict {
        let score = self.calculate_score(url, email, content);
        let classification = self.classify(score);
        let recommendations = self.build_recommendations(url, email, content);

        log::debug!(
            "Aggregated score {} -> {:?} ({} recommendations)",
            score,
            classification,
            recommendations.len()
        );

        RiskVerdict {
            classification,
            score,
            url_signal: url.cloned(),
            email_signal: email.cloned(),
            content_signal: content.cloned(),
            recommendations,
        }
    }

    fn calculate_score(
        &self,
        url: Option<&UrlSignal>,
        email: Option<&EmailSignal>,
        content: Option<&ContentSignal>,
    ) -> u32 {
        let w = &self.weights;
        let mut total = 0u32;
        let mut add = |fired: bool, weight: u32| {
            if fired {
                total = total.saturating_add(weight);
            }
        };

        if let Some(url) = url {
            add(url.is_suspicious, w.url_suspicious);
            add(!url.has_secure_scheme, w.insecure_scheme);
            add(url.reputation_hint == Reputation::Bad, w.bad_url_reputation);
        }

        if let Some(email) = email {
            add(email.is_suspicious, w.email_suspicious);
            add(email.is_typosquat, w.typosquat);
        }

        if let Some(content) = content {
            add(content.urgency_level == UrgencyLevel::High, w.high_urgency);
            add(content.requests_personal_info, w.personal_info_request);
            add(content.requests_financial_action, w.financial_action_request);
            add(content.uses_threat_language, w.threat_language);
            add(
                content.grammar_score < self.thresholds.poor_grammar_below,
                w.poor_grammar,
            );
        }

        total.min(MAX_SCORE)
    }

    /// Classification depends on the score alone.
    pub fn classify(&self, score: u32) -> Classification {
        if score >= self.thresholds.dangerous {
            Classification::Dangerous
        } else if score >= self.thresholds.suspicious {
            Classification::Suspicious
        } else {
            Classification::Safe
        }
    }

    fn build_recommendations(
        &self,
        url: Option<&UrlSignal>,
        email: Option<&EmailSignal>,
        content: Option<&ContentSignal>,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if let Some(url) = url {
            if !url.has_secure_scheme {
                recommendations.push(INSECURE_SCHEME_RECOMMENDATION.to_string());
            }
            if !url.matched_keywords.is_empty() {
                recommendations.push(format!(
                    "The link contains suspicious keywords ({}). Do not open it unless you can verify where it leads.",
                    url.matched_keywords.join(", ")
                ));
            }
            if url.is_shortened {
                recommendations.push(SHORTENED_LINK_RECOMMENDATION.to_string());
            }
        }

        if let Some(email) = email {
            if email.is_typosquat {
                recommendations.push(TYPOSQUAT_RECOMMENDATION.to_string());
            }
            if email.is_free_provider && !email.matched_patterns.is_empty() {
                recommendations.push(format!(
                    "The sender poses as an organizational account ({}) on a free email provider. Real companies do not use personal webmail for this.",
                    email.matched_patterns.join(", ")
                ));
            }
        }

        if let Some(content) = content {
            if content.urgency_level == UrgencyLevel::High {
                recommendations.push(URGENCY_RECOMMENDATION.to_string());
            }
            if content.requests_personal_info {
                recommendations.push(PERSONAL_INFO_RECOMMENDATION.to_string());
            }
            if content.requests_financial_action {
                recommendations.push(FINANCIAL_RECOMMENDATION.to_string());
            }
            if content.uses_threat_language {
                recommendations.push(THREAT_RECOMMENDATION.to_string());
            }
            if content.grammar_score < self.thresholds.poor_grammar_below {
                recommendations.push(GRAMMAR_RECOMMENDATION.to_string());
            }
        }

        if recommendations.is_empty() {
            recommendations.push(NO_THREATS_RECOMMENDATION.to_string());
        }

        recommendations
    }
}

impl Default for RiskAggregator {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn safe_url() -> UrlSignal {
        UrlSignal {
            is_suspicious: false,
            matched_keywords: vec![],
            has_secure_scheme: true,
            reputation_hint: Reputation::Good,
            is_shortened: false,
        }
    }

    fn phishing_url() -> UrlSignal {
        UrlSignal {
            is_suspicious: true,
            matched_keywords: vec!["paypal-".to_string(), "verify".to_string()],
            has_secure_scheme: false,
            reputation_hint: Reputation::Bad,
            is_shortened: false,
        }
    }

    fn typosquat_email() -> EmailSignal {
        EmailSignal {
            is_suspicious: true,
            domain_reputation: Reputation::Unknown,
            is_typosquat: true,
            is_free_provider: false,
            matched_patterns: vec!["support".to_string()],
        }
    }

    fn quiet_content() -> ContentSignal {
        ContentSignal {
            urgency_level: UrgencyLevel::Low,
            requests_personal_info: false,
            requests_financial_action: false,
            uses_threat_language: false,
            grammar_score: 100,
        }
    }

    #[test]
    fn test_no_inputs_is_vacuously_safe() {
        let verdict = RiskAggregator::default().aggregate(None, None, None);

        assert_eq!(verdict.score, 0);
        assert_eq!(verdict.classification, Classification::Safe);
        assert_eq!(verdict.recommendations, vec![NO_THREATS_RECOMMENDATION]);
    }

    #[test]
    fn test_url_weights() {
        let verdict = RiskAggregator::default().aggregate(Some(&phishing_url()), None, None);

        // suspicious 30 + insecure 10 + bad reputation 15
        assert_eq!(verdict.score, 55);
        assert_eq!(verdict.classification, Classification::Suspicious);
    }

    #[test]
    fn test_email_weights() {
        let verdict = RiskAggregator::default().aggregate(None, Some(&typosquat_email()), None);

        // suspicious 25 + typosquat 20
        assert_eq!(verdict.score, 45);
        assert_eq!(verdict.classification, Classification::Suspicious);
        assert_eq!(verdict.recommendations, vec![TYPOSQUAT_RECOMMENDATION]);
    }

    #[test]
    fn test_content_weights() {
        let content = ContentSignal {
            urgency_level: UrgencyLevel::High,
            requests_personal_info: true,
            requests_financial_action: true,
            uses_threat_language: true,
            grammar_score: 50,
        };
        let verdict = RiskAggregator::default().aggregate(None, None, Some(&content));

        // 20 + 15 + 10 + 15 + 10
        assert_eq!(verdict.score, 70);
        assert_eq!(verdict.classification, Classification::Dangerous);
    }

    #[test]
    fn test_medium_urgency_and_grammar_boundary_do_not_score() {
        let content = ContentSignal {
            urgency_level: UrgencyLevel::Medium,
            grammar_score: 60,
            ..quiet_content()
        };
        let verdict = RiskAggregator::default().aggregate(None, None, Some(&content));

        assert_eq!(verdict.score, 0);
        assert_eq!(verdict.recommendations, vec![NO_THREATS_RECOMMENDATION]);
    }

    #[test]
    fn test_score_is_capped() {
        let content = ContentSignal {
            urgency_level: UrgencyLevel::High,
            requests_personal_info: true,
            requests_financial_action: true,
            uses_threat_language: true,
            grammar_score: 0,
        };
        let verdict = RiskAggregator::default().aggregate(
            Some(&phishing_url()),
            Some(&typosquat_email()),
            Some(&content),
        );

        assert_eq!(verdict.score, MAX_SCORE);
        assert_eq!(verdict.classification, Classification::Dangerous);
    }

    #[test]
    fn test_classification_boundaries() {
        let aggregator = RiskAggregator::default();

        assert_eq!(aggregator.classify(0), Classification::Safe);
        assert_eq!(aggregator.classify(34), Classification::Safe);
        assert_eq!(aggregator.classify(35), Classification::Suspicious);
        assert_eq!(aggregator.classify(69), Classification::Suspicious);
        assert_eq!(aggregator.classify(70), Classification::Dangerous);
        assert_eq!(aggregator.classify(100), Classification::Dangerous);
    }

    #[test]
    fn test_insecure_url_alone_is_safe_but_advised() {
        let url = UrlSignal {
            has_secure_scheme: false,
            ..safe_url()
        };
        let verdict = RiskAggregator::default().aggregate(Some(&url), None, None);

        assert_eq!(verdict.score, 10);
        assert_eq!(verdict.classification, Classification::Safe);
        assert_eq!(verdict.recommendations, vec![INSECURE_SCHEME_RECOMMENDATION]);
    }

    #[test]
    fn test_recommendation_priority_order() {
        let url = UrlSignal {
            is_shortened: true,
            ..phishing_url()
        };
        let email = EmailSignal {
            is_free_provider: true,
            ..typosquat_email()
        };
        let content = ContentSignal {
            urgency_level: UrgencyLevel::High,
            requests_personal_info: true,
            requests_financial_action: true,
            uses_threat_language: true,
            grammar_score: 10,
        };
        let verdict =
            RiskAggregator::default().aggregate(Some(&url), Some(&email), Some(&content));

        assert_eq!(verdict.recommendations.len(), 10);
        assert_eq!(verdict.recommendations[0], INSECURE_SCHEME_RECOMMENDATION);
        assert!(verdict.recommendations[1].contains("(paypal-, verify)"));
        assert_eq!(verdict.recommendations[2], SHORTENED_LINK_RECOMMENDATION);
        assert_eq!(verdict.recommendations[3], TYPOSQUAT_RECOMMENDATION);
        assert!(verdict.recommendations[4].contains("(support)"));
        assert_eq!(verdict.recommendations[5], URGENCY_RECOMMENDATION);
        assert_eq!(verdict.recommendations[6], PERSONAL_INFO_RECOMMENDATION);
        assert_eq!(verdict.recommendations[7], FINANCIAL_RECOMMENDATION);
        assert_eq!(verdict.recommendations[8], THREAT_RECOMMENDATION);
        assert_eq!(verdict.recommendations[9], GRAMMAR_RECOMMENDATION);
    }

    #[test]
    fn test_custom_weights_and_thresholds() {
        let config = ScoringConfig {
            weights: ScoringWeights {
                insecure_scheme: 40,
                ..ScoringWeights::default()
            },
            thresholds: RiskThresholds {
                suspicious: 30,
                dangerous: 40,
                poor_grammar_below: 60,
            },
        };
        let url = UrlSignal {
            has_secure_scheme: false,
            ..safe_url()
        };
        let verdict = RiskAggregator::new(config).aggregate(Some(&url), None, None);

        assert_eq!(verdict.score, 40);
        assert_eq!(verdict.classification, Classification::Dangerous);
    }

    #[test]
    fn test_verdict_serializes_as_flat_record() {
        let verdict = RiskAggregator::default().aggregate(
            Some(&phishing_url()),
            None,
            Some(&quiet_content()),
        );
        let json = serde_json::to_value(&verdict).unwrap();

        assert_eq!(json["classification"], "suspicious");
        assert_eq!(json["score"], 55);
        assert_eq!(json["url_signal"]["reputation_hint"], "bad");
        assert_eq!(json["url_signal"]["matched_keywords"][1], "verify");
        assert!(json["email_signal"].is_null());
        assert_eq!(json["content_signal"]["urgency_level"], "low");
        assert!(json["recommendations"].is_array());
    }
}
