use super::{first_occurrence_matches, lowercase_all, Reputation, UrlSignal};
use crate::config_loader::UrlAnalysisConfig;
use crate::domain_utils::DomainUtils;
use url::Url;

pub struct UrlAnalyzer {
    suspicious_keywords: Vec<String>,
    brand_patterns: Vec<String>,
    shortener_domains: Vec<String>,
}

impl Default for UrlAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlAnalyzer {
    pub fn new() -> Self {
        Self::from_config(&UrlAnalysisConfig::default())
    }

    pub fn from_config(config: &UrlAnalysisConfig) -> Self {
        Self {
            suspicious_keywords: lowercase_all(&config.suspicious_keywords),
            brand_patterns: lowercase_all(&config.brand_impersonation_patterns),
            shortener_domains: lowercase_all(&config.shortener_domains),
        }
    }

    pub fn analyze(&self, url: &str) -> UrlSignal {
        let lower_url = url.trim().to_lowercase();

        // Brand patterns are keywords too; they share one ordered match list
        let vocabulary: Vec<String> = self
            .suspicious_keywords
            .iter()
            .chain(self.brand_patterns.iter())
            .cloned()
            .collect();
        let matched_keywords = first_occurrence_matches(&lower_url, &vocabulary);

        let impersonates_brand = matched_keywords
            .iter()
            .any(|keyword| self.brand_patterns.contains(keyword));

        let has_secure_scheme = Url::parse(&lower_url)
            .map(|parsed| parsed.scheme() == "https")
            .unwrap_or(false);

        let is_shortened = DomainUtils::extract_host(&lower_url)
            .map(|host| DomainUtils::matches_domain_list(&host, &self.shortener_domains))
            .unwrap_or(false);

        let reputation_hint = if impersonates_brand {
            Reputation::Bad
        } else if is_shortened {
            Reputation::Unknown
        } else {
            Reputation::Good
        };

        let is_suspicious =
            !matched_keywords.is_empty() || reputation_hint == Reputation::Bad || is_shortened;

        if is_suspicious {
            log::debug!(
                "URL flagged: keywords={:?} reputation={:?} shortened={}",
                matched_keywords,
                reputation_hint,
                is_shortened
            );
        }

        UrlSignal {
            is_suspicious,
            matched_keywords,
            has_secure_scheme,
            reputation_hint,
            is_shortened,
        }
    }
}
