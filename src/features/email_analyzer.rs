use super::{first_occurrence_matches, lowercase_all, EmailSignal, Reputation};
use crate::config_loader::EmailAnalysisConfig;
use crate::domain_utils::DomainUtils;
use crate::similarity::StringSimilarity;

pub struct EmailAnalyzer {
    free_providers: Vec<String>,
    role_patterns: Vec<String>,
    protected_domains: Vec<String>,
    typosquat_min_similarity: f64,
}

impl Default for EmailAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailAnalyzer {
    pub fn new() -> Self {
        Self::from_config(&EmailAnalysisConfig::default())
    }

    pub fn from_config(config: &EmailAnalysisConfig) -> Self {
        Self {
            free_providers: lowercase_all(&config.free_email_providers),
            role_patterns: lowercase_all(&config.role_account_patterns),
            protected_domains: lowercase_all(&config.protected_brand_domains),
            typosquat_min_similarity: config.typosquat_min_similarity,
        }
    }

    pub fn analyze(&self, email: &str) -> EmailSignal {
        let Some((local_part, domain)) = DomainUtils::split_address(email) else {
            log::debug!("No '@' in sender address, skipping email analysis");
            return EmailSignal::unparseable();
        };

        let is_free_provider = self.free_providers.contains(&domain);
        let matched_patterns = first_occurrence_matches(&local_part, &self.role_patterns);
        let is_protected = self.protected_domains.contains(&domain);
        let is_typosquat = self.closest_brand_lookalike(&domain).is_some();

        let domain_reputation = if is_protected {
            Reputation::Good
        } else {
            Reputation::Unknown
        };

        let is_suspicious = (is_free_provider && !matched_patterns.is_empty()) || is_typosquat;

        if is_suspicious {
            log::debug!(
                "Sender {} flagged: free_provider={} patterns={:?} typosquat={}",
                domain,
                is_free_provider,
                matched_patterns,
                is_typosquat
            );
        }

        EmailSignal {
            is_suspicious,
            domain_reputation,
            is_typosquat,
            is_free_provider,
            matched_patterns,
        }
    }

    /// Protected brand domain that `domain` imitates, with its similarity ratio.
    ///
    /// Brand domains themselves and known webmail providers are real domains and
    /// never count as lookalikes.
    pub fn closest_brand_lookalike(&self, domain: &str) -> Option<(&str, f64)> {
        if domain.is_empty()
            || self.protected_domains.iter().any(|d| d == domain)
            || self.free_providers.iter().any(|d| d == domain)
        {
            return None;
        }

        self.protected_domains
            .iter()
            .map(|brand| (brand.as_str(), StringSimilarity::ratio(domain, brand)))
            .filter(|(_, ratio)| *ratio > self.typosquat_min_similarity && *ratio < 1.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}
