use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Every table the analyzers and the aggregator read.
///
/// All sections default independently, so a YAML file only needs to carry
/// the keys it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub url_analysis: UrlAnalysisConfig,
    pub email_analysis: EmailAnalysisConfig,
    pub content_analysis: ContentAnalysisConfig,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlAnalysisConfig {
    pub suspicious_keywords: Vec<String>,
    /// Brand name plus separator, e.g. `paypal-`. A match marks the URL reputation bad.
    pub brand_impersonation_patterns: Vec<String>,
    pub shortener_domains: Vec<String>,
}

impl Default for UrlAnalysisConfig {
    fn default() -> Self {
        Self {
            suspicious_keywords: strings(&[
                "verify", "urgent", "suspend", "claim", "bonus", "secure-", "login", "signin",
                "account", "update", "confirm", "unlock", "free", "gift", "winner", "prize",
                "offer", "click", "bank", "security", "password",
            ]),
            brand_impersonation_patterns: strings(&[
                "paypal-",
                "amazon-",
                "apple-",
                "microsoft-",
                "google-",
                "netflix-",
                "facebook-",
                "instagram-",
                "chase-",
                "wellsfargo-",
                "bankofamerica-",
            ]),
            shortener_domains: strings(&[
                "bit.ly",
                "tinyurl.com",
                "t.co",
                "goo.gl",
                "ow.ly",
                "short.link",
                "is.gd",
                "v.gd",
                "tiny.cc",
                "rb.gy",
                "cutt.ly",
                "shorturl.at",
                "1url.com",
                "u.to",
                "buff.ly",
                "rebrand.ly",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailAnalysisConfig {
    pub free_email_providers: Vec<String>,
    pub role_account_patterns: Vec<String>,
    pub protected_brand_domains: Vec<String>,
    /// Exclusive lower bound on similarity for a typosquat; the upper bound is always 1.0.
    pub typosquat_min_similarity: f64,
}

impl Default for EmailAnalysisConfig {
    fn default() -> Self {
        Self {
            free_email_providers: strings(&[
                "gmail.com",
                "yahoo.com",
                "outlook.com",
                "hotmail.com",
                "live.com",
                "aol.com",
                "mail.com",
                "icloud.com",
                "protonmail.com",
                "gmx.com",
                "yandex.com",
                "zoho.com",
            ]),
            role_account_patterns: strings(&[
                "support", "admin", "billing", "noreply", "no-reply", "help", "secure",
                "security", "info", "service", "account", "verify", "alert", "payment",
                "update",
            ]),
            protected_brand_domains: strings(&[
                "paypal.com",
                "google.com",
                "gmail.com",
                "microsoft.com",
                "apple.com",
                "amazon.com",
                "facebook.com",
                "instagram.com",
                "netflix.com",
                "linkedin.com",
                "outlook.com",
                "yahoo.com",
                "chase.com",
                "wellsfargo.com",
                "bankofamerica.com",
            ]),
            typosquat_min_similarity: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentAnalysisConfig {
    pub urgency_keywords: Vec<String>,
    pub threat_keywords: Vec<String>,
    pub personal_info_keywords: Vec<String>,
    pub financial_keywords: Vec<String>,
    /// Distinct urgency keywords needed for `UrgencyLevel::High`.
    pub high_urgency_min_matches: usize,
    pub common_misspellings: Vec<String>,
    /// Structural regexes; every match costs `grammar_penalty`.
    pub grammar_patterns: Vec<String>,
    pub grammar_penalty: u8,
}

impl Default for ContentAnalysisConfig {
    fn default() -> Self {
        Self {
            urgency_keywords: strings(&[
                "urgent",
                "immediate",
                "now",
                "asap",
                "right away",
                "expire",
                "limited time",
                "within 24 hours",
                "deadline",
                "final notice",
                "last chance",
                "hurry",
                "act fast",
                "today only",
            ]),
            threat_keywords: strings(&[
                "suspend",
                "terminate",
                "lock",
                "legal action",
                "lawsuit",
                "arrest",
                "penalty",
                "unauthorized",
                "compromised",
                "disable",
                "deactivate",
                "blocked",
                "closure",
            ]),
            personal_info_keywords: strings(&[
                "password",
                "passcode",
                "social security",
                "ssn",
                "date of birth",
                "username",
                "login details",
                "credit card",
                "card number",
                "cvv",
                "bank account",
                "account number",
                "pin number",
                "maiden name",
                "passport",
                "verify your identity",
                "confirm your identity",
            ]),
            financial_keywords: strings(&[
                "payment",
                "wire transfer",
                "bank transfer",
                "transfer funds",
                "invoice",
                "refund",
                "gift card",
                "bitcoin",
                "crypto",
                "western union",
                "money order",
                "overdue",
                "billing",
                "tax return",
            ]),
            high_urgency_min_matches: 3,
            common_misspellings: strings(&[
                "recieve",
                "acount",
                "verfy",
                "pasword",
                "adress",
                "seperate",
                "definately",
                "untill",
                "occured",
                "immediatly",
                "sucessful",
                "informations",
                "costumer",
            ]),
            grammar_patterns: strings(&[
                // lowercase letter opening a new sentence
                r"[.!?]\s+[a-z]",
                r" {2,}",
            ]),
            grammar_penalty: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub thresholds: RiskThresholds,
}

/// Points added per fired condition. Each applies at most once per scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub url_suspicious: u32,
    pub email_suspicious: u32,
    pub insecure_scheme: u32,
    pub bad_url_reputation: u32,
    pub typosquat: u32,
    pub high_urgency: u32,
    pub personal_info_request: u32,
    pub financial_action_request: u32,
    pub threat_language: u32,
    pub poor_grammar: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            url_suspicious: 30,
            email_suspicious: 25,
            insecure_scheme: 10,
            bad_url_reputation: 15,
            typosquat: 20,
            high_urgency: 20,
            personal_info_request: 15,
            financial_action_request: 10,
            threat_language: 15,
            poor_grammar: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Lowest score classified suspicious.
    pub suspicious: u32,
    /// Lowest score classified dangerous.
    pub dangerous: u32,
    /// Grammar scores strictly below this add `poor_grammar`.
    pub poor_grammar_below: u8,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            suspicious: 35,
            dangerous: 70,
            poor_grammar_below: 60,
        }
    }
}

impl ScanConfig {
    /// Reject tables the analyzers could not use as intended.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.content_analysis.grammar_patterns {
            Regex::new(pattern)
                .with_context(|| format!("invalid grammar pattern '{}'", pattern))?;
        }

        let similarity = self.email_analysis.typosquat_min_similarity;
        if !(0.0..1.0).contains(&similarity) {
            bail!(
                "typosquat_min_similarity must be in [0.0, 1.0), got {}",
                similarity
            );
        }

        let thresholds = &self.scoring.thresholds;
        if thresholds.suspicious == 0
            || thresholds.suspicious >= thresholds.dangerous
            || thresholds.dangerous > 100
        {
            bail!(
                "thresholds must satisfy 0 < suspicious < dangerous <= 100, got {}/{}",
                thresholds.suspicious,
                thresholds.dangerous
            );
        }

        if self.content_analysis.grammar_penalty > 100 || thresholds.poor_grammar_below > 100 {
            bail!("grammar penalty and threshold must not exceed 100");
        }

        if self.content_analysis.high_urgency_min_matches == 0 {
            bail!("high_urgency_min_matches must be at least 1");
        }

        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize scan config")
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_scan_config(path: impl AsRef<Path>) -> Result<ScanConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: ScanConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;

        log::info!("Loaded scan config from {}", path.display());
        Ok(config)
    }
}
