pub mod content_analyzer;
pub mod email_analyzer;
pub mod url_analyzer;

pub use content_analyzer::ContentAnalyzer;
pub use email_analyzer::EmailAnalyzer;
pub use url_analyzer::UrlAnalyzer;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reputation {
    Good,
    Unknown,
    Bad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
}

/// Lexical findings for one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlSignal {
    pub is_suspicious: bool,
    pub matched_keywords: Vec<String>,
    pub has_secure_scheme: bool,
    pub reputation_hint: Reputation,
    pub is_shortened: bool,
}

/// Sender-address findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSignal {
    pub is_suspicious: bool,
    pub domain_reputation: Reputation,
    pub is_typosquat: bool,
    pub is_free_provider: bool,
    pub matched_patterns: Vec<String>,
}

impl EmailSignal {
    /// Result for input that has no `@` to split on.
    pub fn unparseable() -> Self {
        Self {
            is_suspicious: false,
            domain_reputation: Reputation::Unknown,
            is_typosquat: false,
            is_free_provider: false,
            matched_patterns: Vec::new(),
        }
    }
}

/// Language findings for a subject and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSignal {
    pub urgency_level: UrgencyLevel,
    pub requests_personal_info: bool,
    pub requests_financial_action: bool,
    pub uses_threat_language: bool,
    pub grammar_score: u8,
}

pub(crate) fn lowercase_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

/// Keywords found in `haystack`, deduplicated and ordered by where they first occur.
///
/// Keywords starting at the same position keep their list order.
pub(crate) fn first_occurrence_matches(haystack: &str, keywords: &[String]) -> Vec<String> {
    let mut found: Vec<(usize, usize, &String)> = Vec::new();

    for (index, keyword) in keywords.iter().enumerate() {
        if keyword.is_empty() || found.iter().any(|(_, _, k)| *k == keyword) {
            continue;
        }
        if let Some(position) = haystack.find(keyword.as_str()) {
            found.push((position, index, keyword));
        }
    }

    found.sort_by_key(|(position, index, _)| (*position, *index));
    found.into_iter().map(|(_, _, k)| k.clone()).collect()
}
