use super::{ContentSignal, UrgencyLevel};
use crate::config_loader::ContentAnalysisConfig;
use regex::Regex;

/// Keyword list compiled to word-start regexes so `suspend` also covers
/// `suspended` without matching inside unrelated words.
struct KeywordSet {
    patterns: Vec<(String, Regex)>,
}

impl KeywordSet {
    fn compile(keywords: &[String]) -> Self {
        let patterns = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .filter_map(|keyword| {
                let boundary = if keyword.starts_with(|c: char| c.is_alphanumeric()) {
                    r"\b"
                } else {
                    ""
                };
                match Regex::new(&format!("{}{}", boundary, regex::escape(&keyword))) {
                    Ok(regex) => Some((keyword, regex)),
                    Err(e) => {
                        log::warn!("Skipping keyword '{}': {}", keyword, e);
                        None
                    }
                }
            })
            .collect();

        Self { patterns }
    }

    /// Distinct keywords present in `text`, in list order.
    fn matches<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let mut found: Vec<&str> = Vec::new();
        for (keyword, regex) in &self.patterns {
            if !found.contains(&keyword.as_str()) && regex.is_match(text) {
                found.push(keyword);
            }
        }
        found
    }
}

pub struct ContentAnalyzer {
    urgency: KeywordSet,
    threat: KeywordSet,
    personal_info: KeywordSet,
    financial: KeywordSet,
    high_urgency_min_matches: usize,
    grammar_checks: Vec<Regex>,
    grammar_penalty: u8,
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentAnalyzer {
    pub fn new() -> Self {
        Self::from_config(&ContentAnalysisConfig::default())
    }

    pub fn from_config(config: &ContentAnalysisConfig) -> Self {
        let mut grammar_checks: Vec<Regex> = config
            .grammar_patterns
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    log::warn!("Skipping grammar pattern '{}': {}", pattern, e);
                    None
                }
            })
            .collect();

        let misspellings: Vec<String> = config
            .common_misspellings
            .iter()
            .map(|word| regex::escape(word.trim()))
            .filter(|word| !word.is_empty())
            .collect();
        if !misspellings.is_empty() {
            if let Ok(regex) = Regex::new(&format!(r"(?i)\b(?:{})", misspellings.join("|"))) {
                grammar_checks.push(regex);
            }
        }

        Self {
            urgency: KeywordSet::compile(&config.urgency_keywords),
            threat: KeywordSet::compile(&config.threat_keywords),
            personal_info: KeywordSet::compile(&config.personal_info_keywords),
            financial: KeywordSet::compile(&config.financial_keywords),
            high_urgency_min_matches: config.high_urgency_min_matches.max(1),
            grammar_checks,
            grammar_penalty: config.grammar_penalty,
        }
    }

    pub fn analyze(&self, subject: &str, body: &str) -> ContentSignal {
        let text = match (subject.is_empty(), body.is_empty()) {
            (true, _) => body.to_string(),
            (_, true) => subject.to_string(),
            _ => format!("{}\n{}", subject, body),
        };
        let lower = text.to_lowercase();

        let urgency_matches = self.urgency.matches(&lower);
        let urgency_level = if urgency_matches.len() >= self.high_urgency_min_matches {
            UrgencyLevel::High
        } else if !urgency_matches.is_empty() {
            UrgencyLevel::Medium
        } else {
            UrgencyLevel::Low
        };

        let threat_matches = self.threat.matches(&lower);
        let personal_matches = self.personal_info.matches(&lower);
        let financial_matches = self.financial.matches(&lower);

        log::debug!(
            "Content keywords: urgency={:?} threat={:?} personal={:?} financial={:?}",
            urgency_matches,
            threat_matches,
            personal_matches,
            financial_matches
        );

        ContentSignal {
            urgency_level,
            requests_personal_info: !personal_matches.is_empty(),
            requests_financial_action: !financial_matches.is_empty(),
            uses_threat_language: !threat_matches.is_empty(),
            grammar_score: self.grammar_score(&text),
        }
    }

    /// 100 minus the penalty for every structural issue found, floored at 0.
    ///
    /// Runs on the original casing; the sentence-start check needs it.
    pub fn grammar_score(&self, text: &str) -> u8 {
        let issues: usize = self
            .grammar_checks
            .iter()
            .map(|check| check.find_iter(text).count())
            .sum();

        let deduction = issues.saturating_mul(self.grammar_penalty as usize);
        100usize.saturating_sub(deduction) as u8
    }
}
