use crate::components::{RiskAggregator, RiskVerdict};
use crate::config_loader::{ConfigLoader, ScanConfig};
use crate::features::{ContentAnalyzer, EmailAnalyzer, UrlAnalyzer};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Whatever the caller has available for one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub url: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

impl ScanRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn has_content(&self) -> bool {
        self.subject.is_some() || self.body.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.email.is_none() && !self.has_content()
    }
}

/// Runs every analyzer whose input is present and aggregates the signals.
///
/// Holds only immutable compiled tables, so one instance can serve scans
/// from many threads at once.
pub struct Scanner {
    url_analyzer: UrlAnalyzer,
    email_analyzer: EmailAnalyzer,
    content_analyzer: ContentAnalyzer,
    aggregator: RiskAggregator,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self::from_config(&ScanConfig::default())
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            url_analyzer: UrlAnalyzer::from_config(&config.url_analysis),
            email_analyzer: EmailAnalyzer::from_config(&config.email_analysis),
            content_analyzer: ContentAnalyzer::from_config(&config.content_analysis),
            aggregator: RiskAggregator::new(config.scoring.clone()),
        }
    }

    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = ConfigLoader::load_scan_config(path)?;
        Ok(Self::from_config(&config))
    }

    pub fn scan(&self, request: &ScanRequest) -> RiskVerdict {
        let url_signal = request
            .url
            .as_deref()
            .map(|url| self.url_analyzer.analyze(url));
        let email_signal = request
            .email
            .as_deref()
            .map(|email| self.email_analyzer.analyze(email));
        let content_signal = request.has_content().then(|| {
            self.content_analyzer.analyze(
                request.subject.as_deref().unwrap_or(""),
                request.body.as_deref().unwrap_or(""),
            )
        });

        let verdict = self.aggregator.aggregate(
            url_signal.as_ref(),
            email_signal.as_ref(),
            content_signal.as_ref(),
        );

        log::info!(
            "Scan complete: {:?} (score {})",
            verdict.classification,
            verdict.score
        );
        verdict
    }
}
