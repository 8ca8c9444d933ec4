//! Flat scan-history record for an external document store.
//!
//! The scanner never stores anything; callers build a [`ScanRecord`] from a
//! verdict and hand the JSON to their own persistence layer.

use crate::components::{Classification, RiskVerdict};
use crate::scanner::ScanRequest;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prediction {
    Legit,
    Fake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl From<Classification> for ThreatLevel {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Safe => ThreatLevel::Low,
            Classification::Suspicious => ThreatLevel::Medium,
            Classification::Dangerous => ThreatLevel::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub url: Option<String>,
    pub email: Option<String>,
    pub prediction: Prediction,
    pub threat_level: ThreatLevel,
    pub risk_score: u32,
    pub classification: Classification,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ScanRecord {
    pub fn from_verdict(request: &ScanRequest, verdict: &RiskVerdict) -> Self {
        let prediction = match verdict.classification {
            Classification::Safe => Prediction::Legit,
            Classification::Suspicious | Classification::Dangerous => Prediction::Fake,
        };

        Self {
            url: request.url.clone(),
            email: request.email.clone(),
            prediction,
            threat_level: verdict.classification.into(),
            risk_score: verdict.score,
            classification: verdict.classification,
            recommendations: verdict.recommendations.clone(),
            user_id: None,
        }
    }

    /// Attribute the record to a caller identity from the auth provider.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize scan record")
    }
}
