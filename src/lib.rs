pub mod components;
pub mod config_loader;
pub mod domain_utils;
pub mod features;
pub mod record;
pub mod scanner;
pub mod similarity;

pub use components::{Classification, RiskAggregator, RiskVerdict};
pub use config_loader::{ConfigLoader, ScanConfig};
pub use features::{
    ContentAnalyzer, ContentSignal, EmailAnalyzer, EmailSignal, Reputation, UrgencyLevel,
    UrlAnalyzer, UrlSignal,
};
pub use record::ScanRecord;
pub use scanner::{ScanRequest, Scanner};
pub use similarity::StringSimilarity;
