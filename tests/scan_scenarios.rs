use phishguard::components::risk_aggregator::NO_THREATS_RECOMMENDATION;
use phishguard::{
    Classification, ContentAnalyzer, EmailAnalyzer, Reputation, RiskAggregator, ScanRequest,
    Scanner, StringSimilarity, UrgencyLevel, UrlAnalyzer,
};

const PHISHING_SUBJECT: &str = "Urgent: Verify Account Now";
const PHISHING_BODY: &str = "Your account will be suspended immediately. \
    Confirm your password now to avoid suspension. Immediate action is required.";

#[test]
fn brand_impersonation_url_is_flagged() {
    let signal = UrlAnalyzer::new().analyze("http://paypal-verify-account.com");

    assert!(signal.is_suspicious);
    assert!(signal.matched_keywords.iter().any(|k| k == "verify"));
    assert_eq!(signal.reputation_hint, Reputation::Bad);
    assert!(!signal.has_secure_scheme);
}

#[test]
fn typosquatted_sender_is_flagged() {
    let ratio = StringSimilarity::ratio("gmai1.com", "gmail.com");
    assert!(ratio > 0.7 && ratio < 1.0);

    let signal = EmailAnalyzer::new().analyze("support@gmai1.com");
    assert!(signal.is_typosquat);
    assert!(signal.is_suspicious);
}

#[test]
fn personal_webmail_sender_is_clean() {
    let signal = EmailAnalyzer::new().analyze("jane.doe@gmail.com");

    assert!(!signal.is_suspicious);
    assert!(signal.is_free_provider);
    assert!(signal.matched_patterns.is_empty());
}

#[test]
fn full_phishing_attempt_is_dangerous() {
    let content = ContentAnalyzer::new().analyze(PHISHING_SUBJECT, PHISHING_BODY);
    assert_eq!(content.urgency_level, UrgencyLevel::High);
    assert!(content.requests_personal_info);
    assert!(content.uses_threat_language);

    let request = ScanRequest::new()
        .with_url("http://paypal-verify-account.com")
        .with_email("support@gmai1.com")
        .with_subject(PHISHING_SUBJECT)
        .with_body(PHISHING_BODY);
    let verdict = Scanner::new().scan(&request);

    assert_eq!(verdict.score, 100);
    assert_eq!(verdict.classification, Classification::Dangerous);
    assert_eq!(verdict.content_signal, Some(content));
}

#[test]
fn benign_inputs_are_safe() {
    let request = ScanRequest::new()
        .with_url("https://www.wikipedia.org/wiki/Phishing")
        .with_email("jane@paypal.com")
        .with_subject("Team lunch on Friday")
        .with_body("Hi all, lunch is booked for Friday at noon. See you there.");
    let verdict = Scanner::new().scan(&request);

    assert_eq!(verdict.score, 0);
    assert_eq!(verdict.classification, Classification::Safe);
    assert_eq!(verdict.recommendations, vec![NO_THREATS_RECOMMENDATION]);
    assert_eq!(
        verdict.email_signal.map(|e| e.domain_reputation),
        Some(Reputation::Good)
    );
}

#[test]
fn aggregating_nothing_is_safe() {
    let verdict = RiskAggregator::default().aggregate(None, None, None);
    assert_eq!(verdict.score, 0);
    assert_eq!(verdict.classification, Classification::Safe);
}

#[test]
fn score_stays_within_bounds() {
    let scanner = Scanner::new();
    let urls = ["", "https://example.com", "http://bit.ly/amazon-gift-claim-bonus"];
    let emails = ["", "nobody", "admin@yahoo.com", "billing@paypa1.com"];
    let bodies = ["", "Hello.", PHISHING_BODY];

    for url in urls {
        for email in emails {
            for body in bodies {
                let request = ScanRequest::new()
                    .with_url(url)
                    .with_email(email)
                    .with_body(body);
                let verdict = scanner.scan(&request);
                assert!(verdict.score <= 100, "score out of range for {:?}", request);
            }
        }
    }
}

#[test]
fn scans_are_deterministic() {
    let scanner = Scanner::new();
    let request = ScanRequest::new()
        .with_url("https://secure-login.example.com/verify")
        .with_email("helpdesk@outlook.com")
        .with_subject(PHISHING_SUBJECT)
        .with_body("Pleese  send the invoice payment. thanks");

    let first = serde_json::to_string(&scanner.scan(&request)).unwrap();
    let second = serde_json::to_string(&scanner.scan(&request)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn similarity_is_symmetric_and_reflexive() {
    let words = ["", "abc", "paypal.com", "paypa1.com", "micros0ft.com", "amazon.co"];
    for a in words {
        assert_eq!(StringSimilarity::ratio(a, a), 1.0);
        for b in words {
            assert_eq!(StringSimilarity::ratio(a, b), StringSimilarity::ratio(b, a));
        }
    }
    assert_eq!(StringSimilarity::ratio("", "abc"), 0.0);
}
