use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use phishguard::config_loader::{ConfigLoader, ScanConfig};
use phishguard::features::Reputation;
use phishguard::record::ScanRecord;
use phishguard::{Classification, RiskVerdict, ScanRequest, Scanner};
use std::process;

fn main() {
    let matches = Command::new("phishguard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic phishing-risk scoring for links, sender addresses and message text")
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .value_name("URL")
                .help("Link to analyze"),
        )
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .value_name("ADDRESS")
                .help("Sender email address to analyze"),
        )
        .arg(
            Arg::new("subject")
                .short('s')
                .long("subject")
                .value_name("TEXT")
                .help("Message subject"),
        )
        .arg(
            Arg::new("body")
                .short('b')
                .long("body")
                .value_name("TEXT")
                .help("Message body")
                .conflicts_with("body-file"),
        )
        .arg(
            Arg::new("body-file")
                .long("body-file")
                .value_name("FILE")
                .help("Read the message body from a file"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("YAML file overriding keyword lists, weights and thresholds"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .value_parser(["text", "json", "record"])
                .default_value("text"),
        )
        .arg(
            Arg::new("user-id")
                .long("user-id")
                .value_name("ID")
                .help("Caller identity attached to record output"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Write the default configuration to FILE and exit"),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the configuration and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging of every matched signal")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config = match load_config(matches.get_one::<String>("config")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("🔍 Testing configuration...");
        println!(
            "  URL keywords: {} (+{} brand patterns, {} shorteners)",
            config.url_analysis.suspicious_keywords.len(),
            config.url_analysis.brand_impersonation_patterns.len(),
            config.url_analysis.shortener_domains.len()
        );
        println!(
            "  Protected brand domains: {}",
            config.email_analysis.protected_brand_domains.len()
        );
        println!(
            "  Thresholds: suspicious >= {}, dangerous >= {}",
            config.scoring.thresholds.suspicious, config.scoring.thresholds.dangerous
        );
        println!("✅ Configuration is valid");
        return;
    }

    let request = match build_request(&matches) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    if request.is_empty() {
        eprintln!("Nothing to scan: pass at least one of --url, --email, --subject, --body");
        process::exit(1);
    }

    let scanner = Scanner::from_config(&config);
    let verdict = scanner.scan(&request);

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");

    let output = match format {
        "json" => serde_json::to_string_pretty(&verdict).map_err(anyhow::Error::from),
        "record" => {
            let mut record = ScanRecord::from_verdict(&request, &verdict);
            if let Some(user_id) = matches.get_one::<String>("user-id") {
                record = record.with_user_id(user_id);
            }
            record.to_json()
        }
        _ => Ok(render_text(&verdict)),
    };

    match output {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error rendering result: {e:#}");
            process::exit(1);
        }
    }
}

fn load_config(path: Option<&String>) -> anyhow::Result<ScanConfig> {
    match path {
        Some(path) if std::path::Path::new(path).exists() => ConfigLoader::load_scan_config(path),
        Some(path) => {
            log::warn!("Configuration file '{path}' not found, using default configuration");
            Ok(ScanConfig::default())
        }
        None => Ok(ScanConfig::default()),
    }
}

fn generate_default_config(path: &str) {
    let written = ScanConfig::default()
        .to_yaml()
        .and_then(|yaml| std::fs::write(path, yaml).map_err(anyhow::Error::from));

    match written {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Edit the keyword lists, weights and thresholds to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e:#}");
            process::exit(1);
        }
    }
}

fn build_request(matches: &ArgMatches) -> anyhow::Result<ScanRequest> {
    let body = match matches.get_one::<String>("body-file") {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("failed to read body file {path}: {e}"))?,
        ),
        None => matches.get_one::<String>("body").cloned(),
    };

    Ok(ScanRequest {
        url: matches.get_one::<String>("url").cloned(),
        email: matches.get_one::<String>("email").cloned(),
        subject: matches.get_one::<String>("subject").cloned(),
        body,
    })
}

fn render_text(verdict: &RiskVerdict) -> String {
    let badge = match verdict.classification {
        Classification::Safe => "✅ SAFE",
        Classification::Suspicious => "⚠️  SUSPICIOUS",
        Classification::Dangerous => "❌ DANGEROUS",
    };

    let mut lines = vec![
        format!("{badge} (risk score {}/100)", verdict.score),
        "═══════════════════════════════════════".to_string(),
    ];

    if let Some(url) = &verdict.url_signal {
        lines.push("🌐 Link".to_string());
        lines.push(format!("  ├─ HTTPS: {}", yes_no(url.has_secure_scheme)));
        lines.push(format!("  ├─ Shortened: {}", yes_no(url.is_shortened)));
        lines.push(format!("  ├─ Reputation: {}", reputation(url.reputation_hint)));
        lines.push(format!("  └─ Keywords: {}", list_or_none(&url.matched_keywords)));
    }

    if let Some(email) = &verdict.email_signal {
        lines.push("📧 Sender".to_string());
        lines.push(format!("  ├─ Free provider: {}", yes_no(email.is_free_provider)));
        lines.push(format!("  ├─ Typosquatting: {}", yes_no(email.is_typosquat)));
        lines.push(format!(
            "  ├─ Reputation: {}",
            reputation(email.domain_reputation)
        ));
        lines.push(format!(
            "  └─ Role patterns: {}",
            list_or_none(&email.matched_patterns)
        ));
    }

    if let Some(content) = &verdict.content_signal {
        lines.push("📝 Content".to_string());
        lines.push(format!("  ├─ Urgency: {:?}", content.urgency_level));
        lines.push(format!(
            "  ├─ Asks for personal info: {}",
            yes_no(content.requests_personal_info)
        ));
        lines.push(format!(
            "  ├─ Asks for money: {}",
            yes_no(content.requests_financial_action)
        ));
        lines.push(format!(
            "  ├─ Threatening: {}",
            yes_no(content.uses_threat_language)
        ));
        lines.push(format!("  └─ Grammar score: {}/100", content.grammar_score));
    }

    lines.push(String::new());
    lines.push("💡 Recommendations".to_string());
    for recommendation in &verdict.recommendations {
        lines.push(format!("  • {recommendation}"));
    }

    lines.join("\n")
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn reputation(reputation: Reputation) -> &'static str {
    match reputation {
        Reputation::Good => "good",
        Reputation::Unknown => "unknown",
        Reputation::Bad => "bad",
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
