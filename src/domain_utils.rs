use url::Url;

/// Minimal domain hierarchy utilities
pub struct DomainUtils;

impl DomainUtils {
    /// Split an address on its last `@` into lower-cased (local part, domain).
    ///
    /// Surrounding whitespace and angle brackets (`Name <user@host>`) are stripped.
    pub fn split_address(email: &str) -> Option<(String, String)> {
        let at_pos = email.rfind('@')?;
        let local = email[..at_pos].trim();
        let local = local.rsplit('<').next().unwrap_or(local);
        let domain = email[at_pos + 1..].trim().trim_end_matches('>').trim();

        Some((local.to_lowercase(), domain.to_lowercase()))
    }

    /// Host of a URL, lower-cased and without a `www.` prefix.
    ///
    /// Inputs without a scheme (`bit.ly/abc`) are retried with `http://`.
    pub fn extract_host(url: &str) -> Option<String> {
        let trimmed = url.trim();
        let parsed = match Url::parse(trimmed) {
            Ok(parsed) if parsed.host_str().is_some() => parsed,
            _ if !trimmed.is_empty() && !trimmed.contains("://") => {
                Url::parse(&format!("http://{}", trimmed)).ok()?
            }
            _ => return None,
        };

        parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .map(Self::canonicalize_domain)
    }

    /// Check if domain matches any in list (with hierarchy support)
    pub fn matches_domain_list(domain: &str, domain_list: &[String]) -> bool {
        let domain_lower = domain.to_lowercase();

        for pattern in domain_list {
            let pattern_lower = pattern.to_lowercase();

            // Exact match
            if domain_lower == pattern_lower {
                return true;
            }

            // Subdomain match (domain ends with .pattern)
            if domain_lower.ends_with(&format!(".{}", pattern_lower)) {
                return true;
            }
        }

        false
    }

    /// Canonicalize domain (remove www prefix)
    pub fn canonicalize_domain(domain: &str) -> String {
        let domain_lower = domain.to_lowercase();
        if let Some(stripped) = domain_lower.strip_prefix("www.") {
            stripped.to_string()
        } else {
            domain_lower
        }
    }
}
