//! Shape checks for the email and domain query filters.
//!
//! These are permissive heuristics, not RFC 5321 validators. The explicit
//! rejections (double dot, space, leading or trailing dot) run before the
//! patterns, and the patterns themselves only accept ASCII alphanumerics plus
//! a few punctuation characters.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9._%+-]*[a-zA-Z0-9]@[a-zA-Z0-9][a-zA-Z0-9.-]*[a-zA-Z0-9]\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

// Single-character local part and domain label: `a@b.co`.
static SHORT_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]@[a-zA-Z0-9]\.[a-zA-Z]{2,}$").expect("short email pattern is valid")
});

static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9.-]*[a-zA-Z0-9]\.[a-zA-Z]{2,}$")
        .expect("domain pattern is valid")
});

// Single-character label: `a.co`.
static SHORT_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]\.[a-zA-Z]{2,}$").expect("short domain pattern is valid")
});

pub fn validate_email_format(email: &str) -> bool {
    if email.is_empty() || email.contains("..") || email.contains(' ') {
        return false;
    }
    EMAIL.is_match(email) || SHORT_EMAIL.is_match(email)
}

pub fn validate_domain_format(domain: &str) -> bool {
    if domain.is_empty()
        || domain.contains("..")
        || domain.contains(' ')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return false;
    }
    DOMAIN.is_match(domain) || SHORT_DOMAIN.is_match(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_emails() {
        for email in ["jane.doe@example.com", "a@b.co", "j_d+tag@mail.example.org", "ab@cd.io"] {
            assert!(validate_email_format(email), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in [
            "",
            "a..b@example.com",
            "jane doe@example.com",
            "bad-email",
            "@example.com",
            "jane@",
            "jane@example",
            "jane@example.c",
            ".jane@example.com",
            "jane.@example.com",
        ] {
            assert!(!validate_email_format(email), "{email}");
        }
    }

    #[test]
    fn accepts_common_domains() {
        for domain in ["example.com", "a.co", "mail.example.org", "my-site.io"] {
            assert!(validate_domain_format(domain), "{domain}");
        }
    }

    #[test]
    fn rejects_malformed_domains() {
        for domain in [
            "",
            ".example.com",
            "example.com.",
            "example..com",
            "exa mple.com",
            "example",
            "example.c",
            "-example.com",
        ] {
            assert!(!validate_domain_format(domain), "{domain}");
        }
    }
}
