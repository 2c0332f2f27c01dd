//! Query filter builder for the customer list endpoint.
//!
//! Raw query parameters arrive as a [`CustomerQuery`]. [`CustomerQuery::build`]
//! validates them into a [`CustomerFilter`], the predicate
//! [`CustomerFilter::matches`] over [`Customer`].
//!
//! All supplied filters combine with AND; no filters selects every record.
//! The exact-match columns also go to SQL through
//! [`CustomerFilter::push_where`] to narrow the scan. Case-insensitive
//! matching folds full Unicode, which SQLite's `lower()` does not, so those
//! predicates only run in [`CustomerFilter::matches`].

use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;

use super::errors::CustomerError;
use super::model::Customer;
use super::validation::{validate_domain_format, validate_email_format};
use crate::request::Request;

/// Raw list parameters. An empty string counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerQuery {
    pub email: Option<String>,
    pub email_contains: Option<String>,
    pub domain: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub suspended: Option<String>,
}

/// How the `email` column is constrained. At most one applies per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailFilter {
    /// Exact, case-sensitive equality.
    Exact(String),
    /// Case-insensitive substring.
    Contains(String),
    /// Case-insensitive `ends_with("@{domain}")`.
    Domain(String),
}

/// A validated list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub email: Option<EmailFilter>,
    /// Case-insensitive substring.
    pub first_name: Option<String>,
    /// Case-insensitive substring.
    pub last_name: Option<String>,
    /// Exact, case-sensitive equality.
    pub phone_number: Option<String>,
    pub suspended: Option<bool>,
}

impl CustomerQuery {
    pub fn from_request(req: &Request) -> Self {
        let get = |key: &str| req.query(key).filter(|v| !v.is_empty());
        Self {
            email: get("email"),
            email_contains: get("email_contains"),
            domain: get("domain"),
            first_name: get("first_name"),
            last_name: get("last_name"),
            phone_number: get("phone_number"),
            suspended: get("suspended"),
        }
    }

    /// Validates the parameters into a filter.
    pub fn build(self) -> Result<CustomerFilter, CustomerError> {
        let email_group = [&self.email, &self.email_contains, &self.domain]
            .into_iter()
            .filter(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
            .count();
        if email_group > 1 {
            return Err(CustomerError::ConflictingFilters);
        }

        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());

        let email = if let Some(email) = non_empty(self.email) {
            if !validate_email_format(&email) {
                return Err(CustomerError::InvalidEmail(email));
            }
            debug!(%email, "filter by email");
            Some(EmailFilter::Exact(email))
        } else if let Some(domain) = non_empty(self.domain) {
            if !validate_domain_format(&domain) {
                return Err(CustomerError::InvalidDomain(domain));
            }
            debug!(%domain, "filter by email domain");
            Some(EmailFilter::Domain(domain))
        } else if let Some(part) = non_empty(self.email_contains) {
            debug!(%part, "filter by email substring");
            Some(EmailFilter::Contains(part))
        } else {
            None
        };

        let suspended = non_empty(self.suspended).map(|raw| parse_flag(&raw));

        Ok(CustomerFilter {
            email,
            first_name: non_empty(self.first_name),
            last_name: non_empty(self.last_name),
            phone_number: non_empty(self.phone_number),
            suspended,
        })
    }
}

fn conjunction(query: &mut QueryBuilder<'_, Sqlite>, first: &mut bool) {
    query.push(if *first { " WHERE " } else { " AND " });
    *first = false;
}

/// `true` for `true`, `1` or `yes` in any case; anything else is `false`.
fn parse_flag(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl CustomerFilter {
    /// The filter as a predicate over a single record.
    pub fn matches(&self, customer: &Customer) -> bool {
        let email = match &self.email {
            None => true,
            Some(EmailFilter::Exact(email)) => customer.email == *email,
            Some(EmailFilter::Contains(part)) => contains_ignore_case(&customer.email, part),
            Some(EmailFilter::Domain(domain)) => customer
                .email
                .to_lowercase()
                .ends_with(&format!("@{}", domain.to_lowercase())),
        };

        email
            && self.first_name.as_ref().is_none_or(|f| contains_ignore_case(&customer.first_name, f))
            && self.last_name.as_ref().is_none_or(|l| contains_ignore_case(&customer.last_name, l))
            && self.phone_number.as_ref().is_none_or(|p| customer.phone_number.as_ref() == Some(p))
            && self.suspended.is_none_or(|s| customer.suspended == s)
    }

    /// Appends ` WHERE ...` for the exact-match filters (or nothing) to
    /// `query`. Every value is bound, never interpolated.
    ///
    /// The rows this selects are a superset of the filter's matches; run
    /// [`matches`](Self::matches) over them for the rest.
    pub(crate) fn push_where(&self, query: &mut QueryBuilder<'_, Sqlite>) {
        let mut first = true;

        if let Some(EmailFilter::Exact(email)) = &self.email {
            conjunction(query, &mut first);
            query.push("email = ").push_bind(email.clone());
        }
        if let Some(phone_number) = &self.phone_number {
            conjunction(query, &mut first);
            query.push("phone_number = ").push_bind(phone_number.clone());
        }
        if let Some(suspended) = self.suspended {
            conjunction(query, &mut first);
            query.push("suspended = ").push_bind(suspended);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> CustomerQuery {
        let uri = format!(
            "/customers?{}",
            pairs.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("&")
        );
        CustomerQuery::from_request(&Request::new("GET", &uri))
    }

    fn customer(first: &str, last: &str, email: &str, phone: Option<&str>, suspended: bool) -> Customer {
        Customer {
            id: 1,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone_number: phone.map(str::to_string),
            address: None,
            suspended,
        }
    }

    #[test]
    fn no_parameters_match_everything() {
        let filter = query(&[]).build().unwrap();
        assert_eq!(filter, CustomerFilter::default());
        assert!(filter.matches(&customer("A", "B", "ab@cd.io", None, true)));
    }

    #[test]
    fn empty_values_are_absent() {
        let filter = query(&[("email", ""), ("domain", ""), ("suspended", "")]).build().unwrap();
        assert_eq!(filter, CustomerFilter::default());
    }

    #[test]
    fn email_group_is_mutually_exclusive() {
        for pairs in [
            &[("email", "jane@example.com"), ("domain", "example.com")][..],
            &[("email", "jane@example.com"), ("email_contains", "jane")][..],
            &[("email_contains", "jane"), ("domain", "example.com")][..],
        ] {
            let err = query(pairs).build().unwrap_err();
            assert_eq!(
                err.to_string(),
                "Please provide only one filter: email, email_contains, or domain"
            );
        }
    }

    #[test]
    fn malformed_email_and_domain_are_rejected() {
        let err = query(&[("email", "bad-email")]).build().unwrap_err();
        assert_eq!(err.to_string(), "Invalid email format: bad-email");

        let err = query(&[("domain", ".example.com")]).build().unwrap_err();
        assert_eq!(err.to_string(), "Invalid domain format: .example.com");
    }

    #[test]
    fn email_is_exact_and_case_sensitive() {
        let filter = query(&[("email", "jane@example.com")]).build().unwrap();
        assert!(filter.matches(&customer("Jane", "Doe", "jane@example.com", None, false)));
        assert!(!filter.matches(&customer("Jane", "Doe", "Jane@example.com", None, false)));
    }

    #[test]
    fn domain_matches_suffix_ignoring_case() {
        let filter = query(&[("domain", "Example.com")]).build().unwrap();
        assert!(filter.matches(&customer("Jane", "Doe", "jane@EXAMPLE.com", None, false)));
        assert!(!filter.matches(&customer("Jane", "Doe", "jane@notexample.com", None, false)));
        assert!(!filter.matches(&customer("Jane", "Doe", "jane@example.com.au", None, false)));
    }

    #[test]
    fn names_match_substrings_ignoring_case() {
        let filter = query(&[("first_name", "AN"), ("last_name", "do")]).build().unwrap();
        assert!(filter.matches(&customer("Jane", "Doe", "ab@cd.io", None, false)));
        assert!(!filter.matches(&customer("John", "Doe", "ab@cd.io", None, false)));
    }

    #[test]
    fn phone_is_exact() {
        let filter = query(&[("phone_number", "555-1234")]).build().unwrap();
        assert!(filter.matches(&customer("A", "B", "ab@cd.io", Some("555-1234"), false)));
        assert!(!filter.matches(&customer("A", "B", "ab@cd.io", Some("555-12345"), false)));
        assert!(!filter.matches(&customer("A", "B", "ab@cd.io", None, false)));
    }

    #[test]
    fn suspended_coerces_to_bool() {
        for (raw, expected) in [("true", true), ("TRUE", true), ("1", true), ("Yes", true), ("false", false), ("0", false), ("nope", false)] {
            let filter = query(&[("suspended", raw)]).build().unwrap();
            assert_eq!(filter.suspended, Some(expected), "{raw}");
        }
    }

    #[test]
    fn case_folding_covers_non_ascii_letters() {
        let emile = customer("ÉMILE", "Müller", "émile@exämple.de", None, false);

        let filter = query(&[("first_name", "%C3%A9mile"), ("last_name", "M%C3%9CLLER")]).build().unwrap();
        assert!(filter.matches(&emile));

        let filter = query(&[("email_contains", "%C3%89MILE")]).build().unwrap();
        assert!(filter.matches(&emile));

        let filter = CustomerFilter {
            email: Some(EmailFilter::Domain("EXÄMPLE.de".to_string())),
            ..Default::default()
        };
        assert!(filter.matches(&emile));
    }

    #[test]
    fn where_clause_binds_only_exact_filters() {
        let filter = CustomerFilter {
            email: Some(EmailFilter::Exact("jane@example.com".to_string())),
            first_name: Some("ja".to_string()),
            last_name: Some("do".to_string()),
            phone_number: Some("555".to_string()),
            suspended: Some(false),
        };
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM customers");
        filter.push_where(&mut builder);
        assert_eq!(
            builder.sql(),
            "SELECT * FROM customers WHERE email = ? AND phone_number = ? AND suspended = ?"
        );

        let filter = CustomerFilter {
            email: Some(EmailFilter::Domain("example.com".to_string())),
            first_name: Some("ja".to_string()),
            ..Default::default()
        };
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM customers");
        filter.push_where(&mut builder);
        assert_eq!(builder.sql(), "SELECT * FROM customers");
    }
}
