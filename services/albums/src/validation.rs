//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::error::StoreError;

/// Validate email
///
/// Only the `local@domain.tld` shape is checked, not full RFC 5322.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(format!("Invalid email format: {}", email));
    }

    Ok(())
}

/// Split a comma-separated list into trimmed, non-empty entries
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}

/// Parse raw share input into distinct candidate addresses, keeping first-seen order
pub fn parse_email_list(raw: &str) -> Vec<String> {
    let mut emails: Vec<String> = Vec::new();
    for email in split_list(raw) {
        if !emails.iter().any(|seen| seen == email) {
            emails.push(email.to_string());
        }
    }
    emails
}

/// Parse and validate a share list
///
/// Fails with every invalid address when any candidate is malformed.
pub fn validate_share_list(raw: &str) -> Result<Vec<String>, StoreError> {
    let emails = parse_email_list(raw);
    let invalid: Vec<String> = emails
        .iter()
        .filter(|email| validate_email(email).is_err())
        .cloned()
        .collect();

    if !invalid.is_empty() {
        return Err(StoreError::InvalidEmails(invalid));
    }

    Ok(emails)
}

/// Parse comma-separated tag input for an upload
pub fn parse_tags(raw: &str) -> Vec<String> {
    split_list(raw).map(str::to_string).collect()
}
