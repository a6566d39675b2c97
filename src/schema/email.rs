//! Email address format check
//!
//! Conservative syntax check, no DNS or deliverability lookups:
//! - at most 254 characters overall, at most 64 in the local part
//! - local part: dot-separated atoms of RFC 5322 atext
//! - domain: two or more labels, alphabetic TLD of 2+ letters
//!
//! Addresses are normalized before the check: surrounding whitespace is
//! dropped and the domain is lower-cased. The local part is kept as given.

use std::sync::OnceLock;

use regex::Regex;

const MAX_ADDRESS_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

const EMAIL_PATTERN: &str = concat!(
    r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
    r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Returns the stored form of an address.
pub fn normalize_email(candidate: &str) -> String {
    let trimmed = candidate.trim();
    match trimmed.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_ascii_lowercase()),
        None => trimmed.to_string(),
    }
}

/// Returns true if `candidate` is a syntactically valid email address.
pub fn is_valid_email(candidate: &str) -> bool {
    if candidate.len() > MAX_ADDRESS_LEN {
        return false;
    }

    match candidate.rsplit_once('@') {
        Some((local, _)) if local.len() <= MAX_LOCAL_LEN => email_regex().is_match(candidate),
        _ => false,
    }
}
