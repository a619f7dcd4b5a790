use once_cell::sync::Lazy;
use regex::Regex;

// Optional leading +, then 7-15 digits allowing spaces, dots, dashes and
// parentheses as separators.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9 ().-]{6,19}[0-9]$").expect("invalid phone regex")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex")
});

/// Checks a phone number against the accepted format.
pub fn is_valid_phone_number(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (7..=15).contains(&digits) && PHONE_RE.is_match(phone)
}

/// Checks an email address against the accepted format.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
