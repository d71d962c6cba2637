//! Validation and normalization rules for contact fields.
//!
//! | Field    | Normalization      | Rule                                              |
//! |----------|--------------------|---------------------------------------------------|
//! | name     | trim, title-case   | at least 2 chars; letters, spaces, hyphens only   |
//! | phone    | trim               | 10 digits, or `+` + 3-digit country code + 9      |
//! | email    | trim               | `local@domain.tld`                                |
//! | address  | trim, title-case   | 5 to 100 chars                                    |
//! | birthday | parse `DD.MM.YYYY` | real date, not after today                        |
//!
//! Every function returns the normalized value or a
//! [`RolodexError::Validation`] naming the field and the broken rule.

use crate::error::{RolodexError, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DATE_FORMAT: &str = "%d.%m.%Y";

pub const NAME_MIN_LEN: usize = 2;
pub const ADDRESS_MIN_LEN: usize = 5;
pub const ADDRESS_MAX_LEN: usize = 100;

pub const BIRTHDAY_FORMAT_MESSAGE: &str = "Invalid date format. Use DD.MM.YYYY";
pub const BIRTHDAY_FUTURE_MESSAGE: &str = "Birthday cannot be in the future";

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]{10}|\+[0-9]{3}[0-9]{9})$").expect("phone regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("email regex")
});

/// Title-cases a string: the first letter of every run of letters is
/// uppercased, the rest of the run lowercased.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Trims and uppercases the first character, leaving the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let trimmed = value.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn validate_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.chars().count() < NAME_MIN_LEN {
        return Err(RolodexError::validation(format!(
            "Validation of name '{}' failed. At least {} characters expected",
            name, NAME_MIN_LEN
        )));
    }
    if let Some(bad) = name
        .chars()
        .find(|ch| !(ch.is_alphabetic() || *ch == ' ' || *ch == '-'))
    {
        return Err(RolodexError::validation(format!(
            "Validation of name '{}' failed. Character '{}' not allowed (letters, spaces and hyphens only)",
            name, bad
        )));
    }
    Ok(title_case(name))
}

pub fn validate_phone(raw: &str) -> Result<String> {
    let phone = raw.trim();
    if !PHONE_RE.is_match(phone) {
        return Err(RolodexError::validation(format!(
            "Validation of phone number '{}' failed. 10 digits or +CCCXXXXXXXXX expected",
            phone
        )));
    }
    Ok(phone.to_string())
}

pub fn validate_email(raw: &str) -> Result<String> {
    let email = raw.trim();
    if !EMAIL_RE.is_match(email) {
        return Err(RolodexError::validation(format!(
            "Validation of email '{}' failed. local@domain.tld expected",
            email
        )));
    }
    Ok(email.to_string())
}

pub fn validate_address(raw: &str) -> Result<String> {
    let address = raw.trim();
    let len = address.chars().count();
    if !(ADDRESS_MIN_LEN..=ADDRESS_MAX_LEN).contains(&len) {
        return Err(RolodexError::validation(format!(
            "Validation of address '{}' failed. Length between {} and {} characters expected",
            address, ADDRESS_MIN_LEN, ADDRESS_MAX_LEN
        )));
    }
    Ok(title_case(address))
}

/// Parses a `DD.MM.YYYY` date. Returns `None` for anything that is not a real
/// calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub fn validate_birthday(raw: &str, today: NaiveDate) -> Result<NaiveDate> {
    let date = parse_date(raw).ok_or_else(|| RolodexError::validation(BIRTHDAY_FORMAT_MESSAGE))?;
    if date > today {
        return Err(RolodexError::validation(BIRTHDAY_FUTURE_MESSAGE));
    }
    Ok(date)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn message(err: RolodexError) -> String {
        match err {
            RolodexError::Validation(msg) => msg,
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("john doe"), "John Doe");
        assert_eq!(title_case("JOHN-PAUL"), "John-Paul");
        assert_eq!(title_case("kyiv, some st 45"), "Kyiv, Some St 45");
        assert_eq!(title_case("олена"), "Олена");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("  buy milk "), "Buy milk");
        assert_eq!(capitalize_first("already Fine"), "Already Fine");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_valid_names() {
        assert_eq!(validate_name("john doe").unwrap(), "John Doe");
        assert_eq!(validate_name("  Jo ").unwrap(), "Jo");
        assert_eq!(validate_name("anne-marie").unwrap(), "Anne-Marie");
    }

    #[test]
    fn test_invalid_names() {
        assert!(message(validate_name("J").unwrap_err()).contains("At least 2"));
        assert!(message(validate_name(" ").unwrap_err()).contains("At least 2"));
        assert!(message(validate_name("R2D2").unwrap_err()).contains("'2'"));
        assert!(validate_name("john_doe").is_err());
    }

    #[test]
    fn test_valid_phones() {
        assert_eq!(validate_phone("0123456789").unwrap(), "0123456789");
        assert_eq!(validate_phone(" 0501234567 ").unwrap(), "0501234567");
        assert_eq!(validate_phone("+380501234567").unwrap(), "+380501234567");
    }

    #[test]
    fn test_invalid_phones() {
        for bad in [
            "",
            "012345678",
            "01234567890",
            "012-345-678",
            "+38050123456",
            "+3805012345678",
            "380501234567",
            "abcdefghij",
            "٠١٢٣٤٥٦٧٨٩",
        ] {
            let err = validate_phone(bad).unwrap_err();
            assert!(message(err).contains("phone number"), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_emails() {
        assert_eq!(validate_email("j@x.com").unwrap(), "j@x.com");
        assert!(validate_email("Joe.Dow+tag@Mail.Example.ORG").is_ok());
        assert!(validate_email("j@x").is_err());
        assert!(validate_email("j@x.c").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("j x@x.com").is_err());
        assert!(validate_email("j@x.c0m").is_err());
    }

    #[test]
    fn test_addresses() {
        assert_eq!(
            validate_address("kyiv, some st 45").unwrap(),
            "Kyiv, Some St 45"
        );
        assert!(validate_address("Kyiv").is_err());
        assert!(validate_address("    Kyiv    ").is_err());
        assert!(validate_address(&"a".repeat(100)).is_ok());
        assert!(validate_address(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("12.04.2000"), Some(date(2000, 4, 12)));
        assert_eq!(parse_date("29.02.2000"), Some(date(2000, 2, 29)));
        assert_eq!(parse_date("31.02.2000"), None);
        assert_eq!(parse_date("2000-04-12"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_birthday_messages_distinguish_format_and_future() {
        let today = date(2024, 6, 1);
        assert_eq!(
            message(validate_birthday("31.02.2000", today).unwrap_err()),
            BIRTHDAY_FORMAT_MESSAGE
        );
        assert_eq!(
            message(validate_birthday("02.06.2024", today).unwrap_err()),
            BIRTHDAY_FUTURE_MESSAGE
        );
        assert_eq!(
            validate_birthday("01.06.2024", today).unwrap(),
            date(2024, 6, 1)
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2000, 4, 2)), "02.04.2000");
    }
}
