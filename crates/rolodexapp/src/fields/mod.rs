//! Validated contact fields.
//!
//! Each field is a newtype whose only constructor runs the rules from
//! [`validation`], so a value that exists is always valid. The serde
//! representation is the plain display string; deserializing runs the same
//! checks (a stored birthday is only checked for format, since a date that was
//! in the past when saved stays in the past).

pub mod validation;

use crate::error::{RolodexError, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! text_field {
    ($(#[$doc:meta])* $ty:ident, $validate:path) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $ty(String);

        impl $ty {
            pub fn parse(raw: &str) -> Result<Self> {
                $validate(raw).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = RolodexError;

            fn try_from(raw: String) -> Result<Self> {
                Self::parse(&raw)
            }
        }

        impl From<$ty> for String {
            fn from(field: $ty) -> String {
                field.0
            }
        }
    };
}

text_field!(
    /// A contact name, title-cased.
    Name,
    validation::validate_name
);
text_field!(
    /// A phone number: 10 digits or `+CCCXXXXXXXXX`.
    Phone,
    validation::validate_phone
);
text_field!(Email, validation::validate_email);
text_field!(
    /// A postal address, title-cased, 5 to 100 characters.
    Address,
    validation::validate_address
);

impl Name {
    /// The store key for this name.
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

/// A birth date. Displayed and serialized as `DD.MM.YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(NaiveDate);

impl Birthday {
    /// Parses a birthday, rejecting dates after the local current date.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_on(raw, Local::now().date_naive())
    }

    /// Parses a birthday, rejecting dates after `today`.
    pub fn parse_on(raw: &str, today: NaiveDate) -> Result<Self> {
        validation::validate_birthday(raw, today).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&validation::format_date(self.0))
    }
}

impl TryFrom<String> for Birthday {
    type Error = RolodexError;

    fn try_from(raw: String) -> Result<Self> {
        validation::parse_date(&raw)
            .map(Self)
            .ok_or_else(|| RolodexError::validation(validation::BIRTHDAY_FORMAT_MESSAGE))
    }
}

impl From<Birthday> for String {
    fn from(birthday: Birthday) -> String {
        birthday.to_string()
    }
}
