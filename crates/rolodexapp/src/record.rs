use crate::error::{RolodexError, Result};
use crate::fields::{Address, Birthday, Email, Name, Phone};
use crate::pattern::WildcardPattern;
use serde::{Deserialize, Serialize};
use std::fmt;

const NOT_AVAILABLE: &str = "N/A";

/// One contact: a name plus optional phones, email, address and birthday.
///
/// Phones are kept in insertion order and are pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordData")]
pub struct Record {
    name: Name,
    phones: Vec<Phone>,
    email: Option<Email>,
    address: Option<Address>,
    birthday: Option<Birthday>,
}

/// Wire shape of a record. Loading goes through [`Record::add_phone`]
/// semantics so a hand-edited file cannot smuggle in duplicate phones.
#[derive(Deserialize)]
struct RecordData {
    name: Name,
    #[serde(default)]
    phones: Vec<Phone>,
    #[serde(default)]
    email: Option<Email>,
    #[serde(default)]
    address: Option<Address>,
    #[serde(default)]
    birthday: Option<Birthday>,
}

impl From<RecordData> for Record {
    fn from(data: RecordData) -> Self {
        let mut phones: Vec<Phone> = Vec::with_capacity(data.phones.len());
        for phone in data.phones {
            if !phones.contains(&phone) {
                phones.push(phone);
            }
        }
        Self {
            name: data.name,
            phones,
            email: data.email,
            address: data.address,
            birthday: data.birthday,
        }
    }
}

impl Record {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: Name::parse(name)?,
            phones: Vec::new(),
            email: None,
            address: None,
            birthday: None,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    /// Adds a phone. Returns `false` when the exact number is already listed.
    pub fn add_phone(&mut self, phone: &str) -> Result<bool> {
        let phone = Phone::parse(phone)?;
        if self.phones.contains(&phone) {
            return Ok(false);
        }
        self.phones.push(phone);
        Ok(true)
    }

    /// Replaces the first phone matching the `old` pattern with `new`.
    ///
    /// Returns `false` when no stored phone matches `old`.
    pub fn change_phone(&mut self, old: &str, new: &str) -> Result<bool> {
        if old == new {
            return Err(RolodexError::input(
                "New phone should differ from the previous one",
            ));
        }
        let new_phone = Phone::parse(new)?;
        let Some(index) = self.find_phone_index(old)? else {
            return Ok(false);
        };
        if self
            .phones
            .iter()
            .enumerate()
            .any(|(i, p)| i != index && *p == new_phone)
        {
            return Err(RolodexError::input(format!(
                "Phone {} is already listed for {}",
                new_phone, self.name
            )));
        }
        self.phones[index] = new_phone;
        Ok(true)
    }

    /// Removes the first phone matching the pattern.
    pub fn remove_phone(&mut self, phone: &str) -> Result<bool> {
        match self.find_phone_index(phone)? {
            Some(index) => {
                self.phones.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns the first stored phone matching `pattern` (`%` and `_` wildcards).
    pub fn find_phone(&self, pattern: &str) -> Result<Option<&Phone>> {
        Ok(self.find_phone_index(pattern)?.map(|i| &self.phones[i]))
    }

    fn find_phone_index(&self, pattern: &str) -> Result<Option<usize>> {
        let pattern = WildcardPattern::new(pattern)?;
        Ok(self.phones.iter().position(|p| pattern.matches(p.as_str())))
    }

    pub fn change_email(&mut self, email: &str) -> Result<()> {
        self.email = Some(Email::parse(email)?);
        Ok(())
    }

    pub fn change_address(&mut self, address: &str) -> Result<()> {
        self.address = Some(Address::parse(address)?);
        Ok(())
    }

    pub fn change_birthday(&mut self, birthday: &str) -> Result<()> {
        self.birthday = Some(Birthday::parse(birthday)?);
        Ok(())
    }

    pub fn remove_email(&mut self) -> bool {
        self.email.take().is_some()
    }

    pub fn remove_address(&mut self) -> bool {
        self.address.take().is_some()
    }

    pub fn remove_birthday(&mut self) -> bool {
        self.birthday.take().is_some()
    }

    /// Comma-joined phones, or `N/A`.
    pub fn phones_display(&self) -> String {
        if self.phones.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            self.phones
                .iter()
                .map(Phone::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

fn or_na<T: fmt::Display>(value: Option<&T>) -> String {
    value
        .map(ToString::to_string)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: phones={}; email={}; address={}; birthday={}",
            self.name,
            self.phones_display(),
            or_na(self.email()),
            or_na(self.address()),
            or_na(self.birthday()),
        )
    }
}
