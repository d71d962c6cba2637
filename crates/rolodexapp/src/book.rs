//! The address book: contact records keyed by lower-cased name.
//!
//! Adding a record whose name already exists (in any letter case) replaces
//! the stored record; the replaced record keeps its display position.

use crate::birthdays;
use crate::error::{RolodexError, Result};
use crate::fields::validation::{format_date, parse_date};
use crate::pattern::WildcardPattern;
use crate::record::Record;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Contact fields a search can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Phone,
    Email,
    Address,
    Birthday,
}

impl ContactField {
    pub const ALL: [ContactField; 5] = [
        ContactField::Name,
        ContactField::Phone,
        ContactField::Email,
        ContactField::Address,
        ContactField::Birthday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Phone => "phone",
            ContactField::Email => "email",
            ContactField::Address => "address",
            ContactField::Birthday => "birthday",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = RolodexError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == wanted)
            .ok_or_else(|| {
                RolodexError::input(format!(
                    "Unknown contact field '{}' (expected name, phone, email, address or birthday)",
                    s.trim()
                ))
            })
    }
}

/// A birthday reminder: who, and on which (weekday) to congratulate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    pub name: String,
    pub congratulate_on: NaiveDate,
}

impl UpcomingBirthday {
    /// The congratulation date as `DD.MM.YYYY`.
    pub fn date(&self) -> String {
        format_date(self.congratulate_on)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "BookData", into = "BookData")]
pub struct AddressBook {
    records: HashMap<String, Record>,
    order: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct BookData {
    #[serde(default)]
    records: Vec<Record>,
}

impl From<BookData> for AddressBook {
    fn from(data: BookData) -> Self {
        let mut book = AddressBook::new();
        for record in data.records {
            book.add_record(record);
        }
        book
    }
}

impl From<AddressBook> for BookData {
    fn from(mut book: AddressBook) -> Self {
        let records = book
            .order
            .iter()
            .filter_map(|key| book.records.remove(key))
            .collect();
        BookData { records }
    }
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inserts the record, replacing any record with the same name.
    pub fn add_record(&mut self, record: Record) {
        let key = record.name().key();
        if self.records.insert(key.clone(), record).is_none() {
            self.order.push(key);
        }
    }

    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(&name.trim().to_lowercase())
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(&name.trim().to_lowercase())
    }

    /// Removes the record. Returns `false` when there was none.
    pub fn remove(&mut self, name: &str) -> bool {
        let key = name.trim().to_lowercase();
        if self.records.remove(&key).is_some() {
            self.order.retain(|k| *k != key);
            true
        } else {
            false
        }
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.order.iter().filter_map(|key| self.records.get(key))
    }

    /// All records sorted by lower-cased name.
    pub fn all_contacts(&self) -> Vec<&Record> {
        let mut keys: Vec<&String> = self.records.keys().collect();
        keys.sort();
        keys.into_iter()
            .filter_map(|key| self.records.get(key))
            .collect()
    }

    /// Searches one field. `birthday` queries are exact `DD.MM.YYYY` dates;
    /// every other field takes a `%`/`_` wildcard pattern.
    pub fn find_records(&self, query: &str, field: ContactField) -> Result<Vec<&Record>> {
        if field == ContactField::Birthday {
            let wanted = parse_date(query).ok_or_else(|| {
                RolodexError::input(format!(
                    "Birthday search expects a valid DD.MM.YYYY date, got '{}'",
                    query.trim()
                ))
            })?;
            return Ok(self
                .iter()
                .filter(|r| r.birthday().is_some_and(|b| b.date() == wanted))
                .collect());
        }

        let pattern = WildcardPattern::new(query)?;
        let mut found = Vec::new();
        for record in self.iter() {
            let hit = match field {
                ContactField::Name => pattern.matches(record.name().as_str()),
                ContactField::Phone => record
                    .phones()
                    .iter()
                    .any(|p| pattern.matches(p.as_str())),
                ContactField::Email => record.email().is_some_and(|e| pattern.matches(e.as_str())),
                ContactField::Address => record
                    .address()
                    .is_some_and(|a| pattern.matches(a.as_str())),
                ContactField::Birthday => false,
            };
            if hit {
                found.push(record);
            }
        }
        Ok(found)
    }

    /// Birthday reminders for the next `days` days, counted from the local date.
    pub fn upcoming_birthdays(&self, days: u32) -> Vec<UpcomingBirthday> {
        self.upcoming_birthdays_from(Local::now().date_naive(), days)
    }

    /// Birthday reminders for the `days` days following `today` (inclusive),
    /// ordered by congratulation date, then name.
    pub fn upcoming_birthdays_from(&self, today: NaiveDate, days: u32) -> Vec<UpcomingBirthday> {
        let mut upcoming: Vec<UpcomingBirthday> = self
            .iter()
            .filter_map(|record| {
                let birthday = record.birthday()?;
                let congratulate_on = birthdays::upcoming(birthday.date(), today, days)?;
                Some(UpcomingBirthday {
                    name: record.name().to_string(),
                    congratulate_on,
                })
            })
            .collect();
        upcoming.sort_by(|a, b| {
            a.congratulate_on
                .cmp(&b.congratulate_on)
                .then_with(|| a.name.cmp(&b.name))
        });
        upcoming
    }
}

impl fmt::Display for AddressBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Address book:")?;
        for record in self.iter() {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(name: &str) -> Record {
        Record::new(name).unwrap()
    }

    fn names(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.name().to_string()).collect()
    }

    fn with_birthday(name: &str, birthday: &str) -> Record {
        let mut r = record(name);
        r.change_birthday(birthday).unwrap();
        r
    }

    #[test]
    fn test_add_record_upserts_case_insensitively() {
        let mut book = AddressBook::new();
        let mut first = record("Jo");
        first.add_phone("0123456789").unwrap();
        book.add_record(first);
        book.add_record(record("JO"));

        assert_eq!(book.len(), 1);
        assert!(book.find("jo").unwrap().phones().is_empty());
    }

    #[test]
    fn test_upsert_keeps_display_position() {
        let mut book = AddressBook::new();
        book.add_record(record("Zed"));
        book.add_record(record("Amy"));
        book.add_record(record("zed"));
        assert_eq!(names(&book.iter().collect::<Vec<_>>()), vec!["Zed", "Amy"]);
    }

    #[test]
    fn test_find_and_remove() {
        let mut book = AddressBook::new();
        book.add_record(record("john doe"));

        assert!(book.find("JOHN DOE").is_some());
        assert!(book.find("jane").is_none());
        assert!(!book.remove("jane"));
        assert!(book.remove("John Doe"));
        assert!(book.is_empty());
        assert_eq!(book.iter().count(), 0);
    }

    #[test]
    fn test_all_contacts_sorted_by_name() {
        let mut book = AddressBook::new();
        for name in ["zed", "Amy", "bob"] {
            book.add_record(record(name));
        }
        assert_eq!(names(&book.all_contacts()), vec!["Amy", "Bob", "Zed"]);
    }

    #[test]
    fn test_find_by_name_patterns() {
        let mut book = AddressBook::new();
        for name in ["Jon", "Jan", "Jaan", "John", "Ann"] {
            book.add_record(record(name));
        }

        let mut starts_with_j = names(&book.find_records("J%", ContactField::Name).unwrap());
        starts_with_j.sort();
        assert_eq!(starts_with_j, vec!["Jaan", "Jan", "John", "Jon"]);

        let mut j_n = names(&book.find_records("j_n", ContactField::Name).unwrap());
        j_n.sort();
        assert_eq!(j_n, vec!["Jan", "Jon"]);
    }

    #[test]
    fn test_find_by_phone_email_address() {
        let mut book = AddressBook::new();
        let mut john = record("John");
        john.add_phone("0501234567").unwrap();
        john.change_email("john@mail.com").unwrap();
        john.change_address("Kyiv, Main St 1").unwrap();
        book.add_record(john);
        book.add_record(record("Ann"));

        assert_eq!(
            names(&book.find_records("050%", ContactField::Phone).unwrap()),
            vec!["John"]
        );
        assert_eq!(
            names(&book.find_records("%@MAIL.COM", ContactField::Email).unwrap()),
            vec!["John"]
        );
        assert_eq!(
            names(&book.find_records("kyiv%", ContactField::Address).unwrap()),
            vec!["John"]
        );
        // Absent fields never match, not even `%`
        assert_eq!(
            names(&book.find_records("%", ContactField::Email).unwrap()),
            vec!["John"]
        );
    }

    #[test]
    fn test_find_by_birthday_is_exact() {
        let mut book = AddressBook::new();
        book.add_record(with_birthday("Ann", "12.04.2000"));
        book.add_record(with_birthday("Bob", "13.04.2000"));

        assert_eq!(
            names(&book.find_records("12.04.2000", ContactField::Birthday).unwrap()),
            vec!["Ann"]
        );
        assert!(book
            .find_records("12.04.20%", ContactField::Birthday)
            .is_err());
    }

    #[test]
    fn test_find_by_unparsable_birthday_is_input_error() {
        let book = AddressBook::new();
        assert!(matches!(
            book.find_records("31.02.2000", ContactField::Birthday),
            Err(RolodexError::Input(_))
        ));
    }

    #[test]
    fn test_contact_field_from_str() {
        assert_eq!("Phone".parse::<ContactField>().unwrap(), ContactField::Phone);
        assert!(matches!(
            "nickname".parse::<ContactField>(),
            Err(RolodexError::Input(_))
        ));
    }

    #[test]
    fn test_upcoming_birthdays() {
        // Monday 2024-06-03
        let today = date(2024, 6, 3);
        let mut book = AddressBook::new();
        book.add_record(with_birthday("Sat", "08.06.1990"));
        book.add_record(with_birthday("Sun", "09.06.1991"));
        book.add_record(with_birthday("Tue", "04.06.1992"));
        book.add_record(with_birthday("Late", "20.06.1993"));
        book.add_record(with_birthday("Past", "01.06.1994"));
        book.add_record(record("None"));

        let upcoming = book.upcoming_birthdays_from(today, 7);
        let got: Vec<(String, String)> = upcoming
            .iter()
            .map(|u| (u.name.clone(), u.date()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Tue".to_string(), "04.06.2024".to_string()),
                ("Sat".to_string(), "10.06.2024".to_string()),
                ("Sun".to_string(), "10.06.2024".to_string()),
            ]
        );
    }

    #[test]
    fn test_upcoming_birthdays_leap_day_non_leap_year() {
        let mut book = AddressBook::new();
        book.add_record(with_birthday("Leap", "29.02.2000"));
        let upcoming = book.upcoming_birthdays_from(date(2023, 2, 27), 7);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].date(), "01.03.2023");
    }

    #[test]
    fn test_upcoming_birthdays_year_rollover() {
        let mut book = AddressBook::new();
        book.add_record(with_birthday("Newyear", "01.01.1990"));
        // 2025-01-01 is a Wednesday
        let upcoming = book.upcoming_birthdays_from(date(2024, 12, 28), 7);
        assert_eq!(upcoming[0].date(), "01.01.2025");
    }

    #[test]
    fn test_serde_roundtrip_preserves_order() {
        let mut book = AddressBook::new();
        let mut zed = record("Zed");
        zed.add_phone("0123456789").unwrap();
        book.add_record(zed);
        book.add_record(with_birthday("Amy", "01.01.1990"));

        let json = serde_json::to_string(&book).unwrap();
        let loaded: AddressBook = serde_json::from_str(&json).unwrap();
        assert_eq!(names(&loaded.iter().collect::<Vec<_>>()), vec!["Zed", "Amy"]);
        assert_eq!(loaded.find("zed").unwrap().phones()[0].as_str(), "0123456789");
        assert_eq!(
            loaded.find("amy").unwrap().birthday().unwrap().to_string(),
            "01.01.1990"
        );
    }

    #[test]
    fn test_display() {
        let mut book = AddressBook::new();
        book.add_record(record("Jo"));
        assert_eq!(
            book.to_string(),
            "Address book:\nJo: phones=N/A; email=N/A; address=N/A; birthday=N/A\n"
        );
    }
}
