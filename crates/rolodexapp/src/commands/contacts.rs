use crate::book::{AddressBook, ContactField};
use crate::commands::{keys, CmdMessage, CmdResult, Command, Params};
use crate::error::{RolodexError, Result};
use crate::record::Record;
use chrono::{Local, NaiveDate};

/// Adds a contact, or merges the given fields into an existing one.
pub fn add(book: &mut AddressBook, params: &Params) -> Result<CmdResult> {
    let name = params.get(keys::NAME);
    let Some(name) = name.filter(|_| params.len() > 1) else {
        return Err(RolodexError::input(format!(
            "{} : no name of contact or too few parameters were entered",
            Command::Add
        )));
    };

    let existing = book.find(name).cloned();
    let is_new = existing.is_none();
    let mut record = match existing {
        Some(record) => record,
        None => Record::new(name)?,
    };

    let mut warnings = Vec::new();
    for phone in params.list(keys::PHONE) {
        if !record.add_phone(&phone)? {
            warnings.push(CmdMessage::warning(format!(
                "Phone {} is already listed for {}",
                phone,
                record.name()
            )));
        }
    }
    if let Some(email) = params.get(keys::EMAIL) {
        record.change_email(email)?;
    }
    if let Some(address) = params.get(keys::ADDRESS) {
        record.change_address(address)?;
    }
    if let Some(birthday) = params.get(keys::BIRTHDAY) {
        record.change_birthday(birthday)?;
    }

    let verb = if is_new { "added" } else { "updated" };
    let mut result = CmdResult::default()
        .with_message(CmdMessage::success(format!("Contact {} {}", record.name(), verb)));
    result.messages.extend(warnings);
    book.add_record(record.clone());
    Ok(result.with_records(vec![record]))
}

/// Changes one property of a contact: a phone (`old_phone` + `new_phone`),
/// the email, the address or the birthday.
pub fn change(book: &mut AddressBook, params: &Params) -> Result<CmdResult> {
    let name = params.require(keys::NAME, Command::Change)?;
    let Some(mut record) = book.find(name).cloned() else {
        return Ok(not_found(name));
    };

    let mut result = CmdResult::default();
    match (params.get(keys::OLD_PHONE), params.get(keys::NEW_PHONE)) {
        (Some(old), Some(new)) => {
            if record.change_phone(old, new)? {
                result.add_message(CmdMessage::success(format!(
                    "Phone {} changed to {} for {}",
                    old,
                    new,
                    record.name()
                )));
            } else {
                return Ok(result.with_message(CmdMessage::warning(format!(
                    "Phone {} not found for {}",
                    old,
                    record.name()
                ))));
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(RolodexError::input(format!(
                "{} : both {} and {} are required to change a phone",
                Command::Change,
                keys::OLD_PHONE,
                keys::NEW_PHONE
            )));
        }
        (None, None) => {}
    }

    if let Some(email) = params.get(keys::EMAIL) {
        record.change_email(email)?;
        result.add_message(changed(&record, ContactField::Email));
    }
    if let Some(address) = params.get(keys::ADDRESS) {
        record.change_address(address)?;
        result.add_message(changed(&record, ContactField::Address));
    }
    if let Some(birthday) = params.get(keys::BIRTHDAY) {
        record.change_birthday(birthday)?;
        result.add_message(changed(&record, ContactField::Birthday));
    }

    if result.messages.is_empty() {
        return Err(RolodexError::input(format!(
            "{} : nothing to change for {}",
            Command::Change,
            record.name()
        )));
    }

    book.add_record(record.clone());
    Ok(result.with_records(vec![record]))
}

/// Removes a contact, or with `filter` one of its fields.
pub fn remove(book: &mut AddressBook, params: &Params) -> Result<CmdResult> {
    let name = params.require(keys::NAME, Command::Remove)?;
    let field = match params.get(keys::FILTER) {
        Some(filter) => filter.parse::<ContactField>()?,
        None => ContactField::Name,
    };

    if field == ContactField::Name {
        return Ok(match book.find(name).map(|r| r.name().to_string()) {
            Some(display) => {
                book.remove(name);
                CmdResult::default()
                    .with_message(CmdMessage::success(format!("Contact {} removed", display)))
            }
            None => not_found(name),
        });
    }

    let Some(mut record) = book.find(name).cloned() else {
        return Ok(not_found(name));
    };
    let removed = match field {
        ContactField::Phone => {
            let phone = params.require(keys::PHONE, Command::Remove)?;
            record.remove_phone(phone)?
        }
        ContactField::Email => record.remove_email(),
        ContactField::Address => record.remove_address(),
        ContactField::Birthday => record.remove_birthday(),
        ContactField::Name => false,
    };

    if !removed {
        return Ok(CmdResult::default().with_message(CmdMessage::warning(format!(
            "{} has no matching {} to remove",
            record.name(),
            field
        ))));
    }
    let message = CmdMessage::success(format!("Removed {} from {}", field, record.name()));
    book.add_record(record.clone());
    Ok(CmdResult::default()
        .with_message(message)
        .with_records(vec![record]))
}

/// Finds contacts by one field. The field comes from `filter`, or from the
/// single contact field present in the parameters.
pub fn find(book: &AddressBook, params: &Params) -> Result<CmdResult> {
    let field = match params.get(keys::FILTER) {
        Some(filter) => filter.parse::<ContactField>()?,
        None => infer_field(params)?,
    };
    let query = params.require(field.as_str(), Command::Find)?;

    let records: Vec<Record> = book
        .find_records(query, field)?
        .into_iter()
        .cloned()
        .collect();
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No contacts found with {} matching '{}'",
            field, query
        )));
    }
    Ok(result.with_records(records))
}

fn infer_field(params: &Params) -> Result<ContactField> {
    let present: Vec<ContactField> = ContactField::ALL
        .into_iter()
        .filter(|f| params.contains(f.as_str()))
        .collect();
    match present.as_slice() {
        [field] => Ok(*field),
        [] => Err(RolodexError::input(format!(
            "{} : no search criteria were entered",
            Command::Find
        ))),
        _ => Err(RolodexError::input(format!(
            "{} : search by one field at a time",
            Command::Find
        ))),
    }
}

/// Field/value rows for one contact, optionally narrowed to one field.
pub fn show(book: &AddressBook, params: &Params) -> Result<CmdResult> {
    let name = params.require(keys::NAME, Command::Show)?;
    let only = params
        .get(keys::FILTER)
        .map(str::parse::<ContactField>)
        .transpose()?;
    let Some(record) = book.find(name) else {
        return Ok(not_found(name));
    };

    let details = ContactField::ALL
        .into_iter()
        .filter(|field| only.map_or(true, |o| o == *field))
        .map(|field| (label(field).to_string(), field_value(record, field)))
        .collect();
    Ok(CmdResult::default().with_details(details))
}

fn label(field: ContactField) -> &'static str {
    match field {
        ContactField::Name => "Name",
        ContactField::Phone => "Phones",
        ContactField::Email => "Email",
        ContactField::Address => "Address",
        ContactField::Birthday => "Birthday",
    }
}

fn field_value(record: &Record, field: ContactField) -> String {
    let value = match field {
        ContactField::Name => Some(record.name().to_string()),
        ContactField::Phone => Some(record.phones_display()),
        ContactField::Email => record.email().map(ToString::to_string),
        ContactField::Address => record.address().map(ToString::to_string),
        ContactField::Birthday => record.birthday().map(ToString::to_string),
    };
    value.unwrap_or_else(|| "N/A".to_string())
}

/// Every contact, sorted by name.
pub fn all(book: &AddressBook) -> CmdResult {
    CmdResult::default().with_records(book.all_contacts().into_iter().cloned().collect())
}

/// Upcoming birthdays counted from the local date.
pub fn birthdays(book: &AddressBook, params: &Params, default_days: u32) -> Result<CmdResult> {
    birthdays_on(book, params, default_days, Local::now().date_naive())
}

pub fn birthdays_on(
    book: &AddressBook,
    params: &Params,
    default_days: u32,
    today: NaiveDate,
) -> Result<CmdResult> {
    let days = match params.get(keys::DAYS) {
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            RolodexError::input(format!(
                "{} : days must be a non-negative whole number, got '{}'",
                Command::Birthdays,
                raw
            ))
        })?,
        None => default_days,
    };
    let upcoming = book.upcoming_birthdays_from(today, days);
    let mut result = CmdResult::default();
    if upcoming.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No birthdays in the next {} days",
            days
        )));
    }
    Ok(result.with_birthdays(upcoming))
}

fn changed(record: &Record, field: ContactField) -> CmdMessage {
    CmdMessage::success(format!("Changed {} for {}", field, record.name()))
}

fn not_found(name: &str) -> CmdResult {
    CmdResult::default().with_message(CmdMessage::warning(format!(
        "Contact {} not found",
        name.trim()
    )))
}
