//! # Command Layer
//!
//! Each user intent (add a contact, find notes, list birthdays, ...) is one
//! function in [`contacts`] or [`notes`]. A command receives the store it
//! works on and a [`Params`] map of raw field values, calls into the domain
//! types, and returns a [`CmdResult`].
//!
//! Commands never print. "Not found" situations come back as warning
//! messages; broken preconditions and invalid field values come back as
//! `Err` so the caller can report them and carry on.
//!
//! Commands that change a contact work on a copy of the record and write it
//! back only once every field has validated, so a failed `add` or `change`
//! leaves the address book untouched.

use crate::book::UpcomingBirthday;
use crate::error::{RolodexError, Result};
use crate::note::{Note, NoteId};
use crate::record::Record;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub mod contacts;
pub mod notes;

/// Parameter names understood by the commands.
pub mod keys {
    pub const NAME: &str = "name";
    pub const PHONE: &str = "phone";
    pub const OLD_PHONE: &str = "old_phone";
    pub const NEW_PHONE: &str = "new_phone";
    pub const EMAIL: &str = "email";
    pub const ADDRESS: &str = "address";
    pub const BIRTHDAY: &str = "birthday";
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const TEXT: &str = "text";
    pub const TAGS: &str = "tags";
    pub const TAG: &str = "tag";
    pub const DAYS: &str = "days";
    pub const FILTER: &str = "filter";
    pub const SORT: &str = "sort";
}

/// Raw field values collected by a front end, keyed by parameter name.
///
/// Values are trimmed on insert and blank values are dropped, so
/// `get` returning `Some` always means the user supplied something.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(HashMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.0.insert(key.to_string(), value.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn require(&self, key: &str, command: Command) -> Result<&str> {
        self.get(key).ok_or_else(|| {
            RolodexError::input(format!("{} : {} was not provided", command, key))
        })
    }

    /// A comma-separated value split into trimmed, non-empty items.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.get(key).map(split_list).unwrap_or_default()
    }

    pub fn note_id(&self, command: Command) -> Result<NoteId> {
        let raw = self.require(keys::ID, command)?;
        raw.parse::<NoteId>().map_err(|_| {
            RolodexError::input(format!(
                "{} : id must be a positive whole number, got '{}'",
                command, raw
            ))
        })
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key.as_ref(), value.as_ref());
        }
        params
    }
}

pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every command the session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Help,
    Add,
    Change,
    Remove,
    Find,
    Show,
    All,
    Birthdays,
    AddNote,
    ChangeNote,
    RemoveNote,
    FindNotes,
    AddTag,
    RemoveTag,
    ShowNotes,
    Close,
    Exit,
}

impl Command {
    pub const ALL: [Command; 17] = [
        Command::Help,
        Command::Add,
        Command::Change,
        Command::Remove,
        Command::Find,
        Command::Show,
        Command::All,
        Command::Birthdays,
        Command::AddNote,
        Command::ChangeNote,
        Command::RemoveNote,
        Command::FindNotes,
        Command::AddTag,
        Command::RemoveTag,
        Command::ShowNotes,
        Command::Close,
        Command::Exit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Add => "add",
            Command::Change => "change",
            Command::Remove => "remove",
            Command::Find => "find",
            Command::Show => "show",
            Command::All => "all",
            Command::Birthdays => "birthdays",
            Command::AddNote => "add_note",
            Command::ChangeNote => "change_note",
            Command::RemoveNote => "remove_note",
            Command::FindNotes => "find_notes",
            Command::AddTag => "add_tag",
            Command::RemoveTag => "remove_tag",
            Command::ShowNotes => "show_notes",
            Command::Close => "close",
            Command::Exit => "exit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Help => "show this help",
            Command::Add => "add a contact, or add fields to an existing one",
            Command::Change => "change a phone, email, address or birthday",
            Command::Remove => "remove a contact, or one of its fields",
            Command::Find => "find contacts by name, phone, email, address or birthday",
            Command::Show => "show a contact's details",
            Command::All => "list all contacts",
            Command::Birthdays => "who to congratulate in the coming days",
            Command::AddNote => "add a note with optional comma-separated tags",
            Command::ChangeNote => "change a note's title or text",
            Command::RemoveNote => "remove a note",
            Command::FindNotes => "find notes by tags, title or text",
            Command::AddTag => "tag a note",
            Command::RemoveTag => "untag a note",
            Command::ShowNotes => "list notes",
            Command::Close | Command::Exit => "save and leave",
        }
    }

    /// Whether running this command can change stored data.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add
                | Command::Change
                | Command::Remove
                | Command::AddNote
                | Command::ChangeNote
                | Command::RemoveNote
                | Command::AddTag
                | Command::RemoveTag
        )
    }

    pub fn ends_session(&self) -> bool {
        matches!(self, Command::Close | Command::Exit)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = RolodexError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        match wanted.as_str() {
            "add_tags" => return Ok(Command::AddTag),
            "remove_tags" => return Ok(Command::RemoveTag),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| RolodexError::input(format!("Invalid command '{}'", s.trim())))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Structured output of a command, rendered by the front end.
#[derive(Debug, Default)]
pub struct CmdResult {
    /// Contacts to display.
    pub records: Vec<Record>,
    /// Notes to display.
    pub notes: Vec<Note>,
    /// Field/value rows (contact details, help).
    pub details: Vec<(String, String)>,
    pub birthdays: Vec<UpcomingBirthday>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_details(mut self, details: Vec<(String, String)>) -> Self {
        self.details = details;
        self
    }

    pub fn with_birthdays(mut self, birthdays: Vec<UpcomingBirthday>) -> Self {
        self.birthdays = birthdays;
        self
    }
}

/// Rows for the `help` command.
pub fn help() -> CmdResult {
    let details = Command::ALL
        .iter()
        .filter(|c| **c != Command::Exit)
        .map(|c| {
            let name = if *c == Command::Close {
                "close / exit".to_string()
            } else {
                c.as_str().to_string()
            };
            (name, c.description().to_string())
        })
        .collect();
    CmdResult::default().with_details(details)
}
