//! # API Facade
//!
//! [`RolodexApi`] is the single entry point for every rolodex operation,
//! whatever front end drives it. It owns the loaded [`AddressBook`] and
//! [`Notebook`], dispatches to the command layer, and decides when state is
//! written back through the [`StorageBackend`].
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation**: it returns [`CmdResult`] values, never strings to print
//!
//! ## Saving
//!
//! A command that reports success on a mutating operation marks the API
//! dirty. [`RolodexApi::save`] writes both stores unconditionally;
//! [`RolodexApi::save_if_due`] writes only when dirty and the
//! [`AutosaveGate`] interval has elapsed.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `RolodexApi<FsBackend>`
//! - Testing: `RolodexApi<MemBackend>`

use crate::book::AddressBook;
use crate::commands::{self, contacts, notes, CmdResult, Command, MessageLevel, Params};
use crate::error::Result;
use crate::notebook::Notebook;
use crate::store::{AutosaveGate, StorageBackend};
use std::time::Instant;

pub struct RolodexApi<B: StorageBackend> {
    backend: B,
    book: AddressBook,
    notebook: Notebook,
    autosave: AutosaveGate,
    birthday_days: u32,
    dirty: bool,
}

impl<B: StorageBackend> RolodexApi<B> {
    /// Loads both stores from the backend.
    pub fn load(backend: B, birthday_days: u32, autosave: AutosaveGate) -> Result<Self> {
        let book = backend.load_book()?;
        let notebook = backend.load_notebook()?;
        tracing::info!(
            location = %backend.location(),
            contacts = book.len(),
            notes = notebook.len(),
            "loaded rolodex"
        );
        Ok(Self {
            backend,
            book,
            notebook,
            autosave,
            birthday_days,
            dirty: false,
        })
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn birthday_days(&self) -> u32 {
        self.birthday_days
    }

    /// Unsaved changes exist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Runs any command by name. `close`/`exit` do nothing here; ending the
    /// session is up to the caller.
    pub fn execute(&mut self, command: Command, params: &Params) -> Result<CmdResult> {
        tracing::debug!(%command, fields = params.len(), "executing");
        match command {
            Command::Help => Ok(commands::help()),
            Command::Add => self.add_contact(params),
            Command::Change => self.change_contact(params),
            Command::Remove => self.remove_contact(params),
            Command::Find => self.find_contacts(params),
            Command::Show => self.show_contact(params),
            Command::All => Ok(self.all_contacts()),
            Command::Birthdays => self.birthdays(params),
            Command::AddNote => self.add_note(params),
            Command::ChangeNote => self.change_note(params),
            Command::RemoveNote => self.remove_note(params),
            Command::FindNotes => self.find_notes(params),
            Command::AddTag => self.add_tag(params),
            Command::RemoveTag => self.remove_tag(params),
            Command::ShowNotes => self.show_notes(params),
            Command::Close | Command::Exit => Ok(CmdResult::default()),
        }
    }

    pub fn add_contact(&mut self, params: &Params) -> Result<CmdResult> {
        let result = contacts::add(&mut self.book, params);
        self.track(result)
    }

    pub fn change_contact(&mut self, params: &Params) -> Result<CmdResult> {
        let result = contacts::change(&mut self.book, params);
        self.track(result)
    }

    pub fn remove_contact(&mut self, params: &Params) -> Result<CmdResult> {
        let result = contacts::remove(&mut self.book, params);
        self.track(result)
    }

    pub fn find_contacts(&self, params: &Params) -> Result<CmdResult> {
        contacts::find(&self.book, params)
    }

    pub fn show_contact(&self, params: &Params) -> Result<CmdResult> {
        contacts::show(&self.book, params)
    }

    pub fn all_contacts(&self) -> CmdResult {
        contacts::all(&self.book)
    }

    pub fn birthdays(&self, params: &Params) -> Result<CmdResult> {
        contacts::birthdays(&self.book, params, self.birthday_days)
    }

    pub fn add_note(&mut self, params: &Params) -> Result<CmdResult> {
        let result = notes::add_note(&mut self.notebook, params);
        self.track(result)
    }

    pub fn change_note(&mut self, params: &Params) -> Result<CmdResult> {
        let result = notes::change_note(&mut self.notebook, params);
        self.track(result)
    }

    pub fn remove_note(&mut self, params: &Params) -> Result<CmdResult> {
        let result = notes::remove_note(&mut self.notebook, params);
        self.track(result)
    }

    pub fn add_tag(&mut self, params: &Params) -> Result<CmdResult> {
        let result = notes::add_tag(&mut self.notebook, params);
        self.track(result)
    }

    pub fn remove_tag(&mut self, params: &Params) -> Result<CmdResult> {
        let result = notes::remove_tag(&mut self.notebook, params);
        self.track(result)
    }

    pub fn find_notes(&self, params: &Params) -> Result<CmdResult> {
        notes::find_notes(&self.notebook, params)
    }

    pub fn show_notes(&self, params: &Params) -> Result<CmdResult> {
        notes::show_notes(&self.notebook, params)
    }

    /// Writes both stores and clears the dirty flag.
    pub fn save(&mut self) -> Result<()> {
        self.save_at(Instant::now())
    }

    /// Saves when there are unsaved changes and the autosave interval has
    /// elapsed. Returns whether a save happened.
    pub fn save_if_due(&mut self, now: Instant) -> Result<bool> {
        if !self.dirty || !self.autosave.is_due(now) {
            return Ok(false);
        }
        tracing::debug!("autosave due");
        self.save_at(now)?;
        Ok(true)
    }

    fn save_at(&mut self, now: Instant) -> Result<()> {
        self.backend.save_book(&self.book)?;
        self.backend.save_notebook(&self.notebook)?;
        self.dirty = false;
        self.autosave.mark_saved(now);
        tracing::info!(location = %self.backend.location(), "saved rolodex");
        Ok(())
    }

    fn track(&mut self, result: Result<CmdResult>) -> Result<CmdResult> {
        if let Ok(res) = &result {
            if res.messages.iter().any(|m| m.level == MessageLevel::Success) {
                self.dirty = true;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::keys;
    use crate::error::RolodexError;
    use crate::store::MemBackend;
    use std::time::Duration;

    fn api() -> RolodexApi<MemBackend> {
        RolodexApi::load(MemBackend::new(), 7, AutosaveGate::from_secs(0)).unwrap()
    }

    fn contact(name: &str) -> Params {
        Params::new().with(keys::NAME, name).with(keys::PHONE, "1234567890")
    }

    #[test]
    fn test_execute_dispatches() {
        let mut api = api();
        api.execute(Command::Add, &contact("john")).unwrap();
        let all = api.execute(Command::All, &Params::new()).unwrap();
        assert_eq!(all.records.len(), 1);
        let help = api.execute(Command::Help, &Params::new()).unwrap();
        assert!(!help.details.is_empty());
    }

    #[test]
    fn test_mutations_mark_dirty() {
        let mut api = api();
        assert!(!api.is_dirty());

        api.find_contacts(&Params::new().with(keys::NAME, "%")).unwrap();
        assert!(!api.is_dirty());

        // Warning only: nothing changed
        api.remove_contact(&Params::new().with(keys::NAME, "nobody"))
            .unwrap();
        assert!(!api.is_dirty());

        api.add_contact(&contact("john")).unwrap();
        assert!(api.is_dirty());
        api.save().unwrap();
        assert!(!api.is_dirty());
    }

    #[test]
    fn test_failed_command_does_not_mark_dirty() {
        let mut api = api();
        let result = api.add_note(&Params::new().with(keys::TITLE, "no text"));
        assert!(matches!(result, Err(RolodexError::Input(_))));
        assert!(!api.is_dirty());
    }

    #[test]
    fn test_save_and_reload() {
        let mut api = api();
        api.add_contact(&contact("john")).unwrap();
        api.add_note(&Params::new().with(keys::TITLE, "t").with(keys::TEXT, "x"))
            .unwrap();
        api.save().unwrap();

        let RolodexApi { backend, .. } = api;
        let reloaded = RolodexApi::load(backend, 7, AutosaveGate::from_secs(0)).unwrap();
        assert!(reloaded.book().find("John").is_some());
        assert_eq!(reloaded.notebook().last_id(), 1);
    }

    #[test]
    fn test_save_if_due() {
        let start = Instant::now();
        let gate = AutosaveGate::new(Duration::from_secs(10), start);
        let mut api = RolodexApi::load(MemBackend::new(), 7, gate).unwrap();

        assert!(!api.save_if_due(start + Duration::from_secs(20)).unwrap());

        api.add_contact(&contact("john")).unwrap();
        assert!(!api.save_if_due(start + Duration::from_secs(5)).unwrap());
        assert!(api.backend().book_json().is_none());

        assert!(api.save_if_due(start + Duration::from_secs(11)).unwrap());
        assert!(api.backend().book_json().is_some());
        assert!(!api.is_dirty());
    }

    #[test]
    fn test_save_error_keeps_dirty() {
        let mut api = api();
        api.add_contact(&contact("john")).unwrap();
        api.backend().set_simulate_write_error(true);
        assert!(matches!(api.save(), Err(RolodexError::Store(_))));
        assert!(api.is_dirty());
    }

    #[test]
    fn test_birthdays_uses_configured_window() {
        let api = RolodexApi::load(MemBackend::new(), 3, AutosaveGate::from_secs(0)).unwrap();
        assert_eq!(api.birthday_days(), 3);
        let result = api.birthdays(&Params::new()).unwrap();
        assert!(result.birthdays.is_empty());
    }
}
