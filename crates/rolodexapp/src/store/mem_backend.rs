use super::backend::StorageBackend;
use crate::book::AddressBook;
use crate::error::{RolodexError, Result};
use crate::notebook::Notebook;
use std::cell::RefCell;

/// In-memory storage backend for testing.
///
/// Keeps the serialized JSON documents, so a save/load cycle goes through
/// the same serde path as the file backend. Uses `RefCell` since rolodex is
/// single-threaded.
#[derive(Default)]
pub struct MemBackend {
    book: RefCell<Option<String>>,
    notebook: RefCell<Option<String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Raw saved address book document, if any.
    pub fn book_json(&self) -> Option<String> {
        self.book.borrow().clone()
    }

    pub fn notebook_json(&self) -> Option<String> {
        self.notebook.borrow().clone()
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RolodexError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_book(&self) -> Result<AddressBook> {
        match self.book.borrow().as_deref() {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(AddressBook::new()),
        }
    }

    fn save_book(&self, book: &AddressBook) -> Result<()> {
        self.check_writable()?;
        *self.book.borrow_mut() = Some(serde_json::to_string(book)?);
        Ok(())
    }

    fn load_notebook(&self) -> Result<Notebook> {
        match self.notebook.borrow().as_deref() {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Notebook::new()),
        }
    }

    fn save_notebook(&self, notebook: &Notebook) -> Result<()> {
        self.check_writable()?;
        *self.notebook.borrow_mut() = Some(serde_json::to_string(notebook)?);
        Ok(())
    }

    fn location(&self) -> String {
        "memory://rolodex".to_string()
    }
}
