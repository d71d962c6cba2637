use crate::book::AddressBook;
use crate::error::Result;
use crate::notebook::Notebook;

/// Abstract interface for persisting the two stores.
///
/// Loads return an empty store when nothing has been saved yet.
pub trait StorageBackend {
    fn load_book(&self) -> Result<AddressBook>;

    /// MUST replace the previous document atomically.
    fn save_book(&self, book: &AddressBook) -> Result<()>;

    fn load_notebook(&self) -> Result<Notebook>;

    fn save_notebook(&self, notebook: &Notebook) -> Result<()>;

    /// Human-readable location, for log lines and `config` output.
    fn location(&self) -> String;
}
