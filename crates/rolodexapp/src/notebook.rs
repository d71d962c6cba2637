//! The notebook: notes in insertion order, plus the id counter.
//!
//! Ids are handed out by [`Notebook::create_note`] and are never reused,
//! even after the note holding the highest id is removed. The counter is
//! saved with the notes; on load it is restored to at least the highest
//! stored id so reloaded and new notes can never collide.

use crate::error::{RolodexError, Result};
use crate::note::{normalize_tag, Note, NoteId};
use crate::pattern::WildcardPattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Note fields a text search can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    Title,
    Text,
}

impl FromStr for NoteField {
    type Err = RolodexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(NoteField::Title),
            "text" => Ok(NoteField::Text),
            other => Err(RolodexError::input(format!(
                "Unknown note field '{}' (expected title or text)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "NotebookData")]
pub struct Notebook {
    last_id: NoteId,
    notes: Vec<Note>,
}

#[derive(Deserialize)]
struct NotebookData {
    #[serde(default)]
    last_id: NoteId,
    #[serde(default)]
    notes: Vec<Note>,
}

impl From<NotebookData> for Notebook {
    fn from(data: NotebookData) -> Self {
        let max_id = data.notes.iter().map(Note::id).max().unwrap_or(0);
        Self {
            last_id: data.last_id.max(max_id),
            notes: data.notes,
        }
    }
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The most recently assigned id (0 before the first note).
    pub fn last_id(&self) -> NoteId {
        self.last_id
    }

    /// Builds a note with a fresh id. The note is not stored until passed to
    /// [`Notebook::add_note`], but the id is consumed either way.
    pub fn create_note<I, T>(&mut self, title: &str, text: &str, tags: I) -> Note
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.last_id += 1;
        Note::with_id(self.last_id, title, text, tags)
    }

    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Removes the note with this id and returns it.
    pub fn remove_note(&mut self, id: NoteId) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.id() == id)?;
        Some(self.notes.remove(index))
    }

    pub fn find_note_by_id(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == id)
    }

    pub fn find_note_by_id_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id() == id)
    }

    /// Notes sharing at least one tag with `tags`. An empty query matches nothing.
    pub fn find_notes_by_tags<I, T>(&self, tags: I) -> Vec<&Note>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let wanted: BTreeSet<String> = tags
            .into_iter()
            .filter_map(|t| normalize_tag(t.as_ref()))
            .collect();
        self.notes.iter().filter(|n| n.has_any_tag(&wanted)).collect()
    }

    /// Wildcard search over titles or texts.
    pub fn find_notes(&self, query: &str, field: NoteField) -> Result<Vec<&Note>> {
        let pattern = WildcardPattern::new(query)?;
        Ok(self
            .notes
            .iter()
            .filter(|n| match field {
                NoteField::Title => pattern.matches(n.title()),
                NoteField::Text => pattern.matches(n.text()),
            })
            .collect())
    }

    /// All notes ordered by id.
    pub fn notes(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.iter().collect();
        notes.sort();
        notes
    }
}

impl fmt::Display for Notebook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Notebook:")?;
        for note in &self.notes {
            writeln!(f, "{}", note)?;
        }
        Ok(())
    }
}
