use crate::fields::validation::capitalize_first;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

pub type NoteId = u64;

/// A titled text note with a set of lower-cased tags.
///
/// Notes are created by [`crate::notebook::Notebook::create_note`], which
/// hands out ids. Two notes compare by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    id: NoteId,
    title: String,
    text: String,
    #[serde(default)]
    tags: BTreeSet<String>,
}

pub(crate) fn normalize_tag(tag: &str) -> Option<String> {
    let tag = tag.trim().to_lowercase();
    (!tag.is_empty()).then_some(tag)
}

impl Note {
    pub(crate) fn with_id<I, T>(id: NoteId, title: &str, text: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            id,
            title: capitalize_first(title),
            text: capitalize_first(text),
            tags: tags
                .into_iter()
                .filter_map(|t| normalize_tag(t.as_ref()))
                .collect(),
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = capitalize_first(title);
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = capitalize_first(text);
    }

    /// Adds a tag. Returns `false` if it was already there (or blank).
    pub fn add_tag(&mut self, tag: &str) -> bool {
        match normalize_tag(tag) {
            Some(tag) => self.tags.insert(tag),
            None => false,
        }
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        match normalize_tag(tag) {
            Some(tag) => self.tags.remove(&tag),
            None => false,
        }
    }

    pub fn has_any_tag(&self, tags: &BTreeSet<String>) -> bool {
        !self.tags.is_disjoint(tags)
    }

    /// Key for alphabetical listings.
    pub fn sort_key_by_title(&self) -> String {
        self.title.to_lowercase()
    }

    pub fn tags_display(&self) -> String {
        self.tags.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Note {}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Note {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}:{}\ntags:[{}]\n{}",
            self.id,
            self.title,
            self.tags_display(),
            self.text
        )
    }
}
