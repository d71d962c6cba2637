use crate::commands::{keys, CmdMessage, CmdResult, Command, Params};
use crate::error::{RolodexError, Result};
use crate::note::{Note, NoteId};
use crate::notebook::{NoteField, Notebook};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteSort {
    #[default]
    Id,
    Title,
}

impl std::str::FromStr for NoteSort {
    type Err = RolodexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(NoteSort::Id),
            "title" => Ok(NoteSort::Title),
            other => Err(RolodexError::input(format!(
                "Unknown sort order '{}' (expected id or title)",
                other
            ))),
        }
    }
}

pub fn add_note(notebook: &mut Notebook, params: &Params) -> Result<CmdResult> {
    let (Some(title), Some(text)) = (params.get(keys::TITLE), params.get(keys::TEXT)) else {
        return Err(RolodexError::input(format!(
            "{} : title or/and text of note was not provided",
            Command::AddNote
        )));
    };
    let note = notebook.create_note(title, text, params.list(keys::TAGS));
    notebook.add_note(note.clone());
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Note #{} added", note.id())))
        .with_notes(vec![note]))
}

pub fn change_note(notebook: &mut Notebook, params: &Params) -> Result<CmdResult> {
    let id = params.note_id(Command::ChangeNote)?;
    let title = params.get(keys::TITLE);
    let text = params.get(keys::TEXT);
    if title.is_none() && text.is_none() {
        return Err(RolodexError::input(format!(
            "{} : enter a new title or text",
            Command::ChangeNote
        )));
    }
    let Some(note) = notebook.find_note_by_id_mut(id) else {
        return Ok(not_found(id));
    };
    if let Some(title) = title {
        note.set_title(title);
    }
    if let Some(text) = text {
        note.set_text(text);
    }
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Note #{} changed", id)))
        .with_notes(vec![note.clone()]))
}

pub fn remove_note(notebook: &mut Notebook, params: &Params) -> Result<CmdResult> {
    let id = params.note_id(Command::RemoveNote)?;
    Ok(match notebook.remove_note(id) {
        Some(note) => CmdResult::default().with_message(CmdMessage::success(format!(
            "Note #{} removed: {}",
            id,
            note.title()
        ))),
        None => not_found(id),
    })
}

/// Adds each comma-separated tag in `tag` to a note.
pub fn add_tag(notebook: &mut Notebook, params: &Params) -> Result<CmdResult> {
    retag(notebook, params, Command::AddTag)
}

pub fn remove_tag(notebook: &mut Notebook, params: &Params) -> Result<CmdResult> {
    retag(notebook, params, Command::RemoveTag)
}

fn retag(notebook: &mut Notebook, params: &Params, command: Command) -> Result<CmdResult> {
    let id = params.note_id(command)?;
    let tags = params.list(keys::TAG);
    if tags.is_empty() {
        return Err(RolodexError::input(format!(
            "{} : {} was not provided",
            command,
            keys::TAG
        )));
    }
    let Some(note) = notebook.find_note_by_id_mut(id) else {
        return Ok(not_found(id));
    };

    let mut result = CmdResult::default();
    for tag in &tags {
        let applied = match command {
            Command::AddTag => note.add_tag(tag),
            _ => note.remove_tag(tag),
        };
        let message = match (command, applied) {
            (Command::AddTag, true) => CmdMessage::success(format!("Tag '{}' added to note #{}", tag, id)),
            (Command::AddTag, false) => {
                CmdMessage::warning(format!("Note #{} already has tag '{}'", id, tag))
            }
            (_, true) => CmdMessage::success(format!("Tag '{}' removed from note #{}", tag, id)),
            (_, false) => CmdMessage::warning(format!("Note #{} has no tag '{}'", id, tag)),
        };
        result.add_message(message);
    }
    Ok(result.with_notes(vec![note.clone()]))
}

/// Finds notes by `tags`, or by `filter` (title/text) with the same-named query.
/// Without `filter`, whichever of `title`/`text` is present is searched.
pub fn find_notes(notebook: &Notebook, params: &Params) -> Result<CmdResult> {
    let notes: Vec<Note> = if params.contains(keys::TAGS) {
        let mut found: Vec<Note> = notebook
            .find_notes_by_tags(params.list(keys::TAGS))
            .into_iter()
            .cloned()
            .collect();
        found.sort_by_key(Note::sort_key_by_title);
        found
    } else {
        let field = match params.get(keys::FILTER) {
            Some(filter) => filter.parse::<NoteField>()?,
            None => match (params.contains(keys::TITLE), params.contains(keys::TEXT)) {
                (true, false) => NoteField::Title,
                (false, true) => NoteField::Text,
                _ => {
                    return Err(RolodexError::input(format!(
                        "{} : search by tags, title or text",
                        Command::FindNotes
                    )))
                }
            },
        };
        let key = match field {
            NoteField::Title => keys::TITLE,
            NoteField::Text => keys::TEXT,
        };
        let query = params.require(key, Command::FindNotes)?;
        notebook
            .find_notes(query, field)?
            .into_iter()
            .cloned()
            .collect()
    };

    let mut result = CmdResult::default();
    if notes.is_empty() {
        result.add_message(CmdMessage::info("No notes found"));
    }
    Ok(result.with_notes(notes))
}

/// Every note, by id or title, optionally only those carrying `tag`.
pub fn show_notes(notebook: &Notebook, params: &Params) -> Result<CmdResult> {
    let sort = params
        .get(keys::SORT)
        .map(str::parse::<NoteSort>)
        .transpose()?
        .unwrap_or_default();
    let tag = params.list(keys::TAG);

    let mut notes: Vec<Note> = if tag.is_empty() {
        notebook.notes().into_iter().cloned().collect()
    } else {
        let mut tagged: Vec<Note> = notebook
            .find_notes_by_tags(tag)
            .into_iter()
            .cloned()
            .collect();
        tagged.sort();
        tagged
    };
    if sort == NoteSort::Title {
        notes.sort_by_key(Note::sort_key_by_title);
    }
    Ok(CmdResult::default().with_notes(notes))
}

fn not_found(id: NoteId) -> CmdResult {
    CmdResult::default().with_message(CmdMessage::warning(format!("Note #{} not found", id)))
}
