//! # Rendering
//!
//! Turns [`CmdResult`] values into terminal text. Every function returns a
//! `String`; printing is left to the caller so output can be tested.
//!
//! Column widths are measured with `unicode-width`, so names in any script
//! line up. Cells longer than [`MAX_CELL_WIDTH`] are truncated with `…`.

use colored::Colorize;
use rolodexapp::book::UpcomingBirthday;
use rolodexapp::commands::{CmdMessage, CmdResult, Command, MessageLevel};
use rolodexapp::note::Note;
use rolodexapp::record::Record;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const MAX_CELL_WIDTH: usize = 40;
pub const EMPTY_LIST: &str = "No items to display";
const COLUMN_GAP: &str = "  ";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn render_error(error: &impl std::fmt::Display) -> String {
    format!("{}\n", error.to_string().red().bold())
}

/// Renders everything a command produced. Listing commands print
/// "No items to display" when they have neither rows nor messages.
pub fn render_result(command: Command, result: &CmdResult) -> String {
    let mut out = String::new();
    if !result.details.is_empty() {
        out.push_str(&render_details(&result.details));
    }
    if !result.records.is_empty() && !command.mutates() {
        out.push_str(&render_records(&result.records));
    }
    if !result.notes.is_empty() && (!command.mutates() || command == Command::AddNote) {
        out.push_str(&render_notes(&result.notes));
    }
    if !result.birthdays.is_empty() {
        out.push_str(&render_birthdays(&result.birthdays));
    }
    out.push_str(&render_messages(&result.messages));

    if out.is_empty() && is_listing(command) {
        out.push_str(&format!("{}\n", EMPTY_LIST.blue().bold()));
    }
    out
}

fn is_listing(command: Command) -> bool {
    matches!(
        command,
        Command::All
            | Command::Find
            | Command::Show
            | Command::Birthdays
            | Command::FindNotes
            | Command::ShowNotes
    )
}

pub fn render_records(records: &[Record]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.name().to_string(),
                r.phones_display(),
                or_na(r.email().map(ToString::to_string)),
                or_na(r.address().map(ToString::to_string)),
                or_na(r.birthday().map(ToString::to_string)),
            ]
        })
        .collect();
    render_table(&["Name", "Phones", "Email", "Address", "Birthday"], &rows)
}

pub fn render_notes(notes: &[Note]) -> String {
    let rows: Vec<Vec<String>> = notes
        .iter()
        .map(|n| {
            vec![
                n.id().to_string(),
                n.title().to_string(),
                n.tags_display(),
                single_line(n.text()),
            ]
        })
        .collect();
    render_table(&["Id", "Title", "Tags", "Text"], &rows)
}

pub fn render_birthdays(birthdays: &[UpcomingBirthday]) -> String {
    let rows: Vec<Vec<String>> = birthdays
        .iter()
        .map(|b| vec![b.name.clone(), b.date()])
        .collect();
    render_table(&["Name", "Congratulate on"], &rows)
}

/// Two columns: field names right-aligned in blue, values in green.
pub fn render_details(details: &[(String, String)]) -> String {
    let key_width = details
        .iter()
        .map(|(k, _)| k.width().min(MAX_CELL_WIDTH))
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (key, value) in details {
        let key = truncate_to_width(key, MAX_CELL_WIDTH);
        let padding = " ".repeat(key_width.saturating_sub(key.width()));
        out.push_str(&format!(
            "{}{}{}{}\n",
            padding,
            key.blue(),
            COLUMN_GAP,
            value.green()
        ));
    }
    out
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| truncate_to_width(cell, MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut out = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{}", pad_to_width(h, *w).blue().bold()))
        .collect();
    out.push_str(header_line.join(COLUMN_GAP).trim_end());
    out.push('\n');

    let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * (widths.len() - 1);
    out.push_str(&format!("{}\n", "─".repeat(rule_width).dimmed()));

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad_to_width(cell, *w))
            .collect();
        out.push_str(line.join(COLUMN_GAP).trim_end());
        out.push('\n');
    }
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| "N/A".to_string())
}
