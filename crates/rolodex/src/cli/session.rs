//! # Interactive Session
//!
//! The loop reads a command name after `Enter command:`, then asks one
//! question per field the command takes. Answers go into a [`Params`] map;
//! blank answers are left out so the command sees only what was typed.
//!
//! Questions that pick a branch (`change` asks which property, `find` asks
//! which field) reject unknown answers with an input error and go back to
//! the command prompt.
//!
//! Errors from a command are printed and the loop continues. After every
//! command the API gets a chance to autosave. `close`, `exit` or end of input
//! saves and ends the session.

use super::render;
use rolodexapp::api::RolodexApi;
use rolodexapp::commands::{keys, Command, Params};
use rolodexapp::error::{Result, RolodexError};
use rolodexapp::store::StorageBackend;
use std::io::{self, BufRead, Write};
use std::time::Instant;

pub const COMMAND_PROMPT: &str = "Enter command:";
pub const GOODBYE: &str = "Good bye!";

/// Source of answers for the session.
pub trait Prompter {
    /// Shows `prompt` and reads one answer. `None` means input has ended.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Prompts on any writer, reads lines from any reader.
pub struct StdioPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdioPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for StdioPrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} ", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Answers gathered for one command. `Ended` means input ran out midway.
enum Gathered {
    Params(Params),
    Ended,
}

struct Questions<'a, P: Prompter> {
    prompter: &'a mut P,
    params: Params,
    ended: bool,
}

impl<'a, P: Prompter> Questions<'a, P> {
    fn new(prompter: &'a mut P) -> Self {
        Self {
            prompter,
            params: Params::new(),
            ended: false,
        }
    }

    /// Asks for `key` and records a non-blank answer.
    fn field(&mut self, prompt: &str, key: &str) -> io::Result<()> {
        if let Some(answer) = self.raw(prompt)? {
            self.params.insert(key, &answer);
        }
        Ok(())
    }

    /// Asks a branching question. Returns the trimmed, lower-cased answer.
    fn choice(&mut self, prompt: &str) -> io::Result<String> {
        Ok(self
            .raw(prompt)?
            .map(|a| a.trim().to_lowercase())
            .unwrap_or_default())
    }

    fn raw(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.ended {
            return Ok(None);
        }
        let answer = self.prompter.ask(prompt)?;
        if answer.is_none() {
            self.ended = true;
        }
        Ok(answer)
    }

    fn finish(self) -> Gathered {
        if self.ended {
            Gathered::Ended
        } else {
            Gathered::Params(self.params)
        }
    }
}

fn invalid_choice(answer: &str) -> anyhow::Error {
    RolodexError::input(format!("Invalid param '{}'", answer)).into()
}

/// Asks the questions `command` needs.
fn gather<P: Prompter>(command: Command, prompter: &mut P) -> anyhow::Result<Gathered> {
    let mut q = Questions::new(prompter);
    match command {
        Command::Add => {
            q.field("name:", keys::NAME)?;
            q.field("phones:", keys::PHONE)?;
            q.field("email:", keys::EMAIL)?;
            q.field("address:", keys::ADDRESS)?;
            q.field("birthday:", keys::BIRTHDAY)?;
        }
        Command::Change => {
            q.field("name:", keys::NAME)?;
            let property = q.choice("what property are you gonna change:")?;
            match property.as_str() {
                "phone" => {
                    q.field("old phone:", keys::OLD_PHONE)?;
                    q.field("new phone:", keys::NEW_PHONE)?;
                }
                "email" => q.field("email:", keys::EMAIL)?,
                "address" => q.field("address:", keys::ADDRESS)?,
                "birthday" => q.field("birthday:", keys::BIRTHDAY)?,
                _ if q.ended => {}
                other => return Err(invalid_choice(other)),
            }
        }
        Command::Remove => {
            q.field("name:", keys::NAME)?;
            let what = q.choice("what to remove (phone, email, address, birthday; blank for the whole contact):")?;
            match what.as_str() {
                "" => {}
                "phone" => {
                    q.params.insert(keys::FILTER, &what);
                    q.field("phone:", keys::PHONE)?;
                }
                "email" | "address" | "birthday" => q.params.insert(keys::FILTER, &what),
                other => return Err(invalid_choice(other)),
            }
        }
        Command::Find => {
            let criteria = q.choice("find criteria:")?;
            match criteria.as_str() {
                "name" | "phone" | "email" | "address" | "birthday" => {
                    q.params.insert(keys::FILTER, &criteria);
                    let prompt = format!("{}:", criteria);
                    q.field(&prompt, &criteria)?;
                }
                _ if q.ended => {}
                other => return Err(invalid_choice(other)),
            }
        }
        Command::Show => {
            let filter = q.choice("filter criteria (blank for all):")?;
            match filter.as_str() {
                "" => {}
                "phone" | "email" | "address" | "birthday" => {
                    q.params.insert(keys::FILTER, &filter)
                }
                other => return Err(invalid_choice(other)),
            }
            q.field("name:", keys::NAME)?;
        }
        Command::Birthdays => q.field("days:", keys::DAYS)?,
        Command::AddNote => {
            q.field("title:", keys::TITLE)?;
            q.field("text:", keys::TEXT)?;
            q.field("tags:", keys::TAGS)?;
        }
        Command::ChangeNote => {
            q.field("id:", keys::ID)?;
            q.field("title:", keys::TITLE)?;
            q.field("text:", keys::TEXT)?;
        }
        Command::RemoveNote => q.field("id:", keys::ID)?,
        Command::AddTag | Command::RemoveTag => {
            q.field("id:", keys::ID)?;
            q.field("tag:", keys::TAG)?;
        }
        Command::FindNotes => {
            let by = q.choice("find by (tags, title, text):")?;
            match by.as_str() {
                "tags" | "" => q.field("tags:", keys::TAGS)?,
                "title" => q.field("title:", keys::TITLE)?,
                "text" => q.field("text:", keys::TEXT)?,
                other => return Err(invalid_choice(other)),
            }
        }
        Command::ShowNotes => {
            q.field("sort by (id, title):", keys::SORT)?;
            q.field("tag:", keys::TAG)?;
        }
        Command::Help | Command::All | Command::Close | Command::Exit => {}
    }
    Ok(q.finish())
}

/// Runs the prompt loop until `close`/`exit` or end of input, then saves.
pub fn run_session<B, P, W>(api: &mut RolodexApi<B>, prompter: &mut P, out: &mut W) -> anyhow::Result<()>
where
    B: StorageBackend,
    P: Prompter,
    W: Write,
{
    writeln!(out, "Welcome to rolodex! Type 'help' to list commands.")?;
    loop {
        let Some(line) = prompter.ask(COMMAND_PROMPT)? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                write!(out, "{}", render::render_error(&e))?;
                continue;
            }
        };
        if command.ends_session() {
            break;
        }

        let params = match gather(command, prompter) {
            Ok(Gathered::Params(params)) => params,
            Ok(Gathered::Ended) => break,
            Err(e) => {
                write!(out, "{}", render::render_error(&e))?;
                continue;
            }
        };

        match api.execute(command, &params) {
            Ok(result) => write!(out, "{}", render::render_result(command, &result))?,
            Err(e) => {
                tracing::debug!(%command, error = %e, "command failed");
                write!(out, "{}", render::render_error(&e))?;
            }
        }

        autosave(api, out)?;
    }

    api.save()?;
    writeln!(out, "{}", GOODBYE)?;
    Ok(())
}

fn autosave<B: StorageBackend, W: Write>(api: &mut RolodexApi<B>, out: &mut W) -> io::Result<()> {
    let saved: Result<bool> = api.save_if_due(Instant::now());
    if let Err(e) = saved {
        tracing::warn!(error = %e, "autosave failed");
        write!(out, "{}", render::render_error(&e))?;
    }
    Ok(())
}
