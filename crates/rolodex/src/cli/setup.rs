use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rolodex",
    bin_name = "rolodex",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Contact book, birthday reminders and notes for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding addressbook.json and notebook.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Interactive session (the default)
    #[command(display_order = 1)]
    Session,

    /// List all contacts
    #[command(display_order = 2)]
    All,

    /// Who to congratulate in the coming days
    #[command(display_order = 3)]
    Birthdays {
        /// Look-ahead window in days (defaults to `birthday_days` from config)
        #[arg(long, short)]
        days: Option<u32>,
    },

    /// List notes
    #[command(display_order = 4)]
    Notes {
        /// Sort order
        #[arg(long, value_enum, default_value_t = NoteOrder::Id)]
        sort: NoteOrder,

        /// Only notes carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Show the effective configuration
    #[command(display_order = 5)]
    Config,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NoteOrder {
    Id,
    Title,
}

impl NoteOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteOrder::Id => "id",
            NoteOrder::Title => "title",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["rolodex"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(cli.data.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["rolodex", "all", "--data", "/tmp/x", "-v"]).unwrap();
        assert_eq!(cli.command, Some(Commands::All));
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x")));
        assert!(cli.verbose);
    }

    #[test]
    fn birthdays_days() {
        let cli = Cli::try_parse_from(["rolodex", "birthdays", "--days", "30"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Birthdays { days: Some(30) }));
        assert!(Cli::try_parse_from(["rolodex", "birthdays", "--days", "-1"]).is_err());
    }

    #[test]
    fn notes_defaults_and_options() {
        let cli = Cli::try_parse_from(["rolodex", "notes"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Notes {
                sort: NoteOrder::Id,
                tag: None
            })
        );

        let cli = Cli::try_parse_from(["rolodex", "notes", "--sort", "title", "--tag", "work"])
            .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Notes {
                sort: NoteOrder::Title,
                tag: Some("work".to_string())
            })
        );
        assert!(Cli::try_parse_from(["rolodex", "notes", "--sort", "date"]).is_err());
    }
}
