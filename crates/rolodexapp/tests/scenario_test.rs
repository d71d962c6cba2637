use chrono::NaiveDate;
use rolodexapp::api::RolodexApi;
use rolodexapp::book::{AddressBook, ContactField};
use rolodexapp::commands::{keys, Command, MessageLevel, Params};
use rolodexapp::error::RolodexError;
use rolodexapp::fields::Phone;
use rolodexapp::notebook::Notebook;
use rolodexapp::record::Record;
use rolodexapp::store::{AutosaveGate, MemBackend};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_change_phone_end_to_end() {
    let mut book = AddressBook::new();
    let mut record = Record::new("john doe").unwrap();
    record.add_phone("0123456789").unwrap();
    record.change_email("j@x.com").unwrap();
    book.add_record(record);

    let john = book.find_mut("john doe").unwrap();
    assert!(john.change_phone("0123456789", "9876543210").unwrap());
    assert_eq!(
        john.find_phone("9876543210").unwrap().map(Phone::as_str),
        Some("9876543210")
    );
    assert!(john.find_phone("0123456789").unwrap().is_none());
}

#[test]
fn test_same_phone_change_is_always_an_input_error() {
    let mut record = Record::new("john").unwrap();
    record.add_phone("0123456789").unwrap();
    assert!(matches!(
        record.change_phone("0123456789", "0123456789"),
        Err(RolodexError::Input(_))
    ));
    assert!(matches!(
        record.change_phone("5555555555", "5555555555"),
        Err(RolodexError::Input(_))
    ));
}

#[test]
fn test_names_differing_by_case_are_one_contact() {
    let mut book = AddressBook::new();
    book.add_record(Record::new("Jo").unwrap());
    book.add_record(Record::new("JO").unwrap());
    assert_eq!(book.len(), 1);
}

#[test]
fn test_wildcard_name_search() {
    let mut book = AddressBook::new();
    for name in ["Jon", "Jan", "Jaan", "amy"] {
        book.add_record(Record::new(name).unwrap());
    }
    let names = |records: Vec<&Record>| -> Vec<String> {
        let mut names: Vec<String> = records.iter().map(|r| r.name().to_string()).collect();
        names.sort();
        names
    };
    assert_eq!(
        names(book.find_records("j%", ContactField::Name).unwrap()),
        vec!["Jaan", "Jan", "Jon"]
    );
    assert_eq!(
        names(book.find_records("J_n", ContactField::Name).unwrap()),
        vec!["Jan", "Jon"]
    );
    assert!(matches!(
        book.find_records("31.02.2000", ContactField::Birthday),
        Err(RolodexError::Input(_))
    ));
}

#[test]
fn test_weekend_birthdays_move_to_monday() {
    let mut book = AddressBook::new();
    let mut sat = Record::new("saturday").unwrap();
    sat.change_birthday("08.06.1990").unwrap();
    let mut sun = Record::new("sunday").unwrap();
    sun.change_birthday("09.06.1991").unwrap();
    let mut leap = Record::new("leap").unwrap();
    leap.change_birthday("29.02.2000").unwrap();
    book.add_record(sat);
    book.add_record(sun);
    book.add_record(leap);

    // Wednesday 2024-06-05
    let upcoming = book.upcoming_birthdays_from(date(2024, 6, 5), 7);
    assert_eq!(upcoming.len(), 2);
    assert!(upcoming.iter().all(|u| u.date() == "10.06.2024"));

    // Non-leap year: Feb 29 maps to Mar 1 (Wednesday 2023-03-01)
    let upcoming = book.upcoming_birthdays_from(date(2023, 2, 27), 7);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].name, "Leap");
    assert_eq!(upcoming[0].date(), "01.03.2023");
}

#[test]
fn test_note_ids_and_empty_tag_search() {
    let mut notebook = Notebook::new();
    let ids: Vec<u64> = ["n1", "n2", "n3"]
        .iter()
        .map(|title| {
            let note = notebook.create_note(title, "text", ["tag"]);
            let id = note.id();
            notebook.add_note(note);
            id
        })
        .collect();
    notebook.remove_note(ids[1]);
    let n4 = notebook.create_note("n4", "text", ["tag"]);
    assert_eq!(n4.id(), 4);

    let no_tags: [&str; 0] = [];
    assert!(notebook.find_notes_by_tags(no_tags).is_empty());
}

#[test]
fn test_session_through_api() {
    let mut api = RolodexApi::load(MemBackend::new(), 7, AutosaveGate::from_secs(0)).unwrap();

    let added = api
        .execute(
            Command::Add,
            &Params::new()
                .with(keys::NAME, "john doe")
                .with(keys::PHONE, "0123456789")
                .with(keys::EMAIL, "j@x.com"),
        )
        .unwrap();
    assert_eq!(added.messages[0].content, "Contact John Doe added");

    api.execute(
        Command::Change,
        &Params::new()
            .with(keys::NAME, "John Doe")
            .with(keys::OLD_PHONE, "0123456789")
            .with(keys::NEW_PHONE, "9876543210"),
    )
    .unwrap();

    let found = api
        .execute(Command::Find, &Params::new().with(keys::PHONE, "987%"))
        .unwrap();
    assert_eq!(found.records.len(), 1);

    api.execute(
        Command::AddNote,
        &Params::new()
            .with(keys::TITLE, "call john")
            .with(keys::TEXT, "about the party")
            .with(keys::TAGS, "todo"),
    )
    .unwrap();
    let notes = api
        .execute(Command::FindNotes, &Params::new().with(keys::TAGS, "TODO"))
        .unwrap();
    assert_eq!(notes.notes.len(), 1);

    let error = api
        .execute(Command::RemoveNote, &Params::new().with(keys::ID, "first"))
        .unwrap_err();
    assert!(matches!(error, RolodexError::Input(_)));

    let missing = api
        .execute(Command::RemoveNote, &Params::new().with(keys::ID, "42"))
        .unwrap();
    assert_eq!(missing.messages[0].level, MessageLevel::Warning);

    api.save().unwrap();
    assert!(api.backend().book_json().unwrap().contains("9876543210"));
}
