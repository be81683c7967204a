use super::*;
use crate::kernel::syntax::Construct;
use crate::kernel::text_object::TextObject;
use crate::models::Position;
use std::io::Write;

#[test]
fn test_id_sequence() {
    let mut ids = IdSequence::new();
    assert_eq!(ids.next_id(), BufferId::new(1));
    assert_eq!(ids.next_id(), BufferId::new(2));

    let mut ids = IdSequence::starting_at(40);
    assert_eq!(ids.next_id().get(), 40);
    assert_eq!(BufferId::new(3).to_string(), "buf#3");
}

#[test]
fn test_documents_get_distinct_ids() {
    let mut session = Session::default();
    let a = session.open_empty();
    let b = session.open_bytes(b"hello\n");

    assert_ne!(a.id(), b.id());
    assert_eq!(a.text(), "\n");
    assert_eq!(b.text(), "hello\n");
}

#[test]
fn test_config_is_shared_with_documents() {
    let config = BufferConfig {
        undo_limit: 3,
        ..BufferConfig::default()
    };
    let mut session = Session::new(config.clone());
    assert_eq!(session.config(), &config);
    assert_eq!(session.open_empty().history().undo_limit(), 3);
}

#[test]
fn test_open_path_attaches_parser_for_known_language() {
    let mut file = tempfile::Builder::new().suffix(".rs").tempfile().unwrap();
    file.write_all(b"fn main() {\n    run();\n}\n").unwrap();

    let mut session = Session::default();
    let doc = session.open_path(file.path()).unwrap();
    assert_eq!(doc.len_lines(), 3);

    let body = doc
        .inner(Position::new(4, 1), TextObject::Construct(Construct::Function))
        .unwrap();
    assert_eq!(body.start(), Position::new(11, 0));
    assert_eq!(body.end(), Position::new(10, 1));
}

#[test]
fn test_open_path_plain_text() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(b"fn main() {}\n").unwrap();

    let mut session = Session::default();
    let doc = session.open_path(file.path()).unwrap();
    assert!(doc
        .around(Position::new(0, 0), TextObject::Construct(Construct::Function))
        .is_none());
}

#[test]
fn test_open_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::default();
    let err = session.open_path(&dir.path().join("nope.rs")).unwrap_err();
    assert!(matches!(err, crate::error::Error::Io(_)));
}
