use super::*;

fn lines(items: &[&str]) -> Vec<CompactString> {
    items.iter().map(|s| CompactString::from(*s)).collect()
}

fn store_of(items: &[&str]) -> TextStore {
    TextStore::from_text(&items.concat())
}

fn round_trip(old: &[&str], new: &[&str]) {
    let script = ChangeScript::diff(&lines(old), &lines(new)).unwrap();

    let mut store = store_of(new);
    script.apply_undo(&mut store);
    assert_eq!(store.get_stream(), old.concat(), "undo {old:?} <- {new:?}");

    script.apply_redo(&mut store);
    assert_eq!(store.get_stream(), new.concat(), "redo {old:?} -> {new:?}");
}

#[test]
fn test_identical_snapshots_give_empty_script() {
    let script = ChangeScript::diff(&lines(&["a\n", "b\n"]), &lines(&["a\n", "b\n"])).unwrap();
    assert!(script.is_empty());
}

#[test]
fn test_classifies_addition_deletion_replacement() {
    let script = ChangeScript::diff(
        &lines(&["a\n", "b\n", "c\n"]),
        &lines(&["a\n", "B\n", "c\n", "d\n"]),
    )
    .unwrap();

    let replaced: Vec<_> = script
        .changes()
        .iter()
        .filter(|c| c.old.is_some() && c.new.is_some())
        .collect();
    assert_eq!(replaced.len(), 1);
    assert_eq!(replaced[0].old.as_ref().unwrap().text, "b\n");
    assert_eq!(replaced[0].new.as_ref().unwrap().line, 1);

    let added: Vec<_> = script
        .changes()
        .iter()
        .filter(|c| c.old.is_none())
        .collect();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].new.as_ref().unwrap().line, 3);

    let script = ChangeScript::diff(&lines(&["a\n", "b\n"]), &lines(&["b\n"])).unwrap();
    assert_eq!(script.len(), 1);
    let removed = &script.changes()[0];
    assert!(removed.new.is_none());
    assert_eq!(removed.old.as_ref().unwrap().line, 0);
}

#[test]
fn test_undo_redo_restore_content() {
    round_trip(&["a\n", "b\n", "c\n"], &["a\n", "B\n", "c\n"]);
    round_trip(&["a\n"], &["a\n", "b\n", "c\n"]);
    round_trip(&["a\n", "b\n", "c\n"], &["c\n"]);
    round_trip(&["a\n", "b\n", "c\n", "d\n"], &["x\n", "b\n", "y\n", "z\n", "d\n", "e\n"]);
    round_trip(&["\n"], &["one\n", "two\n"]);
    round_trip(&["one\n", "two\n"], &["\n"]);
}

#[test]
fn test_unterminated_last_line_is_restored() {
    round_trip(&["a\n", "abc"], &["a\n", "x\n", "abc\n"]);
    round_trip(&["abc"], &["abc\n", "x\n"]);
    round_trip(&["abc"], &["\n"]);
}
