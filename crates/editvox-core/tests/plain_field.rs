mod common;

use common::{BrailleLog, Session, SpeechLog};
use editvox_core::{ArenaTree, Cursor, EditConfig, EventKind, NodeId, NodeRole, Selection};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn plain_field(value: &str, caret: usize) -> (ArenaTree, NodeId) {
    let mut tree = ArenaTree::new();
    let field = tree.add_root(NodeRole::TextField);
    tree.set_editable(field, true).unwrap();
    tree.set_text(field, value).unwrap();
    tree.set_caret(field, field, caret).unwrap();
    tree.set_focus(Some(field));
    (tree, field)
}

fn tracking(tree: &ArenaTree, field: NodeId) -> Session {
    let mut session = Session::new(EditConfig::default(), SpeechLog::default(), BrailleLog::default());
    assert_eq!(session.on_focusable_editable_found(tree, field), None);
    assert!(!session.is_rich());
    session
}

#[rstest]
#[case::next_char(0, 1, vec!["e"])]
#[case::previous_char(2, 1, vec!["e"])]
#[case::word(0, 6, vec!["hello "])]
#[case::end_of_text(18, 19, vec!["End of text"])]
#[case::next_line(3, 14, vec!["second"])]
#[case::blank_line(3, 12, vec!["Blank"])]
fn test_caret_movement(#[case] from: usize, #[case] to: usize, #[case] expected: Vec<&str>) {
    let value = "hello world\n\nsecond";
    let (mut tree, field) = plain_field(value, from);
    let mut session = tracking(&tree, field);

    tree.set_caret(field, field, to).unwrap();
    session.on_event(&tree, EventKind::SelectionChanged, field);
    assert_eq!(session.speech_mut().take(), expected);
}

#[rstest]
#[case::typed("hell", 4, "hello", (5, 5), vec!["o"])]
#[case::pasted("ab", 2, "ab cd", (5, 5), vec![" cd"])]
#[case::backspace("hello", 5, "hell", (4, 4), vec!["o"])]
#[case::delete_word("a test", 6, "a ", (2, 2), vec!["test, deleted"])]
#[case::autocomplete("", 0, "apple", (1, 5), vec!["a", "pple"])]
fn test_value_changes(
    #[case] before: &str,
    #[case] before_caret: usize,
    #[case] after: &str,
    #[case] after_selection: (usize, usize),
    #[case] expected: Vec<&str>,
) {
    let (mut tree, field) = plain_field(before, before_caret);
    let mut session = tracking(&tree, field);

    tree.set_text(field, after).unwrap();
    tree.set_selection(
        field,
        Selection::new(
            Cursor::new(field, after_selection.0),
            Cursor::new(field, after_selection.1),
        ),
    )
    .unwrap();
    session.on_event(&tree, EventKind::ValueChanged, field);
    assert_eq!(session.speech_mut().take(), expected);
}

#[test]
fn test_braille_shows_caret_line() {
    let (mut tree, field) = plain_field("one\ntwo\nthree", 0);
    let mut session = tracking(&tree, field);
    assert_eq!(session.braille().last().unwrap().text, "one\n");

    tree.set_caret(field, field, 6).unwrap();
    session.on_event(&tree, EventKind::SelectionChanged, field);
    let braille = session.braille().last().unwrap();
    assert_eq!(braille.text, "two\n");
    assert_eq!((braille.cursor_start, braille.cursor_end), (2, 2));
}

#[test]
fn test_rich_field_falls_back_when_disabled() {
    let mut tree = ArenaTree::new();
    let field = tree.add_root(NodeRole::TextField);
    tree.set_rich_editable(field, true).unwrap();
    let text = tree.append_child(field, NodeRole::StaticText).unwrap();
    let leaf = tree.append_text(text, NodeRole::InlineTextBox, "abc").unwrap();
    tree.set_caret(field, leaf, 0).unwrap();
    tree.set_focus(Some(field));

    let mut session = Session::new(
        EditConfig::default().with_rich_text(false),
        SpeechLog::default(),
        BrailleLog::default(),
    );
    session.on_focusable_editable_found(&tree, field);
    assert!(!session.is_rich());

    tree.set_caret(field, leaf, 1).unwrap();
    assert_eq!(session.on_event(&tree, EventKind::SelectionChanged, field), None);
    assert_eq!(session.speech_mut().take(), vec!["b"]);
}
