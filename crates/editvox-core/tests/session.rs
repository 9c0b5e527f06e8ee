mod common;

use common::{BrailleLog, RichDoc, Session, SpeechLog};
use editvox_core::{EditConfig, EventKind, Personality, QueueMode, Transition};
use pretty_assertions::assert_eq;

#[test]
fn test_events_for_other_nodes_are_ignored() {
    let mut doc = RichDoc::new(&[&["hello"], &["world"]]);
    let mut session = doc.session(EditConfig::default());

    doc.caret(doc.at(1, 0), 1);
    let other = doc.lines[1];
    assert_eq!(
        session.on_event(&doc.tree, EventKind::SelectionChanged, other),
        None
    );
    assert!(session.speech().utterances.is_empty());
}

#[test]
fn test_unfocused_editable_is_ignored() {
    let mut doc = RichDoc::new(&[&["hello"], &["world"]]);
    let mut session = doc.session(EditConfig::default());

    doc.tree.set_focus(None);
    doc.caret(doc.at(1, 0), 1);
    assert_eq!(
        session.on_event(&doc.tree, EventKind::SelectionChanged, doc.field),
        None
    );
    assert!(session.speech().utterances.is_empty());
}

#[test]
fn test_queue_modes() {
    let mut doc = RichDoc::new(&[&["one"], &["two"]]);
    let mut session = doc.session(EditConfig::default());

    doc.select((doc.at(0, 0), 0), (doc.at(1, 0), 3));
    session.on_event(&doc.tree, EventKind::SelectionChanged, doc.field);

    let modes: Vec<QueueMode> = session
        .speech()
        .utterances
        .iter()
        .map(|(_, mode, _)| *mode)
        .collect();
    assert_eq!(modes, vec![QueueMode::Flush, QueueMode::Queue]);
}

#[test]
fn test_stale_selection_produces_no_output() {
    let doc = RichDoc::new(&[&["hello"]]);
    let mut session = doc.session(EditConfig::default());
    let written = session.braille().lines.len();

    let mut tree = doc.tree.clone();
    let leaf = doc.at(0, 0);
    tree.remove(leaf).unwrap();
    assert_eq!(
        session.on_event(&tree, EventKind::TextChanged, doc.field),
        None
    );
    assert!(session.speech().utterances.is_empty());
    assert_eq!(session.braille().lines.len(), written);
}

#[test]
fn test_end_session_discards_state() {
    let mut doc = RichDoc::new(&[&["hello"], &["world"]]);
    let mut session = doc.session(EditConfig::default());
    session.end_session();
    assert_eq!(session.tracked_node(), None);

    doc.caret(doc.at(1, 0), 1);
    assert_eq!(
        session.on_event(&doc.tree, EventKind::SelectionChanged, doc.field),
        None
    );

    // Tracking again starts from scratch.
    assert_eq!(
        session.on_focusable_editable_found(&doc.tree, doc.field),
        Some(Transition::Initial)
    );
    assert!(session.speech().utterances.is_empty());
    assert_eq!(session.braille().last().unwrap().text, "world");
}

#[test]
fn test_focus_moves_to_another_field() {
    let mut doc = RichDoc::new(&[&["first field"]]);
    let mut session = doc.session(EditConfig::default());

    let other = doc.tree.add_root(editvox_core::NodeRole::TextField);
    doc.tree.set_rich_editable(other, true).unwrap();
    let text = doc
        .tree
        .append_child(other, editvox_core::NodeRole::StaticText)
        .unwrap();
    let leaf = doc
        .tree
        .append_text(text, editvox_core::NodeRole::InlineTextBox, "second field")
        .unwrap();
    doc.tree.set_caret(other, leaf, 0).unwrap();
    doc.tree.set_focus(Some(other));

    assert_eq!(
        session.on_event(&doc.tree, EventKind::FocusChanged, other),
        None
    );
    assert_eq!(
        session.on_focusable_editable_found(&doc.tree, other),
        Some(Transition::Initial)
    );
    assert_eq!(session.tracked_node(), Some(other));
    assert_eq!(session.braille().last().unwrap().text, "second field");
}

#[test]
fn test_fresh_session_has_nothing_tracked() {
    let session = Session::new(EditConfig::default(), SpeechLog::default(), BrailleLog::default());
    assert_eq!(session.tracked_node(), None);
    assert!(!session.is_rich());
    assert_eq!(session.config(), &EditConfig::default());
}

#[test]
fn test_field_without_selection_is_skipped() {
    let mut tree = editvox_core::ArenaTree::new();
    let field = tree.add_root(editvox_core::NodeRole::TextField);
    tree.set_rich_editable(field, true).unwrap();
    tree.append_text(field, editvox_core::NodeRole::StaticText, "text")
        .unwrap();
    tree.set_focus(Some(field));

    let mut session = Session::new(EditConfig::default(), SpeechLog::default(), BrailleLog::default());
    assert_eq!(session.on_focusable_editable_found(&tree, field), None);
    assert_eq!(session.tracked_node(), Some(field));
    assert!(session.braille().lines.is_empty());
}

#[test]
fn test_removing_last_static_text_is_a_deletion() {
    let mut doc = RichDoc::new(&[&["hello"]]);
    let leaf = doc.at(0, 0);
    doc.caret(leaf, 5);
    let mut session = doc.session(EditConfig::default());

    doc.tree.remove(doc.lines[0]).unwrap();
    doc.caret(doc.field, 0);

    assert_eq!(
        session.on_event(&doc.tree, EventKind::TextChanged, doc.field),
        Some(Transition::TextChanged)
    );
    let (text, mode, properties) = session.speech().utterances[0].clone();
    assert_eq!(text, "hello, deleted");
    assert_eq!(mode, QueueMode::Flush);
    assert_eq!(
        properties.map(|p| p.personality),
        Some(Personality::Deleted)
    );
    assert_eq!(session.speech().utterances.len(), 1);
    assert_eq!(session.braille().last().unwrap().text, "");
}
