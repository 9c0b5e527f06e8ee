use proptest::prelude::*;
use proptest::sample::Index;

use editvox_core::{Cursor, LineLocator, TextDelta};

mod common;
use common::RichDoc;

// Strategy for inline box texts, including empty boxes and surrogate pairs
fn box_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z ]{1,8}",
        "[a-z\u{00E9}\u{4E00}-\u{4E0F}\u{1F600}-\u{1F60F} ]{1,6}",
    ]
}

fn document_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(box_text_strategy(), 1..4), 1..4)
}

fn build(lines: &[Vec<String>]) -> RichDoc {
    let refs: Vec<Vec<&str>> = lines
        .iter()
        .map(|line| line.iter().map(String::as_str).collect())
        .collect();
    let slices: Vec<&[&str]> = refs.iter().map(Vec::as_slice).collect();
    RichDoc::new(&slices)
}

fn cursor(doc: &RichDoc, lines: &[Vec<String>], line: Index, leaf: Index, offset: Index) -> Cursor<editvox_core::NodeId> {
    let line = line.index(lines.len());
    let leaf = leaf.index(lines[line].len());
    let len = lines[line][leaf].encode_utf16().count();
    Cursor::new(doc.at(line, leaf), offset.index(len + 1))
}

proptest! {
    #[test]
    fn point_line_is_collapsed_and_in_bounds(
        lines in document_strategy(),
        line in any::<Index>(),
        leaf in any::<Index>(),
        offset in any::<Index>(),
    ) {
        let doc = build(&lines);
        let at = cursor(&doc, &lines, line, leaf, offset);
        let locator = LineLocator::new(&doc.tree);

        let first = locator.point_line(at);
        let second = locator.point_line(at);
        prop_assert_eq!(&first, &second);

        let len = first.text().encode_utf16().count();
        prop_assert!(first.has_collapsed_selection());
        prop_assert_eq!(first.start_offset(), first.end_offset());
        prop_assert!(first.end_offset() <= len);
        prop_assert!(first.is_same_line(&first, &doc.tree));
        prop_assert!(first.is_same_line_and_selection(&second, &doc.tree));
        prop_assert!(first.is_valid_line(&doc.tree));
    }

    #[test]
    fn line_text_is_the_linked_boxes(
        lines in document_strategy(),
        line in any::<Index>(),
        leaf in any::<Index>(),
    ) {
        let doc = build(&lines);
        let line_index = line.index(lines.len());
        let at = Cursor::new(doc.at(line_index, leaf.index(lines[line_index].len())), 0);

        let built = LineLocator::new(&doc.tree).point_line(at);
        prop_assert_eq!(built.text(), lines[line_index].concat());
        prop_assert_eq!(built.segments().len(), lines[line_index].len());
    }

    #[test]
    fn selection_offsets_are_ordered(
        lines in document_strategy(),
        anchor in (any::<Index>(), any::<Index>(), any::<Index>()),
        focus in (any::<Index>(), any::<Index>(), any::<Index>()),
        base_on_start in any::<bool>(),
    ) {
        let doc = build(&lines);
        let anchor = cursor(&doc, &lines, anchor.0, anchor.1, anchor.2);
        let focus = cursor(&doc, &lines, focus.0, focus.1, focus.2);
        let locator = LineLocator::new(&doc.tree);

        let line = locator.compute_line(anchor, focus, base_on_start);
        let len = line.text().encode_utf16().count();
        prop_assert!(line.start_offset() <= line.end_offset());
        prop_assert!(line.end_offset() <= len);
        prop_assert_eq!(line.has_collapsed_selection(), anchor == focus);
        prop_assert_eq!(&line, &locator.compute_line(focus, anchor, base_on_start));
    }

    #[test]
    fn text_delta_reconstructs_new_value(
        old in "[ab\u{1F600} ]{0,12}",
        new in "[ab\u{1F600} ]{0,12}",
        old_caret in any::<Index>(),
        new_caret in any::<Index>(),
    ) {
        let old_units: Vec<u16> = old.encode_utf16().collect();
        let delta = TextDelta::between(
            &old,
            old_caret.index(old_units.len() + 1),
            &new,
            new_caret.index(new.encode_utf16().count() + 1),
        );

        let mut rebuilt: Vec<u16> = old_units[..delta.start].to_vec();
        rebuilt.extend(delta.inserted_text.encode_utf16());
        rebuilt.extend_from_slice(&old_units[delta.end()..]);
        prop_assert_eq!(String::from_utf16_lossy(&rebuilt), new);
    }
}
