use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use editvox_core::{
    ArenaTree, Cursor, EditConfig, LineLocator, NodeId, NodeRole, SelectionDiffEngine,
    TextChangeEvent, EditableTextState, Feedback,
};

/// A rich field of `line_count` static texts, each holding `boxes` linked inline boxes.
fn large_document(line_count: usize, boxes: usize) -> (ArenaTree, NodeId, Vec<Vec<NodeId>>) {
    let mut tree = ArenaTree::new();
    let field = tree.add_root(NodeRole::TextField);
    tree.set_rich_editable(field, true).unwrap();
    tree.set_focus(Some(field));

    let mut lines = Vec::with_capacity(line_count);
    for i in 0..line_count {
        let text = tree.append_child(field, NodeRole::StaticText).unwrap();
        let line: Vec<NodeId> = (0..boxes)
            .map(|j| {
                tree.append_text(
                    text,
                    NodeRole::InlineTextBox,
                    &format!("{i:05}-{j:02} the quick brown fox "),
                )
                .unwrap()
            })
            .collect();
        tree.link_line(&line).unwrap();
        lines.push(line);
    }
    tree.set_caret(field, lines[0][0], 0).unwrap();
    (tree, field, lines)
}

fn bench_compute_line(c: &mut Criterion) {
    let (tree, _, lines) = large_document(1_000, 16);
    let middle = lines[500][8];
    c.bench_function("compute_line/16_boxes", |b| {
        b.iter(|| {
            let locator = LineLocator::new(&tree);
            let line = locator.point_line(Cursor::new(black_box(middle), 3));
            black_box(line.text().len());
        })
    });
}

fn bench_caret_walk(c: &mut Criterion) {
    let (tree, field, lines) = large_document(200, 8);
    c.bench_function("engine/caret_walk_100_events", |b| {
        b.iter_batched(
            || (tree.clone(), SelectionDiffEngine::new(field, EditConfig::default())),
            |(mut tree, mut engine)| {
                engine.process(&tree, false).unwrap();
                for step in 0..100 {
                    let leaf = lines[step % lines.len()][step % 8];
                    tree.set_caret(field, leaf, step % 5).unwrap();
                    black_box(engine.process(&tree, false).unwrap());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_plain_typing(c: &mut Criterion) {
    let base = "lorem ipsum dolor sit amet\n".repeat(2_000);
    c.bench_function("plain/typing_100_chars", |b| {
        b.iter_batched(
            || EditableTextState::new(TextChangeEvent::new(base.clone(), 0, 0)),
            |mut state| {
                let mut value = base.clone();
                for i in 0..100 {
                    value.insert(i, 'x');
                    let mut feedback = Feedback::default();
                    state.changed(TextChangeEvent::new(value.clone(), i + 1, i + 1), &mut feedback);
                    black_box(feedback);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_compute_line, bench_caret_walk, bench_plain_typing);
criterion_main!(benches);
