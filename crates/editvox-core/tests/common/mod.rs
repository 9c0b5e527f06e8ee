#![allow(dead_code)]

use editvox_core::{
    ArenaTree, BrailleLine, BrailleOutput, EditConfig, EditingSession, NodeId, NodeRole,
    QueueMode, SpeechOutput, SpeechProperties,
};

/// Records everything spoken.
#[derive(Debug, Default)]
pub struct SpeechLog {
    pub utterances: Vec<(String, QueueMode, Option<SpeechProperties>)>,
}

impl SpeechLog {
    /// Texts spoken since the last call, in order.
    pub fn take(&mut self) -> Vec<String> {
        self.utterances.drain(..).map(|(text, _, _)| text).collect()
    }
}

impl SpeechOutput for SpeechLog {
    fn speak(&mut self, text: &str, queue_mode: QueueMode, properties: Option<&SpeechProperties>) {
        self.utterances
            .push((text.to_string(), queue_mode, properties.copied()));
    }
}

/// Records every braille line written.
#[derive(Debug, Default)]
pub struct BrailleLog {
    pub lines: Vec<BrailleLine>,
}

impl BrailleLog {
    pub fn last(&self) -> Option<&BrailleLine> {
        self.lines.last()
    }
}

impl BrailleOutput for BrailleLog {
    fn write_braille_line(&mut self, line: &BrailleLine) {
        self.lines.push(line.clone());
    }
}

pub type Session = EditingSession<NodeId, SpeechLog, BrailleLog>;

/// A focused rich field with one static text per visual line.
pub struct RichDoc {
    pub tree: ArenaTree,
    pub field: NodeId,
    /// Static text container of each line.
    pub lines: Vec<NodeId>,
    /// Inline text boxes of each line, linked on-line.
    pub boxes: Vec<Vec<NodeId>>,
}

impl RichDoc {
    /// Builds a document from lines of inline box texts.
    pub fn new(lines: &[&[&str]]) -> Self {
        let mut tree = ArenaTree::new();
        let field = tree.add_root(NodeRole::TextField);
        tree.set_rich_editable(field, true).unwrap();
        tree.set_focus(Some(field));

        let mut containers = Vec::new();
        let mut boxes = Vec::new();
        for line in lines {
            let container = tree.append_child(field, NodeRole::StaticText).unwrap();
            let line_boxes: Vec<NodeId> = line
                .iter()
                .map(|text| {
                    tree.append_text(container, NodeRole::InlineTextBox, text)
                        .unwrap()
                })
                .collect();
            tree.link_line(&line_boxes).unwrap();
            containers.push(container);
            boxes.push(line_boxes);
        }
        tree.set_caret(field, first_box(&boxes), 0).unwrap();

        Self {
            tree,
            field,
            lines: containers,
            boxes,
        }
    }

    /// Inline box `index` of line `line`.
    pub fn at(&self, line: usize, index: usize) -> NodeId {
        self.boxes[line][index]
    }

    pub fn caret(&mut self, node: NodeId, offset: usize) {
        self.tree.set_caret(self.field, node, offset).unwrap();
    }

    pub fn select(&mut self, anchor: (NodeId, usize), focus: (NodeId, usize)) {
        use editvox_core::{Cursor, Selection};
        self.tree
            .set_selection(
                self.field,
                Selection::new(Cursor::new(anchor.0, anchor.1), Cursor::new(focus.0, focus.1)),
            )
            .unwrap();
    }

    /// A session already tracking this document, with the initial event consumed.
    pub fn session(&self, config: EditConfig) -> Session {
        let mut session = Session::new(config, SpeechLog::default(), BrailleLog::default());
        session.on_focusable_editable_found(&self.tree, self.field);
        session
    }
}

fn first_box(boxes: &[Vec<NodeId>]) -> NodeId {
    boxes[0][0]
}
