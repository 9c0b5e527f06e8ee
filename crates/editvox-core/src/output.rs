//! Feedback data model and renderer interfaces.
//!
//! Every processed event produces a [`Feedback`] value: an ordered list of [`Utterance`]s for
//! speech and, usually, a [`BrailleLine`]. The engine never talks to a speech or braille device
//! directly; hosts implement [`SpeechOutput`] and [`BrailleOutput`] and the session delivers
//! feedback to them once an event has been processed successfully.

use std::fmt;

use crate::marker::MarkerChange;
use crate::style::{StyleChange, TextStyle};

/// How an utterance interacts with speech that is already queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    /// Interrupt current speech and speak now.
    Flush,
    /// Speak after the current utterance.
    Queue,
}

/// Voice variation requested for an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Personality {
    /// Text that was just removed from the document.
    Deleted,
    /// Supplementary information (style and marker announcements).
    Annotation,
}

/// Optional attributes attached to an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechProperties {
    /// Requested voice variation.
    pub personality: Personality,
}

impl SpeechProperties {
    /// Properties with the given personality.
    pub fn new(personality: Personality) -> Self {
        Self { personality }
    }
}

/// A single piece of text to speak.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak.
    pub text: String,
    /// Queueing behavior.
    pub queue_mode: QueueMode,
    /// Optional speech attributes.
    pub properties: Option<SpeechProperties>,
}

/// A styled range of a braille line, in UTF-16 offsets of [`BrailleLine::text`].
#[derive(Debug, Clone, PartialEq)]
pub struct StyledSpan {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
    /// Style of the covered text.
    pub style: TextStyle,
}

/// The content written to a refreshable braille display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrailleLine {
    /// Line text.
    pub text: String,
    /// Non-default styles present on the line.
    pub spans: Vec<StyledSpan>,
    /// Selection start (UTF-16 offset into `text`).
    pub cursor_start: usize,
    /// Selection end (UTF-16 offset into `text`), `>= cursor_start`.
    pub cursor_end: usize,
}

/// Fixed messages spoken by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Text became part of the selection.
    Selected,
    /// Text left the selection.
    Unselected,
    /// Deleted text, e.g. `"test, deleted"`.
    Deleted(String),
    /// The caret reached the end of the field.
    EndOfText,
    /// An empty line.
    Blank,
    /// A line made only of whitespace.
    Whitespace,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Selected => write!(f, "selected"),
            Message::Unselected => write!(f, "unselected"),
            Message::Deleted(text) => write!(f, "{}, deleted", text),
            Message::EndOfText => write!(f, "End of text"),
            Message::Blank => write!(f, "Blank"),
            Message::Whitespace => write!(f, "Whitespace"),
        }
    }
}

/// Speech renderer interface.
pub trait SpeechOutput {
    /// Speak `text`.
    fn speak(&mut self, text: &str, queue_mode: QueueMode, properties: Option<&SpeechProperties>);
}

/// Braille renderer interface.
pub trait BrailleOutput {
    /// Replace the braille display content.
    fn write_braille_line(&mut self, line: &BrailleLine);
}

/// Everything produced by one processed event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feedback {
    /// Utterances in speaking order.
    pub utterances: Vec<Utterance>,
    /// New braille content, if the display should be refreshed.
    pub braille: Option<BrailleLine>,
    /// Style attribute transitions observed at the selection.
    pub style_changes: Vec<StyleChange>,
    /// Marker transitions observed at the selection.
    pub marker_changes: Vec<MarkerChange>,
}

impl Feedback {
    /// Returns `true` if nothing would reach a renderer.
    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty() && self.braille.is_none()
    }

    /// Appends an utterance. The first utterance of an event flushes, later ones queue.
    pub fn speak(&mut self, text: impl Into<String>) {
        self.push(text.into(), None);
    }

    /// Appends an utterance with speech properties.
    pub fn speak_with(&mut self, text: impl Into<String>, personality: Personality) {
        self.push(text.into(), Some(SpeechProperties::new(personality)));
    }

    /// Appends a fixed message.
    pub fn say(&mut self, message: Message) {
        match &message {
            Message::Deleted(_) => self.speak_with(message.to_string(), Personality::Deleted),
            _ => self.speak(message.to_string()),
        }
    }

    /// Texts of all utterances, in order.
    pub fn spoken(&self) -> Vec<&str> {
        self.utterances.iter().map(|u| u.text.as_str()).collect()
    }

    /// Sends this feedback to the renderers.
    pub fn deliver(&self, speech: &mut dyn SpeechOutput, braille: &mut dyn BrailleOutput) {
        for utterance in &self.utterances {
            speech.speak(
                &utterance.text,
                utterance.queue_mode,
                utterance.properties.as_ref(),
            );
        }
        if let Some(line) = &self.braille {
            braille.write_braille_line(line);
        }
    }

    fn push(&mut self, text: String, properties: Option<SpeechProperties>) {
        let queue_mode = if self.utterances.is_empty() {
            QueueMode::Flush
        } else {
            QueueMode::Queue
        };
        self.utterances.push(Utterance {
            text,
            queue_mode,
            properties,
        });
    }
}
