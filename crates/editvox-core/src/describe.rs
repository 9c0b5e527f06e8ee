//! Plain-text change description.
//!
//! [`EditableTextState`] holds the last seen value and selection of a piece of text (a whole
//! plain field, or the current line of a rich field) and turns the next value/selection into
//! speech: characters crossed by the caret, lines reached, text selected or unselected,
//! characters typed or deleted.

use unicode_segmentation::UnicodeSegmentation;

use crate::delta::TextDelta;
use crate::line_index::LineIndex;
use crate::output::{BrailleLine, Feedback, Message};
use crate::text::{grapheme_at, is_whitespace_only, utf16_len, utf16_slice, utf16_suffix};

/// A new value and selection reported for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChangeEvent {
    /// Full text value.
    pub value: String,
    /// Selection start (UTF-16).
    pub start: usize,
    /// Selection end (UTF-16), `>= start`.
    pub end: usize,
}

impl TextChangeEvent {
    /// Create an event. The offsets are ordered and clamped to `value`.
    pub fn new(value: impl Into<String>, start: usize, end: usize) -> Self {
        let value = value.into();
        let len = utf16_len(&value);
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            value,
            start: start.min(len),
            end: end.min(len),
        }
    }
}

/// Last described value and selection.
#[derive(Debug, Clone, Default)]
pub struct EditableTextState {
    value: String,
    start: usize,
    end: usize,
    lines: LineIndex,
}

impl EditableTextState {
    /// State seeded from an event, without describing it.
    pub fn new(event: TextChangeEvent) -> Self {
        let lines = LineIndex::from_text(&event.value);
        Self {
            value: event.value,
            start: event.start,
            end: event.end,
            lines,
        }
    }

    /// Current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current selection start.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Current selection end.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Line index over the current value.
    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Describes `event` relative to the current state, then adopts it.
    pub fn changed(&mut self, event: TextChangeEvent, feedback: &mut Feedback) {
        if event.value != self.value {
            self.describe_text_changed(&event, feedback);
        } else if event.start != self.start || event.end != self.end {
            self.describe_selection_changed(&event, feedback);
        }
        self.sync(event);
    }

    /// Adopts `event` without describing it.
    pub fn sync(&mut self, event: TextChangeEvent) {
        self.lines.update(&event.value);
        self.value = event.value;
        self.start = event.start;
        self.end = event.end;
    }

    /// Describes a selection change on an unchanged value.
    pub fn describe_selection_changed(&self, event: &TextChangeEvent, feedback: &mut Feedback) {
        let value = event.value.as_str();
        if event.start == event.end {
            if self.start != self.end {
                feedback.say(Message::Unselected);
                return;
            }
            let line = self.lines.line_index(event.start);
            if line != self.lines.line_index(self.start) {
                let text = self.lines.line_text(line);
                if text.is_empty() {
                    feedback.say(Message::Blank);
                } else if is_whitespace_only(&text) {
                    feedback.say(Message::Whitespace);
                } else {
                    feedback.speak(text);
                }
                return;
            }
            let crossed = utf16_slice(value, self.start.min(event.start), self.start.max(event.start));
            if crossed.graphemes(true).count() == 1 {
                if event.start >= utf16_len(value) {
                    feedback.say(Message::EndOfText);
                } else {
                    feedback.speak(grapheme_at(value, event.start));
                }
            } else if !crossed.is_empty() {
                feedback.speak(crossed);
            }
            return;
        }

        if self.start == self.end {
            feedback.speak(utf16_slice(value, event.start, event.end));
            feedback.say(Message::Selected);
        } else if self.start == event.start && event.end > self.end {
            feedback.speak(utf16_slice(value, self.end, event.end));
            feedback.say(Message::Selected);
        } else if self.start == event.start && event.end < self.end {
            feedback.speak(utf16_slice(value, event.end, self.end));
            feedback.say(Message::Unselected);
        } else if self.end == event.end && event.start < self.start {
            feedback.speak(utf16_slice(value, event.start, self.start));
            feedback.say(Message::Selected);
        } else if self.end == event.end && event.start > self.start {
            feedback.speak(utf16_slice(value, self.start, event.start));
            feedback.say(Message::Unselected);
        } else {
            feedback.speak(utf16_slice(value, event.start, event.end));
            feedback.say(Message::Selected);
        }
    }

    /// Describes a value change.
    pub fn describe_text_changed(&self, event: &TextChangeEvent, feedback: &mut Feedback) {
        if self.is_autocomplete(event) {
            feedback.speak(utf16_slice(&event.value, self.start, event.start));
            feedback.speak(utf16_suffix(&event.value, event.start));
            return;
        }

        let delta = TextDelta::between(&self.value, self.start, &event.value, event.start);
        if !delta.inserted_text.is_empty() {
            feedback.speak(delta.inserted_text);
        } else if delta.deleted_text.graphemes(true).count() > 1 {
            feedback.say(Message::Deleted(delta.deleted_text));
        } else if !delta.deleted_text.is_empty() {
            feedback.speak(delta.deleted_text);
        }
    }

    /// Braille content: the line holding the selection start, including its line break.
    pub fn braille_line(&self) -> BrailleLine {
        let line = self.lines.line_index(self.start);
        let line_start = self.lines.line_start(line);
        let text = self.lines.line_text_with_break(line);
        let len = utf16_len(&text);
        BrailleLine {
            text,
            spans: Vec::new(),
            cursor_start: self.start.saturating_sub(line_start).min(len),
            cursor_end: self.end.saturating_sub(line_start).min(len),
        }
    }

    /// One typed character followed by a completion the host selected to the end of the
    /// value.
    fn is_autocomplete(&self, event: &TextChangeEvent) -> bool {
        self.start == self.end
            && event.start < event.end
            && event.end == utf16_len(&event.value)
            && event.start > self.start
            && utf16_slice(&event.value, self.start, event.start).graphemes(true).count() == 1
            && utf16_slice(&event.value, 0, self.start) == utf16_slice(&self.value, 0, self.start)
    }
}
