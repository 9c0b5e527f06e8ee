//! Text style attributes and transition tracking.
//!
//! A [`TextStyle`] is what the host reports for a node. The [`StyleTracker`] remembers the last
//! value announced for each [`StyleAttribute`] during an edit session and reports only the
//! attributes that changed since the previous call, so moving the caret through a run of bold
//! text says "Bold" once when entering it and "Not bold" once when leaving it.

use std::collections::HashMap;
use std::fmt;

use crate::marker::{Marker, MarkerChange, MarkerKind};

/// A 32-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Build a color from components.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Build an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xff, r, g, b)
    }

    /// Alpha component.
    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red component.
    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green component.
    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue component.
    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Name of the closest entry in the named color table.
    pub fn name(self) -> &'static str {
        NAMED_COLORS
            .iter()
            .min_by_key(|(_, named)| self.distance(*named))
            .map(|(name, _)| *name)
            .unwrap_or("Black")
    }

    /// Opacity as a whole percentage.
    pub fn opacity_percent(self) -> u32 {
        (self.alpha() as u32 * 100 + 127) / 255
    }

    /// Spoken description, e.g. `"Red, 100% opacity."`.
    pub fn describe(self) -> String {
        format!("{}, {}% opacity.", self.name(), self.opacity_percent())
    }

    fn distance(self, other: Color) -> u32 {
        let d = |a: u8, b: u8| (a as i32 - b as i32).pow(2) as u32;
        d(self.red(), other.red()) + d(self.green(), other.green()) + d(self.blue(), other.blue())
    }
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("Black", Color::rgb(0x00, 0x00, 0x00)),
    ("White", Color::rgb(0xff, 0xff, 0xff)),
    ("Gray", Color::rgb(0x80, 0x80, 0x80)),
    ("Silver", Color::rgb(0xc0, 0xc0, 0xc0)),
    ("Dark gray", Color::rgb(0x40, 0x40, 0x40)),
    ("Red", Color::rgb(0xff, 0x00, 0x00)),
    ("Dark red", Color::rgb(0x8b, 0x00, 0x00)),
    ("Maroon", Color::rgb(0x80, 0x00, 0x00)),
    ("Orange", Color::rgb(0xff, 0xa5, 0x00)),
    ("Yellow", Color::rgb(0xff, 0xff, 0x00)),
    ("Olive", Color::rgb(0x80, 0x80, 0x00)),
    ("Lime", Color::rgb(0x00, 0xff, 0x00)),
    ("Green", Color::rgb(0x00, 0x80, 0x00)),
    ("Teal", Color::rgb(0x00, 0x80, 0x80)),
    ("Cyan", Color::rgb(0x00, 0xff, 0xff)),
    ("Light blue", Color::rgb(0xad, 0xd8, 0xe6)),
    ("Blue", Color::rgb(0x00, 0x00, 0xff)),
    ("Dark blue", Color::rgb(0x00, 0x00, 0x8b)),
    ("Navy", Color::rgb(0x00, 0x00, 0x80)),
    ("Purple", Color::rgb(0x80, 0x00, 0x80)),
    ("Magenta", Color::rgb(0xff, 0x00, 0xff)),
    ("Pink", Color::rgb(0xff, 0xc0, 0xcb)),
    ("Brown", Color::rgb(0xa5, 0x2a, 0x2a)),
    ("Beige", Color::rgb(0xf5, 0xf5, 0xdc)),
];

/// Formatting reported by the host for a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    /// Bold weight.
    pub bold: bool,
    /// Italic.
    pub italic: bool,
    /// Underline.
    pub underline: bool,
    /// Line through (strikethrough).
    pub line_through: bool,
    /// Part of a link.
    pub link: bool,
    /// Subscript position.
    pub subscript: bool,
    /// Superscript position.
    pub superscript: bool,
    /// Font size in points.
    pub font_size: Option<f32>,
    /// Font family name.
    pub font_family: Option<String>,
    /// Foreground color.
    pub color: Option<Color>,
}

impl TextStyle {
    /// Returns `true` if nothing is set.
    pub fn is_plain(&self) -> bool {
        *self == TextStyle::default()
    }

    /// The value of a single attribute.
    pub fn value(&self, attribute: StyleAttribute) -> StyleValue {
        match attribute {
            StyleAttribute::FontSize => self.font_size.map_or(StyleValue::Unset, StyleValue::Size),
            StyleAttribute::Color => self.color.map_or(StyleValue::Unset, StyleValue::Color),
            StyleAttribute::Link => StyleValue::Flag(self.link),
            StyleAttribute::Bold => StyleValue::Flag(self.bold),
            StyleAttribute::Italic => StyleValue::Flag(self.italic),
            StyleAttribute::Underline => StyleValue::Flag(self.underline),
            StyleAttribute::LineThrough => StyleValue::Flag(self.line_through),
            StyleAttribute::Subscript => StyleValue::Flag(self.subscript),
            StyleAttribute::Superscript => StyleValue::Flag(self.superscript),
            StyleAttribute::FontFamily => self
                .font_family
                .clone()
                .map_or(StyleValue::Unset, StyleValue::Family),
        }
    }
}

/// An independently tracked style attribute.
///
/// Declaration order is announcement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleAttribute {
    /// Font size.
    FontSize,
    /// Foreground color.
    Color,
    /// Link.
    Link,
    /// Bold.
    Bold,
    /// Italic.
    Italic,
    /// Underline.
    Underline,
    /// Line through.
    LineThrough,
    /// Subscript.
    Subscript,
    /// Superscript.
    Superscript,
    /// Font family.
    FontFamily,
}

impl StyleAttribute {
    /// All attributes in announcement order.
    pub const ALL: [StyleAttribute; 10] = [
        StyleAttribute::FontSize,
        StyleAttribute::Color,
        StyleAttribute::Link,
        StyleAttribute::Bold,
        StyleAttribute::Italic,
        StyleAttribute::Underline,
        StyleAttribute::LineThrough,
        StyleAttribute::Subscript,
        StyleAttribute::Superscript,
        StyleAttribute::FontFamily,
    ];

    fn initial_value(self) -> StyleValue {
        match self {
            StyleAttribute::FontSize | StyleAttribute::Color | StyleAttribute::FontFamily => {
                StyleValue::Unset
            }
            _ => StyleValue::Flag(false),
        }
    }

    fn flag_name(self) -> &'static str {
        match self {
            StyleAttribute::Link => "link",
            StyleAttribute::Bold => "bold",
            StyleAttribute::Italic => "italic",
            StyleAttribute::Underline => "underline",
            StyleAttribute::LineThrough => "line through",
            StyleAttribute::Subscript => "subscript",
            StyleAttribute::Superscript => "superscript",
            StyleAttribute::FontSize => "size",
            StyleAttribute::Color => "color",
            StyleAttribute::FontFamily => "font",
        }
    }
}

/// The value of one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Not reported by the host.
    Unset,
    /// Boolean attribute.
    Flag(bool),
    /// Font size in points.
    Size(f32),
    /// Font family.
    Family(String),
    /// Color.
    Color(Color),
}

/// A transition of one attribute to a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleChange {
    /// The attribute that changed.
    pub attribute: StyleAttribute,
    /// Its new value.
    pub value: StyleValue,
}

impl StyleChange {
    /// Spoken form of this change, or `None` when the attribute became unset.
    pub fn announcement(&self) -> Option<String> {
        match &self.value {
            StyleValue::Unset => None,
            StyleValue::Flag(true) => Some(capitalize(self.attribute.flag_name())),
            StyleValue::Flag(false) => Some(format!("Not {}", self.attribute.flag_name())),
            StyleValue::Size(size) => Some(format!("Size {}", FontSize(*size))),
            StyleValue::Family(family) => Some(format!("Font {}", family)),
            StyleValue::Color(color) => Some(color.describe()),
        }
    }
}

struct FontSize(f32);

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{:.1}", self.0)
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Last-announced style and marker state for one edit session.
#[derive(Debug, Clone, Default)]
pub struct StyleTracker {
    announced: HashMap<StyleAttribute, StyleValue>,
    active_markers: Vec<MarkerKind>,
}

impl StyleTracker {
    /// A tracker with nothing announced yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares `style` with the last announced values and records it.
    ///
    /// Returns exactly the attributes whose value differs, in announcement order. Attributes
    /// never announced compare against their initial value (`false` for flags, unset for
    /// scalars).
    pub fn diff(&mut self, style: &TextStyle) -> Vec<StyleChange> {
        let mut changes = Vec::new();
        for attribute in StyleAttribute::ALL {
            let value = style.value(attribute);
            let previous = self
                .announced
                .get(&attribute)
                .cloned()
                .unwrap_or_else(|| attribute.initial_value());
            if previous != value {
                self.announced.insert(attribute, value.clone());
                changes.push(StyleChange { attribute, value });
            }
        }
        changes
    }

    /// Compares the markers covering `start..end` (container-local UTF-16 offsets) with the
    /// markers active on the previous call.
    ///
    /// A collapsed range is covered by markers with `marker.start <= start < marker.end`.
    pub fn diff_markers(&mut self, markers: &[Marker], start: usize, end: usize) -> Vec<MarkerChange> {
        let mut active: Vec<MarkerKind> = markers
            .iter()
            .filter(|m| m.covers(start, end))
            .map(|m| m.kind)
            .collect();
        active.sort();
        active.dedup();

        let mut changes = Vec::new();
        for kind in &self.active_markers {
            if !active.contains(kind) {
                changes.push(MarkerChange {
                    kind: *kind,
                    entered: false,
                });
            }
        }
        for kind in &active {
            if !self.active_markers.contains(kind) {
                changes.push(MarkerChange {
                    kind: *kind,
                    entered: true,
                });
            }
        }
        self.active_markers = active;
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> TextStyle {
        TextStyle {
            bold: true,
            ..TextStyle::default()
        }
    }

    #[test]
    fn test_bold_on_then_off() {
        let mut tracker = StyleTracker::new();
        assert!(tracker.diff(&TextStyle::default()).is_empty());

        let on = tracker.diff(&bold());
        assert_eq!(on.len(), 1);
        assert_eq!(on[0].announcement().as_deref(), Some("Bold"));
        assert!(tracker.diff(&bold()).is_empty());

        let off = tracker.diff(&TextStyle::default());
        assert_eq!(off.len(), 1);
        assert_eq!(off[0].announcement().as_deref(), Some("Not bold"));
    }

    #[test]
    fn test_announcement_order() {
        let mut tracker = StyleTracker::new();
        let style = TextStyle {
            bold: true,
            font_size: Some(20.0),
            font_family: Some("Tinos".to_string()),
            color: Some(Color::rgb(0xff, 0, 0)),
            ..TextStyle::default()
        };
        let spoken: Vec<String> = tracker
            .diff(&style)
            .iter()
            .filter_map(StyleChange::announcement)
            .collect();
        assert_eq!(
            spoken,
            vec!["Size 20", "Red, 100% opacity.", "Bold", "Font Tinos"]
        );
    }

    #[test]
    fn test_unset_is_reported_without_announcement() {
        let mut tracker = StyleTracker::new();
        tracker.diff(&TextStyle {
            font_family: Some("Gelasio".to_string()),
            ..TextStyle::default()
        });
        let changes = tracker.diff(&TextStyle::default());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].attribute, StyleAttribute::FontFamily);
        assert_eq!(changes[0].announcement(), None);
    }

    #[test]
    fn test_color_names() {
        assert_eq!(Color::rgb(0, 0, 0xff).describe(), "Blue, 100% opacity.");
        assert_eq!(Color::rgb(0x10, 0x10, 0x10).describe(), "Black, 100% opacity.");
        assert_eq!(Color::from_argb(0x80, 0xff, 0, 0).describe(), "Red, 50% opacity.");
    }

    #[test]
    fn test_fractional_font_size() {
        let change = StyleChange {
            attribute: StyleAttribute::FontSize,
            value: StyleValue::Size(10.5),
        };
        assert_eq!(change.announcement().as_deref(), Some("Size 10.5"));
    }
}
