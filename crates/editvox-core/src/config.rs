//! Session options supplied by the host.

/// Feedback options for an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditConfig {
    /// Track rich editables with the line-based engine. When off, every field is handled as
    /// plain text.
    pub rich_text: bool,
    /// Speak style transitions ("Bold", "Not bold", ...). Transitions are always reported on
    /// [`Feedback::style_changes`](crate::Feedback::style_changes).
    pub verbose_styles: bool,
    /// Speak spelling and grammar marker transitions.
    pub announce_markers: bool,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            rich_text: true,
            verbose_styles: false,
            announce_markers: true,
        }
    }
}

impl EditConfig {
    /// Set [`EditConfig::rich_text`].
    pub fn with_rich_text(mut self, enabled: bool) -> Self {
        self.rich_text = enabled;
        self
    }

    /// Set [`EditConfig::verbose_styles`].
    pub fn with_verbose_styles(mut self, enabled: bool) -> Self {
        self.verbose_styles = enabled;
        self
    }

    /// Set [`EditConfig::announce_markers`].
    pub fn with_announce_markers(mut self, enabled: bool) -> Self {
        self.announce_markers = enabled;
        self
    }
}
