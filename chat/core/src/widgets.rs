//! Widget State
//!
//! State behind the three interactive pieces of the screen: the bot list,
//! the message input and the spinners. Drawing them is left to the surface;
//! this module only decides how keys move selections, edit text and advance
//! animations.

use crate::events::Key;
use crate::gateway::{BotId, BotSummary};

/// Rows skipped by PageUp/PageDown in the bot list
const PAGE_SIZE: usize = 10;

// ============================================================================
// Bot List
// ============================================================================

/// Navigable list of bot summaries with a name filter
///
/// `/` starts filtering: typed characters narrow the rows to bots whose
/// name contains the filter, ignoring case. Backspace on an empty filter or
/// Ctrl+U ends it. Selection always refers to the visible rows.
#[derive(Clone, Debug, Default)]
pub struct BotList {
    items: Vec<BotSummary>,
    /// Indices into `items` that pass the filter, in gateway order
    visible: Vec<usize>,
    /// Position within `visible`
    selected: usize,
    filter: Option<String>,
}

impl BotList {
    /// Create an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the items, keeping gateway order, and select the first one
    ///
    /// Any active filter is dropped.
    pub fn set_items(&mut self, items: Vec<BotSummary>) {
        self.items = items;
        self.filter = None;
        self.refresh();
    }

    /// All items in gateway order
    #[must_use]
    pub fn items(&self) -> &[BotSummary] {
        &self.items
    }

    /// Items passing the filter, in display order
    pub fn visible_items(&self) -> impl Iterator<Item = &BotSummary> + '_ {
        self.visible.iter().filter_map(|&i| self.items.get(i))
    }

    /// Current filter text while filtering
    #[must_use]
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Whether typed characters go to the filter
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        self.filter.is_some()
    }

    /// Visible row of the highlighted item, if any
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        (!self.visible.is_empty()).then_some(self.selected)
    }

    /// The highlighted item, if any
    #[must_use]
    pub fn selected(&self) -> Option<&BotSummary> {
        self.visible
            .get(self.selected)
            .and_then(|&i| self.items.get(i))
    }

    /// Identifier of the highlighted item, if any
    #[must_use]
    pub fn selected_id(&self) -> Option<BotId> {
        self.selected().map(|bot| bot.id)
    }

    /// Number of visible items
    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Whether no item is visible
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Apply a navigation or filter key; returns whether the key was used
    pub fn handle_key(&mut self, key: Key) -> bool {
        if let Some(filter) = self.filter.as_mut() {
            match key {
                Key::Char(c) => filter.push(c),
                Key::Backspace => {
                    if filter.pop().is_none() {
                        self.filter = None;
                    }
                }
                Key::Ctrl('u') => self.filter = None,
                _ => return self.navigate(key),
            }
            self.refresh();
            return true;
        }

        if key == Key::Char('/') && !self.items.is_empty() {
            self.filter = Some(String::new());
            return true;
        }
        self.navigate(key)
    }

    fn navigate(&mut self, key: Key) -> bool {
        let Some(last) = self.visible.len().checked_sub(1) else {
            return false;
        };

        self.selected = match key {
            Key::Up | Key::Char('k') => self.selected.saturating_sub(1),
            Key::Down | Key::Char('j') => (self.selected + 1).min(last),
            Key::Home | Key::Char('g') => 0,
            Key::End | Key::Char('G') => last,
            Key::PageUp => self.selected.saturating_sub(PAGE_SIZE),
            Key::PageDown => (self.selected + PAGE_SIZE).min(last),
            _ => return false,
        };
        true
    }

    /// Recompute the visible rows and select the first one
    fn refresh(&mut self) {
        let needle = self.filter.as_deref().unwrap_or_default().to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, bot)| bot.name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.selected = 0;
    }
}

// ============================================================================
// Text Input
// ============================================================================

/// Single-line text input with a character cursor
#[derive(Clone, Debug)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters
    cursor: usize,
    focused: bool,
    placeholder: String,
    char_limit: usize,
}

impl Default for TextInput {
    fn default() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            placeholder: String::new(),
            char_limit: 156,
        }
    }
}

impl TextInput {
    /// Create an unfocused, empty input
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder shown while empty
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the maximum number of characters
    #[must_use]
    pub fn with_char_limit(mut self, char_limit: usize) -> Self {
        self.char_limit = char_limit;
        self
    }

    /// Current text
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Placeholder text
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Cursor position in characters
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the input receives keys
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Start receiving keys
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Stop receiving keys
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Empty the input
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Take the current text, leaving the input empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    /// Apply an editing key; returns whether the key was used
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.focused {
            return false;
        }

        match key {
            Key::Char(c) => {
                if self.value.chars().count() >= self.char_limit {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
            }
            Key::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            Key::Delete => {
                if self.cursor >= self.value.chars().count() {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.value.chars().count()),
            Key::Home | Key::Ctrl('a') => self.cursor = 0,
            Key::End | Key::Ctrl('e') => self.cursor = self.value.chars().count(),
            Key::Ctrl('u') => self.clear(),
            _ => return false,
        }
        true
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

// ============================================================================
// Spinner
// ============================================================================

/// Spinner animation styles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinnerStyle {
    /// Rotating braille dot
    Dot,
    /// Bouncing braille dot
    Jump,
}

impl SpinnerStyle {
    /// Animation frames
    #[must_use]
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            Self::Dot => &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"],
            Self::Jump => &["⢄", "⢂", "⢁", "⡁", "⡈", "⡐", "⡠"],
        }
    }
}

/// Frame-stepped spinner
#[derive(Clone, Debug)]
pub struct Spinner {
    style: SpinnerStyle,
    frame: usize,
}

impl Spinner {
    /// Create a spinner on its first frame
    #[must_use]
    pub fn new(style: SpinnerStyle) -> Self {
        Self { style, frame: 0 }
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % self.style.frames().len();
    }

    /// Current glyph
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        self.style.frames()[self.frame]
    }
}
