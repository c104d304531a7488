//! Per-channel reveal state.

use serde::{Deserialize, Serialize};

/// Reveal progress for one model column.
///
/// `revealed_chars` counts Unicode scalar values, is monotonically
/// non-decreasing while the channel is active, and resets to 0 only when
/// `full_text` is replaced. Prefix slicing is always char-boundary safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StreamState {
    full_text: String,
    revealed_chars: usize,
    is_active: bool,
}

impl StreamState {
    /// An empty, inactive channel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A channel about to stream `text` from the first character.
    ///
    /// Empty text is immediately terminal: the channel starts inactive and
    /// no ticking should be scheduled for it.
    pub fn streaming(text: impl Into<String>) -> Self {
        let full_text = text.into();
        let is_active = !full_text.is_empty();
        Self {
            full_text,
            revealed_chars: 0,
            is_active,
        }
    }

    /// A channel showing `text` in full with no reveal (replay, errors,
    /// cosmetic placeholders).
    pub fn fully_revealed(text: impl Into<String>) -> Self {
        let full_text = text.into();
        let revealed_chars = full_text.chars().count();
        Self {
            full_text,
            revealed_chars,
            is_active: false,
        }
    }

    /// Advances the reveal by exactly one character.
    ///
    /// Returns false without mutating when the channel is inactive or
    /// already fully revealed. Deactivates the channel once the last
    /// character is revealed, so ticking stops permanently.
    pub fn advance(&mut self) -> bool {
        let len = self.char_len();
        if !self.is_active || self.revealed_chars >= len {
            return false;
        }
        self.revealed_chars += 1;
        if self.revealed_chars >= len {
            self.is_active = false;
        }
        true
    }

    /// The text currently visible on this channel.
    ///
    /// While the owning session is revealing and the channel is still
    /// active, this is the revealed prefix; otherwise the full text
    /// (non-streaming consumers always see everything).
    pub fn visible_text(&self, revealing: bool) -> &str {
        if revealing && self.is_active {
            match self.full_text.char_indices().nth(self.revealed_chars) {
                Some((byte_idx, _)) => &self.full_text[..byte_idx],
                None => &self.full_text,
            }
        } else {
            &self.full_text
        }
    }

    /// True iff the channel is actively ticking with characters left.
    pub fn cursor_visible(&self) -> bool {
        self.is_active && self.revealed_chars < self.char_len()
    }

    /// The complete response text.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Characters revealed so far.
    pub fn revealed_chars(&self) -> usize {
        self.revealed_chars
    }

    /// Total character count of the full text.
    pub fn char_len(&self) -> usize {
        self.full_text.chars().count()
    }

    /// True while the channel still expects reveal ticks.
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}
